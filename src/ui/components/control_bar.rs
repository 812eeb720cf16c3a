//! Bottom control bar: mute, voice/text toggle and end session

use crate::session::{ActionRequest, SessionState};
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, RichText, Vec2};

pub struct ControlBar<'a> {
    state: SessionState,
    /// Only true in debug mode
    can_toggle_voice: bool,
    /// `Some(in_flight)` when the order button is shown
    submit_order: Option<bool>,
    theme: &'a Theme,
}

impl<'a> ControlBar<'a> {
    pub fn new(state: SessionState, can_toggle_voice: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            can_toggle_voice,
            submit_order: None,
            theme,
        }
    }

    /// Show a "Submit order" button, disabled while a submission is in flight
    pub fn with_submit_order(mut self, in_flight: bool) -> Self {
        self.submit_order = Some(in_flight);
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<UiIntent> {
        let mut intent = None;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    if self.state.is_voice_mode {
                        let (icon, tooltip) = if self.state.is_recording {
                            ("🎤", "Mute microphone")
                        } else {
                            ("🔇", "Unmute microphone")
                        };
                        let color = if self.state.is_recording {
                            self.theme.primary
                        } else {
                            self.theme.muted
                        };
                        let button = egui::Button::new(RichText::new(icon).size(20.0).color(color))
                            .min_size(Vec2::splat(40.0))
                            .rounding(self.theme.button_rounding);
                        if ui.add(button).on_hover_text(tooltip).clicked() {
                            intent = Some(UiIntent::ToggleRecording);
                        }
                    }

                    if self.can_toggle_voice {
                        let label = if self.state.is_voice_mode {
                            "Switch to chat"
                        } else {
                            "Switch to voice"
                        };
                        if ui.button(label).clicked() {
                            intent = Some(UiIntent::ToggleVoiceMode);
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if let Some(in_flight) = self.submit_order {
                            let label = if in_flight { "Submitting..." } else { "Submit order" };
                            let submit = egui::Button::new(
                                RichText::new(label).color(egui::Color32::WHITE),
                            )
                            .fill(self.theme.success)
                            .rounding(self.theme.button_rounding);
                            if ui.add_enabled(!in_flight, submit).clicked() {
                                intent = Some(UiIntent::Action(ActionRequest::SubmitOrder));
                            }
                        }

                        let end = egui::Button::new(
                            RichText::new("End").color(egui::Color32::WHITE),
                        )
                        .fill(self.theme.error)
                        .rounding(self.theme.button_rounding);
                        if ui.add(end).clicked() {
                            intent = Some(UiIntent::EndSession);
                        }
                    });
                });
            });

        intent
    }
}
