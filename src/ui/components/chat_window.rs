//! Transcript of the session and the text input used in chat mode

use crate::events::{ChatEvent, ChatMessage};
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, Align, Color32, Key, RichText};

pub struct ChatWindow<'a> {
    events: &'a [ChatEvent],
    input: &'a mut String,
    /// Text input is hidden in voice mode
    show_input: bool,
    theme: &'a Theme,
}

impl<'a> ChatWindow<'a> {
    pub fn new(events: &'a [ChatEvent], input: &'a mut String, show_input: bool, theme: &'a Theme) -> Self {
        Self {
            events,
            input,
            show_input,
            theme,
        }
    }

    pub fn show(mut self, ui: &mut egui::Ui) -> Option<UiIntent> {
        let mut intent = None;
        let input_height = if self.show_input { 56.0 } else { 0.0 };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .max_height(ui.available_height() - input_height)
            .show(ui, |ui| {
                for event in self.events {
                    self.show_event(ui, event);
                }
            });

        if self.show_input {
            ui.separator();
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut *self.input)
                        .hint_text("Type a message...")
                        .desired_width(ui.available_width() - 72.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                let can_send = !self.input.trim().is_empty();
                let send = egui::Button::new(RichText::new("Send").color(Color32::WHITE))
                    .fill(self.theme.primary)
                    .rounding(self.theme.button_rounding);
                let clicked = ui.add_enabled(can_send, send).clicked();

                if can_send && (submitted || clicked) {
                    intent = Some(UiIntent::SendMessage);
                    response.request_focus();
                }
            });
        }

        intent
    }

    fn show_event(&self, ui: &mut egui::Ui, event: &ChatEvent) {
        let (text, is_user) = match &event.message {
            ChatMessage::User(text) => (text.as_str(), true),
            ChatMessage::Agent(text) => (text.as_str(), false),
            // Widgets render in the widget panel
            ChatMessage::Widget(_) => return,
            ChatMessage::System(text) => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(text).size(11.0).italics().color(self.theme.text_muted));
                });
                return;
            }
        };

        let (fill, color) = if is_user {
            (self.theme.user_bubble, Color32::WHITE)
        } else {
            (self.theme.agent_bubble, self.theme.text_primary)
        };
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            let max_width = ui.available_width() * 0.8;
            egui::Frame::none()
                .fill(fill)
                .rounding(self.theme.card_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(text).color(color));
                });
            ui.label(
                RichText::new(event.timestamp.format("%H:%M").to_string())
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
        ui.add_space(self.theme.spacing_sm);
    }
}
