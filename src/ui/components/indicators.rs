//! Agent and listening indicators
//!
//! Animations are driven by the frame clock and only read session state.

use crate::session::SessionState;
use crate::skin::Skin;
use crate::ui::theme::Theme;
use egui::{self, Pos2, RichText, Sense, Stroke, Vec2};

const BAR_COUNT: usize = 5;

/// Agent avatar with a thinking pulse and a talking bar animation
pub struct AgentIndicator<'a> {
    state: SessionState,
    skin: &'a Skin,
    theme: &'a Theme,
}

impl<'a> AgentIndicator<'a> {
    pub fn new(state: SessionState, skin: &'a Skin, theme: &'a Theme) -> Self {
        Self { state, skin, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let time = ui.input(|i| i.time) as f32;
        let size = 96.0;
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
        let painter = ui.painter();
        let center = rect.center();

        let radius = if self.state.shows_thinking() {
            size * 0.4 + (time * 4.0).sin() * 4.0
        } else {
            size * 0.4
        };
        painter.circle_filled(center, radius, self.theme.primary.gamma_multiply(0.15));
        painter.circle_stroke(center, radius, Stroke::new(2.0, self.theme.primary));

        let initial = self.skin.agent_name.chars().next().unwrap_or('?');
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            initial,
            egui::FontId::proportional(36.0),
            self.theme.primary,
        );

        ui.add_space(self.theme.spacing_sm);

        let status = if self.state.shows_thinking() {
            "Thinking..."
        } else if self.state.is_agent_speaking {
            "Talking"
        } else {
            "Listening"
        };
        ui.label(
            RichText::new(format!("{} · {}", self.skin.agent_name, status))
                .size(13.0)
                .color(self.theme.text_muted),
        );

        if self.state.is_agent_speaking {
            draw_bars(ui, time, self.theme.indicator);
        }
    }
}

/// Shows whether the microphone is live and the user is talking
pub struct ListeningIndicator<'a> {
    state: SessionState,
    theme: &'a Theme,
}

impl<'a> ListeningIndicator<'a> {
    pub fn new(state: SessionState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let (label, color) = if !self.state.is_recording {
                ("Microphone muted", self.theme.muted)
            } else if self.state.is_user_speaking {
                ("You are speaking", self.theme.indicator)
            } else {
                ("Listening", self.theme.text_muted)
            };

            if self.state.is_recording && self.state.is_user_speaking {
                let time = ui.input(|i| i.time) as f32;
                draw_bars(ui, time, color);
            }
            ui.label(RichText::new(label).size(12.0).color(color));
        });
    }
}

fn draw_bars(ui: &mut egui::Ui, time: f32, color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(40.0, 20.0), Sense::hover());
    let painter = ui.painter();
    let spacing = rect.width() / BAR_COUNT as f32;

    for i in 0..BAR_COUNT {
        let phase = time * 8.0 + i as f32 * 0.9;
        let height = rect.height() * (0.3 + 0.7 * phase.sin().abs());
        let x = rect.left() + spacing * (i as f32 + 0.5);
        painter.line_segment(
            [
                Pos2::new(x, rect.center().y - height / 2.0),
                Pos2::new(x, rect.center().y + height / 2.0),
            ],
            Stroke::new(3.0, color),
        );
    }
}
