//! Welcome page: skin title and the start button

use crate::skin::Skin;
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, RichText, Vec2};

pub struct WelcomeScreen<'a> {
    skin: &'a Skin,
    theme: &'a Theme,
}

impl<'a> WelcomeScreen<'a> {
    pub fn new(skin: &'a Skin, theme: &'a Theme) -> Self {
        Self { skin, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<UiIntent> {
        let mut intent = None;

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.25);

            ui.label(
                RichText::new(&self.skin.agent_name)
                    .size(16.0)
                    .strong()
                    .color(self.theme.primary),
            );
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(&self.skin.title)
                    .size(32.0)
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(&self.skin.subtitle)
                    .size(16.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(self.theme.spacing_lg);

            let button = egui::Button::new(
                RichText::new(&self.skin.start_label)
                    .size(18.0)
                    .color(egui::Color32::WHITE),
            )
            .fill(self.theme.primary)
            .rounding(self.theme.button_rounding)
            .min_size(Vec2::new(180.0, 48.0));

            if ui.add(button).clicked() {
                intent = Some(UiIntent::Start);
            }
        });

        intent
    }
}
