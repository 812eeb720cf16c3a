//! First-run intro shown over the home page until acknowledged

use crate::skin::Skin;
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, RichText};

pub struct IntroPopup<'a> {
    skin: &'a Skin,
    theme: &'a Theme,
}

impl<'a> IntroPopup<'a> {
    pub fn new(skin: &'a Skin, theme: &'a Theme) -> Self {
        Self { skin, theme }
    }

    pub fn show(self, ctx: &egui::Context) -> Option<UiIntent> {
        let mut intent = None;

        egui::Window::new(RichText::new(&self.skin.intro_title).strong())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .default_width(420.0)
            .show(ctx, |ui| {
                for point in &self.skin.intro_points {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("•").color(self.theme.primary));
                        ui.label(RichText::new(point).color(self.theme.text_secondary));
                    });
                }

                ui.add_space(self.theme.spacing);
                ui.vertical_centered(|ui| {
                    let button = egui::Button::new(
                        RichText::new("Got it").color(egui::Color32::WHITE),
                    )
                    .fill(self.theme.primary)
                    .rounding(self.theme.button_rounding);
                    if ui.add(button).clicked() {
                        intent = Some(UiIntent::DismissIntro);
                    }
                });
            });

        intent
    }
}
