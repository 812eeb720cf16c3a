//! Order confirmation page

use crate::session::OrderConfirmation;
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, RichText};

pub struct ConfirmationPage<'a> {
    confirmation: Option<&'a OrderConfirmation>,
    theme: &'a Theme,
}

impl<'a> ConfirmationPage<'a> {
    pub fn new(confirmation: Option<&'a OrderConfirmation>, theme: &'a Theme) -> Self {
        Self {
            confirmation,
            theme,
        }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<UiIntent> {
        let mut intent = None;

        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.15);
            ui.label(
                RichText::new("Order confirmed")
                    .size(28.0)
                    .color(self.theme.success),
            );

            if let Some(order) = self.confirmation {
                ui.label(
                    RichText::new(format!("Order #{}", order.order_id))
                        .size(16.0)
                        .color(self.theme.text_secondary),
                );
                if let Some(message) = &order.message {
                    ui.label(RichText::new(message).color(self.theme.text_muted));
                }

                ui.add_space(self.theme.spacing);
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .rounding(self.theme.card_rounding)
                    .inner_margin(self.theme.spacing)
                    .show(ui, |ui| {
                        ui.set_max_width(360.0);
                        egui::Grid::new("order-items")
                            .num_columns(3)
                            .spacing([self.theme.spacing, 4.0])
                            .show(ui, |ui| {
                                for item in &order.items {
                                    ui.label(format!("{}×", item.quantity));
                                    ui.label(&item.name);
                                    ui.label(format!("${:.2}", item.price));
                                    ui.end_row();
                                }
                                ui.label("");
                                ui.label(RichText::new("Total").strong());
                                ui.label(RichText::new(format!("${:.2}", order.total)).strong());
                                ui.end_row();
                            });
                    });
            }

            ui.add_space(self.theme.spacing_lg);
            if ui.button("Start a new order").clicked() {
                intent = Some(UiIntent::EndSession);
            }
        });

        intent
    }
}
