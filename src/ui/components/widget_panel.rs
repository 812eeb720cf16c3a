//! Widgets from the latest widget event
//!
//! Market embeds are shown as link cards; spreadsheets render as a grid with
//! a CSV download button.

use crate::widgets::{render_key, RenderHandle, Spreadsheet, Widget};
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use egui::{self, RichText};
use serde_json::Value;

const CHART_URL: &str = "https://www.tradingview.com/chart/?symbol=";
const SYMBOL_URL: &str = "https://www.tradingview.com/symbols/";
const MARKETS_URL: &str = "https://www.tradingview.com/markets/";

pub struct WidgetPanel<'a> {
    handles: &'a [(usize, RenderHandle)],
    theme: &'a Theme,
}

impl<'a> WidgetPanel<'a> {
    pub fn new(handles: &'a [(usize, RenderHandle)], theme: &'a Theme) -> Self {
        Self { handles, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> Option<UiIntent> {
        let mut intent = None;

        if self.handles.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(self.theme.spacing_lg);
                ui.label(
                    RichText::new("Ask about a stock or the market to see it here.")
                        .color(self.theme.text_muted),
                );
            });
            return None;
        }

        egui::ScrollArea::vertical()
            .id_salt("widget-panel")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, handle) in self.handles {
                    ui.push_id(render_key(*index), |ui| {
                        if let Some(i) = self.show_card(ui, *index, handle) {
                            intent = Some(i);
                        }
                    });
                    ui.add_space(self.theme.spacing_sm);
                }
            });

        intent
    }

    fn show_card(&self, ui: &mut egui::Ui, index: usize, handle: &RenderHandle) -> Option<UiIntent> {
        let mut intent = None;

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(handle.title())
                        .size(16.0)
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.add_space(self.theme.spacing_sm);

                match &handle.widget {
                    Widget::StockPrice { symbol }
                    | Widget::StockFinancials { symbol }
                    | Widget::StockNews { symbol } => {
                        ui.hyperlink_to(
                            format!("Open {} on TradingView", symbol),
                            format!("{}{}/", SYMBOL_URL, symbol),
                        );
                    }
                    Widget::StockChart {
                        symbol,
                        comparison_symbols,
                    } => {
                        for compare in comparison_symbols {
                            ui.label(
                                RichText::new(format!("{} ({})", compare.symbol, compare.position))
                                    .size(12.0)
                                    .color(self.theme.text_muted),
                            );
                        }
                        ui.hyperlink_to("Open interactive chart", format!("{}{}", CHART_URL, symbol));
                    }
                    Widget::StockScreener
                    | Widget::MarketOverview
                    | Widget::MarketHeatmap
                    | Widget::EtfHeatmap
                    | Widget::TrendingStocks => {
                        ui.hyperlink_to("Open on TradingView", MARKETS_URL);
                    }
                    Widget::Information { content, .. } => {
                        ui.label(RichText::new(content).color(self.theme.text_secondary));
                    }
                    Widget::Spreadsheet(sheet) => {
                        self.show_spreadsheet(ui, index, sheet);
                        ui.add_space(self.theme.spacing_sm);
                        let enabled = !sheet.rows.is_empty();
                        if ui
                            .add_enabled(enabled, egui::Button::new("Download Spreadsheet"))
                            .clicked()
                        {
                            intent = Some(UiIntent::ExportSpreadsheet(index));
                        }
                    }
                }
            });

        intent
    }

    fn show_spreadsheet(&self, ui: &mut egui::Ui, index: usize, sheet: &Spreadsheet) {
        let Some(first) = sheet.rows.first() else {
            ui.label(RichText::new("No data").color(self.theme.text_muted));
            return;
        };
        let columns: Vec<&String> = first.keys().collect();

        egui::ScrollArea::horizontal()
            .id_salt(("sheet", index))
            .show(ui, |ui| {
                egui::Grid::new(("sheet-grid", index))
                    .striped(true)
                    .spacing([self.theme.spacing, 4.0])
                    .show(ui, |ui| {
                        for column in &columns {
                            ui.label(RichText::new(column.as_str()).strong());
                        }
                        ui.end_row();

                        for row in &sheet.rows {
                            for column in &columns {
                                ui.label(cell_text(row.get(column.as_str())));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
