use super::registry::WidgetKind;
use crate::{Result, VoiceboardError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Raw widget instruction as decoded from a widget payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Map<String, Value>>>,
}

impl WidgetDescriptor {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            parameters: Map::new(),
            data: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, rows: Vec<Map<String, Value>>) -> Self {
        self.data = Some(rows);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSymbol {
    pub symbol: String,
    #[serde(default = "same_scale")]
    pub position: String,
}

fn same_scale() -> String {
    "SameScale".to_string()
}

/// Tabular widget with client-side export
#[derive(Debug, Clone, PartialEq)]
pub struct Spreadsheet {
    pub symbol: String,
    pub metric: String,
    /// Ordered column name to value rows
    pub rows: Vec<Map<String, Value>>,
}

impl Spreadsheet {
    /// Heading such as `AMZN Assets`
    pub fn title(&self) -> String {
        let mut chars = self.metric.chars();
        let metric = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };
        format!("{} {}", self.symbol, metric)
    }

    pub fn to_csv(&self) -> String {
        super::export::rows_to_csv(&self.rows)
    }

    /// Write `<metric>.csv` into `dir`
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf> {
        super::export::save_csv(&self.rows, dir, &self.metric)
    }
}

/// Strongly typed widget, one variant per supported tag
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    StockPrice {
        symbol: String,
    },
    StockChart {
        symbol: String,
        comparison_symbols: Vec<ComparisonSymbol>,
    },
    StockFinancials {
        symbol: String,
    },
    StockNews {
        symbol: String,
    },
    StockScreener,
    MarketOverview,
    MarketHeatmap,
    EtfHeatmap,
    TrendingStocks,
    Information {
        title: String,
        content: String,
    },
    Spreadsheet(Spreadsheet),
}

#[derive(Deserialize)]
struct SymbolParams {
    symbol: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartParams {
    symbol: String,
    #[serde(default)]
    comparison_symbols: Option<Vec<ComparisonSymbol>>,
}

#[derive(Deserialize)]
struct InformationParams {
    title: String,
    content: String,
}

#[derive(Deserialize)]
struct SpreadsheetParams {
    symbol: String,
    metric: String,
}

fn params<T: DeserializeOwned>(descriptor: &WidgetDescriptor) -> Result<T> {
    serde_json::from_value(Value::Object(descriptor.parameters.clone())).map_err(|e| {
        VoiceboardError::WidgetParameters {
            tag: descriptor.tag.clone(),
            reason: e.to_string(),
        }
    })
}

impl Widget {
    /// Validate a descriptor's parameters against the record for `kind`
    pub fn decode(kind: WidgetKind, descriptor: &WidgetDescriptor) -> Result<Self> {
        let widget = match kind {
            WidgetKind::StockPrice => Widget::StockPrice {
                symbol: params::<SymbolParams>(descriptor)?.symbol,
            },
            WidgetKind::StockChart => {
                let chart: ChartParams = params(descriptor)?;
                Widget::StockChart {
                    symbol: chart.symbol,
                    comparison_symbols: chart.comparison_symbols.unwrap_or_default(),
                }
            }
            WidgetKind::StockFinancials => Widget::StockFinancials {
                symbol: params::<SymbolParams>(descriptor)?.symbol,
            },
            WidgetKind::StockNews => Widget::StockNews {
                symbol: params::<SymbolParams>(descriptor)?.symbol,
            },
            WidgetKind::StockScreener => Widget::StockScreener,
            WidgetKind::MarketOverview => Widget::MarketOverview,
            WidgetKind::MarketHeatmap => Widget::MarketHeatmap,
            WidgetKind::EtfHeatmap => Widget::EtfHeatmap,
            WidgetKind::TrendingStocks => Widget::TrendingStocks,
            WidgetKind::Information => {
                let info: InformationParams = params(descriptor)?;
                Widget::Information {
                    title: info.title,
                    content: info.content,
                }
            }
            WidgetKind::Spreadsheet => {
                let sheet: SpreadsheetParams = params(descriptor)?;
                Widget::Spreadsheet(Spreadsheet {
                    symbol: sheet.symbol,
                    metric: sheet.metric,
                    rows: descriptor.data.clone().unwrap_or_default(),
                })
            }
        };
        Ok(widget)
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Widget::StockPrice { .. } => WidgetKind::StockPrice,
            Widget::StockChart { .. } => WidgetKind::StockChart,
            Widget::StockFinancials { .. } => WidgetKind::StockFinancials,
            Widget::StockNews { .. } => WidgetKind::StockNews,
            Widget::StockScreener => WidgetKind::StockScreener,
            Widget::MarketOverview => WidgetKind::MarketOverview,
            Widget::MarketHeatmap => WidgetKind::MarketHeatmap,
            Widget::EtfHeatmap => WidgetKind::EtfHeatmap,
            Widget::TrendingStocks => WidgetKind::TrendingStocks,
            Widget::Information { .. } => WidgetKind::Information,
            Widget::Spreadsheet(_) => WidgetKind::Spreadsheet,
        }
    }

    /// Symbol the widget is about, if any
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Widget::StockPrice { symbol }
            | Widget::StockChart { symbol, .. }
            | Widget::StockFinancials { symbol }
            | Widget::StockNews { symbol } => Some(symbol),
            Widget::Spreadsheet(sheet) => Some(&sheet.symbol),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_stock_price() {
        let descriptor = WidgetDescriptor::new("showStockPrice").with_parameter("symbol", "NVDA");
        let widget = Widget::decode(WidgetKind::StockPrice, &descriptor).unwrap();
        assert_eq!(
            widget,
            Widget::StockPrice {
                symbol: "NVDA".to_string()
            }
        );
        assert_eq!(widget.symbol(), Some("NVDA"));
    }

    #[test]
    fn test_decode_chart_comparisons() {
        let descriptor = WidgetDescriptor::new("showStockChart")
            .with_parameter("symbol", "AAPL")
            .with_parameter("comparisonSymbols", json!([{"symbol": "MSFT"}]));
        let widget = Widget::decode(WidgetKind::StockChart, &descriptor).unwrap();
        match widget {
            Widget::StockChart {
                symbol,
                comparison_symbols,
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(comparison_symbols.len(), 1);
                assert_eq!(comparison_symbols[0].position, "SameScale");
            }
            other => panic!("unexpected widget {:?}", other),
        }
    }

    #[test]
    fn test_decode_chart_null_comparisons() {
        let descriptor = WidgetDescriptor::new("showStockChart")
            .with_parameter("symbol", "AAPL")
            .with_parameter("comparisonSymbols", Value::Null);
        let widget = Widget::decode(WidgetKind::StockChart, &descriptor).unwrap();
        assert!(matches!(
            widget,
            Widget::StockChart { ref comparison_symbols, .. } if comparison_symbols.is_empty()
        ));
    }

    #[test]
    fn test_missing_symbol_is_parameter_error() {
        let descriptor = WidgetDescriptor::new("showStockNews");
        let err = Widget::decode(WidgetKind::StockNews, &descriptor).unwrap_err();
        assert!(matches!(err, VoiceboardError::WidgetParameters { .. }));
    }

    #[test]
    fn test_unit_widgets_ignore_parameters() {
        let descriptor = WidgetDescriptor::new("showMarketOverview").with_parameter("extra", 1);
        assert_eq!(
            Widget::decode(WidgetKind::MarketOverview, &descriptor).unwrap(),
            Widget::MarketOverview
        );
    }

    #[test]
    fn test_spreadsheet_title_capitalises_metric() {
        let descriptor = WidgetDescriptor::new("showSpreadsheet")
            .with_parameter("symbol", "AMZN")
            .with_parameter("metric", "assets");
        let widget = Widget::decode(WidgetKind::Spreadsheet, &descriptor).unwrap();
        match widget {
            Widget::Spreadsheet(sheet) => {
                assert_eq!(sheet.title(), "AMZN Assets");
                assert!(sheet.rows.is_empty());
            }
            other => panic!("unexpected widget {:?}", other),
        }
    }
}
