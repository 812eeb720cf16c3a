use super::descriptor::{Widget, WidgetDescriptor};
use tracing::{debug, warn};

/// Supported widget tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    StockPrice,
    StockChart,
    StockFinancials,
    StockNews,
    StockScreener,
    MarketOverview,
    MarketHeatmap,
    EtfHeatmap,
    TrendingStocks,
    Information,
    Spreadsheet,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 11] = [
        WidgetKind::StockPrice,
        WidgetKind::StockChart,
        WidgetKind::StockFinancials,
        WidgetKind::StockNews,
        WidgetKind::StockScreener,
        WidgetKind::MarketOverview,
        WidgetKind::MarketHeatmap,
        WidgetKind::EtfHeatmap,
        WidgetKind::TrendingStocks,
        WidgetKind::Information,
        WidgetKind::Spreadsheet,
    ];

    /// Wire tag emitted by the orchestrator
    pub fn tag(&self) -> &'static str {
        match self {
            WidgetKind::StockPrice => "showStockPrice",
            WidgetKind::StockChart => "showStockChart",
            WidgetKind::StockFinancials => "showStockFinancials",
            WidgetKind::StockNews => "showStockNews",
            WidgetKind::StockScreener => "showStockScreener",
            WidgetKind::MarketOverview => "showMarketOverview",
            WidgetKind::MarketHeatmap => "showMarketHeatmap",
            WidgetKind::EtfHeatmap => "showETFHeatmap",
            WidgetKind::TrendingStocks => "showTrendingStocks",
            WidgetKind::Information => "showInformation",
            WidgetKind::Spreadsheet => "showSpreadsheet",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Whether the rendered widget offers a local file export
    pub fn supports_export(&self) -> bool {
        matches!(self, WidgetKind::Spreadsheet)
    }
}

/// Renderable result of resolving a descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct RenderHandle {
    pub kind: WidgetKind,
    pub widget: Widget,
}

impl RenderHandle {
    pub fn supports_export(&self) -> bool {
        self.kind.supports_export()
    }

    /// Human readable panel heading
    pub fn title(&self) -> String {
        match &self.widget {
            Widget::StockPrice { symbol } => format!("{} Price", symbol),
            Widget::StockChart {
                symbol,
                comparison_symbols,
            } => {
                if comparison_symbols.is_empty() {
                    format!("{} Chart", symbol)
                } else {
                    let others: Vec<&str> =
                        comparison_symbols.iter().map(|c| c.symbol.as_str()).collect();
                    format!("{} vs {}", symbol, others.join(", "))
                }
            }
            Widget::StockFinancials { symbol } => format!("{} Financials", symbol),
            Widget::StockNews { symbol } => format!("{} News", symbol),
            Widget::StockScreener => "Stock Screener".to_string(),
            Widget::MarketOverview => "Market Overview".to_string(),
            Widget::MarketHeatmap => "Market Heatmap".to_string(),
            Widget::EtfHeatmap => "ETF Heatmap".to_string(),
            Widget::TrendingStocks => "Trending Stocks".to_string(),
            Widget::Information { title, .. } => title.clone(),
            Widget::Spreadsheet(sheet) => sheet.title(),
        }
    }
}

/// Stable rendering key for the descriptor at `index`
pub fn render_key(index: usize) -> String {
    format!("widget-{}", index)
}

/// Look up a descriptor's tag and validate its parameters.
///
/// Unknown tags and known tags with unusable parameters both resolve to
/// `None`; callers skip them without a placeholder.
pub fn resolve(descriptor: &WidgetDescriptor) -> Option<RenderHandle> {
    let Some(kind) = WidgetKind::from_tag(&descriptor.tag) else {
        debug!("Skipping unknown widget type: {}", descriptor.tag);
        return None;
    };

    match Widget::decode(kind, descriptor) {
        Ok(widget) => Some(RenderHandle { kind, widget }),
        Err(e) => {
            warn!("Skipping widget {}: {}", descriptor.tag, e);
            None
        }
    }
}

/// Resolve a descriptor list in order, keeping each handle's original index
pub fn resolve_all(descriptors: &[WidgetDescriptor]) -> Vec<(usize, RenderHandle)> {
    descriptors
        .iter()
        .enumerate()
        .filter_map(|(index, descriptor)| resolve(descriptor).map(|handle| (index, handle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_round_trips() {
        for kind in WidgetKind::ALL {
            assert_eq!(WidgetKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_resolve_price_widget() {
        let descriptor = WidgetDescriptor::new("showStockPrice").with_parameter("symbol", "NVDA");
        let handle = resolve(&descriptor).unwrap();
        assert_eq!(handle.kind, WidgetKind::StockPrice);
        assert_eq!(handle.title(), "NVDA Price");
        assert!(!handle.supports_export());
    }

    #[test]
    fn test_unknown_tag_resolves_to_none() {
        assert!(resolve(&WidgetDescriptor::new("showCryptoOrderbook")).is_none());
    }

    #[test]
    fn test_invalid_parameters_resolve_to_none() {
        assert!(resolve(&WidgetDescriptor::new("showInformation").with_parameter("title", "x")).is_none());
    }

    #[test]
    fn test_resolve_all_keeps_original_indices() {
        let descriptors = vec![
            WidgetDescriptor::new("showMarketOverview"),
            WidgetDescriptor::new("mysteryWidget"),
            WidgetDescriptor::new("showSpreadsheet")
                .with_parameter("symbol", "MSFT")
                .with_parameter("metric", "revenues"),
        ];
        let handles = resolve_all(&descriptors);
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[0].0, 0);
        assert_eq!(handles[1].0, 2);
        assert_eq!(render_key(handles[1].0), "widget-2");
        assert!(handles[1].1.supports_export());
    }
}
