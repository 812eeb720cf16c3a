//! Agent skins: static presentation bundles selected at startup

#[derive(Clone, Debug, PartialEq)]
pub struct Skin {
    pub name: String,
    pub agent_name: String,
    pub title: String,
    pub subtitle: String,
    pub start_label: String,
    pub intro_title: String,
    pub intro_points: Vec<String>,
    /// Shows cart controls such as "Submit order"
    pub supports_orders: bool,
}

impl Skin {
    pub const NAMES: [&'static str; 2] = ["pizza-agent", "stock-agent"];

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "pizza-agent" => Some(Self::pizza()),
            "stock-agent" => Some(Self::stock()),
            _ => None,
        }
    }

    fn pizza() -> Self {
        Self {
            name: "pizza-agent".to_string(),
            agent_name: "Pizza Agent".to_string(),
            title: "Order a pizza by voice".to_string(),
            subtitle: "Browse the menu, build your cart and place your order.".to_string(),
            start_label: "Start ordering".to_string(),
            intro_title: "Welcome to Pizza Agent".to_string(),
            intro_points: vec![
                "Pizza Agent is experimental. Feedback is welcome!".to_string(),
                "Background noise can interrupt the agent. A quiet room works best.".to_string(),
            ],
            supports_orders: true,
        }
    }

    fn stock() -> Self {
        Self {
            name: "stock-agent".to_string(),
            agent_name: "Alice".to_string(),
            title: "Voice StockBot".to_string(),
            subtitle: "Live charts, news and financials on request.".to_string(),
            start_label: "Start".to_string(),
            intro_title: "Welcome to Voice StockBot".to_string(),
            intro_points: vec![
                "Voice StockBot is in beta and experimental. Feedback and PRs are welcome!"
                    .to_string(),
                "Because Voice StockBot can be interrupted, environments with significant \
                 background noise can lower the quality of your experience."
                    .to_string(),
                "Voice StockBot may provide inaccurate or incomplete information and should \
                 not be used for investment advice."
                    .to_string(),
            ],
            supports_orders: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_skins() {
        for name in Skin::NAMES {
            let skin = Skin::by_name(name).unwrap();
            assert_eq!(skin.name, name);
            assert!(!skin.intro_points.is_empty());
        }
    }

    #[test]
    fn test_only_pizza_takes_orders() {
        assert!(Skin::by_name("pizza-agent").unwrap().supports_orders);
        assert!(!Skin::by_name("stock-agent").unwrap().supports_orders);
    }

    #[test]
    fn test_unknown_skin() {
        assert!(Skin::by_name("taco-agent").is_none());
    }
}
