use crate::{Result, VoiceboardError};
use serde::Deserialize;

/// Order id as sent by the orchestrator, numeric or textual
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderId::Number(n) => write!(f, "{}", n),
            OrderId::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

fn one() -> u32 {
    1
}

/// Content of the order confirmation page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total: f64,
    #[serde(default)]
    pub message: Option<String>,
}

impl OrderConfirmation {
    /// Parse a confirmation payload's `details`
    pub fn parse(details: &str) -> Result<Self> {
        serde_json::from_str(details).map_err(|e| VoiceboardError::OrderConfirmation(e.to_string()))
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_confirmation() {
        let details = r#"{
            "order_id": 1042,
            "items": [
                {"name": "Margherita", "quantity": 2, "price": 11.5},
                {"name": "Garlic Knots", "price": 4.0}
            ],
            "total": 27.0,
            "message": "Ready in 20 minutes"
        }"#;
        let confirmation = OrderConfirmation::parse(details).unwrap();
        assert_eq!(confirmation.order_id.to_string(), "1042");
        assert_eq!(confirmation.item_count(), 3);
        assert_eq!(confirmation.message.as_deref(), Some("Ready in 20 minutes"));
    }

    #[test]
    fn test_text_order_id() {
        let confirmation =
            OrderConfirmation::parse(r#"{"order_id": "A-7", "total": 0}"#).unwrap();
        assert_eq!(confirmation.order_id, OrderId::Text("A-7".to_string()));
        assert!(confirmation.items.is_empty());
    }

    #[test]
    fn test_malformed_confirmation() {
        assert!(matches!(
            OrderConfirmation::parse("{not json"),
            Err(VoiceboardError::OrderConfirmation(_))
        ));
        assert!(OrderConfirmation::parse(r#"{"items": []}"#).is_err());
        assert!(OrderConfirmation::parse("[]").is_err());
    }
}
