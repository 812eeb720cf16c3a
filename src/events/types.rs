use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload `type` used for ordinary widget lists
pub const WIDGET_INFORMATION: &str = "widget-information";

/// Payload `type` marking an order confirmation
pub const ORDER_CONFIRMATION: &str = "order-confirmation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    User,
    Agent,
    Widget,
    System,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::User => write!(f, "user"),
            EventKind::Agent => write!(f, "agent"),
            EventKind::Widget => write!(f, "widget"),
            EventKind::System => write!(f, "system"),
        }
    }
}

fn default_payload_type() -> String {
    WIDGET_INFORMATION.to_string()
}

/// Message carried by a `widget` event.
///
/// `details` stays an opaque string until a consumer parses it, so a
/// malformed payload can sit in the log without poisoning anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPayload {
    #[serde(rename = "type", default = "default_payload_type")]
    pub payload_type: String,
    pub details: String,
}

impl WidgetPayload {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            payload_type: default_payload_type(),
            details: details.into(),
        }
    }

    pub fn order_confirmation(details: impl Into<String>) -> Self {
        Self {
            payload_type: ORDER_CONFIRMATION.to_string(),
            details: details.into(),
        }
    }

    pub fn is_order_confirmation(&self) -> bool {
        self.payload_type == ORDER_CONFIRMATION
    }
}

/// Body of a chat event, tagged the way the orchestrator sends it:
/// `{"type": "widget", "message": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message", rename_all = "lowercase")]
pub enum ChatMessage {
    User(String),
    Agent(String),
    Widget(WidgetPayload),
    System(String),
}

impl ChatMessage {
    pub fn kind(&self) -> EventKind {
        match self {
            ChatMessage::User(_) => EventKind::User,
            ChatMessage::Agent(_) => EventKind::Agent,
            ChatMessage::Widget(_) => EventKind::Widget,
            ChatMessage::System(_) => EventKind::System,
        }
    }

    pub fn as_widget(&self) -> Option<&WidgetPayload> {
        match self {
            ChatMessage::Widget(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ChatMessage::User(text) | ChatMessage::Agent(text) | ChatMessage::System(text) => {
                Some(text)
            }
            ChatMessage::Widget(_) => None,
        }
    }

    /// Decode a single inbound chat message from its JSON wire form
    pub fn from_json(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| crate::VoiceboardError::WidgetPayload(format!("invalid chat event: {}", e)))
    }
}

/// An entry of the append-only chat log
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEvent {
    /// Insertion-ordered id assigned by the log
    pub id: u64,
    pub message: ChatMessage,
    pub timestamp: DateTime<Utc>,
}

impl ChatEvent {
    pub fn kind(&self) -> EventKind {
        self.message.kind()
    }
}
