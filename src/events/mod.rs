pub mod log;
pub mod types;

pub use log::EventLog;
pub use types::{ChatEvent, ChatMessage, EventKind, WidgetPayload};
