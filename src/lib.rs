pub mod config;
pub mod events;
pub mod orchestrator;
pub mod persistence;
pub mod session;
pub mod skin;
pub mod ui;
pub mod widgets;

pub use config::SessionConfig;
pub use events::{ChatEvent, ChatMessage, EventKind, EventLog, WidgetPayload};
pub use orchestrator::{ChannelOrchestrator, InboundEvent, OrchestratorClient, StatusSignal};
pub use session::{ActionRequest, Page, SessionController, SessionState};
pub use widgets::{extract_latest_widget, resolve, RenderHandle, Widget, WidgetDescriptor};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoiceboardError {
    #[error("Widget payload error: {0}")]
    WidgetPayload(String),

    #[error("Widget parameter error for {tag}: {reason}")]
    WidgetParameters { tag: String, reason: String },

    #[error("Order confirmation error: {0}")]
    OrderConfirmation(String),

    #[error("Voice/text mode toggle is disabled outside debug mode")]
    ModeToggleDisabled,

    #[error("Invalid page transition: {0}")]
    InvalidTransition(String),

    #[error("Orchestrator error: {0}")]
    Orchestrator(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    IO(String),
}

impl From<std::io::Error> for VoiceboardError {
    fn from(e: std::io::Error) -> Self {
        VoiceboardError::IO(e.to_string())
    }
}

impl VoiceboardError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Degrades to "no widget"
            VoiceboardError::WidgetPayload(_) => true,
            VoiceboardError::WidgetParameters { .. } => true,
            // The transition is refused; the user stays on the current page
            VoiceboardError::OrderConfirmation(_) => false,
            VoiceboardError::ModeToggleDisabled => true,
            VoiceboardError::InvalidTransition(_) => true,
            // Retry belongs to the orchestrator client
            VoiceboardError::Orchestrator(_) => true,
            VoiceboardError::Config(_) => false,
            VoiceboardError::Persistence(_) => true,
            VoiceboardError::Export(_) => true,
            VoiceboardError::IO(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            VoiceboardError::WidgetPayload(_) | VoiceboardError::WidgetParameters { .. } => {
                "A visualization could not be displayed.".to_string()
            }
            VoiceboardError::OrderConfirmation(_) => {
                "Your order confirmation could not be displayed. Please ask the agent to repeat it."
                    .to_string()
            }
            VoiceboardError::ModeToggleDisabled => {
                "Switching between voice and chat is not available.".to_string()
            }
            VoiceboardError::InvalidTransition(_) => "That action is not available right now.".to_string(),
            VoiceboardError::Orchestrator(_) => {
                "Could not reach the assistant. Please try again.".to_string()
            }
            VoiceboardError::Config(_) => "Configuration error. Please check settings.".to_string(),
            VoiceboardError::Persistence(_) => "Local settings could not be saved.".to_string(),
            VoiceboardError::Export(_) => "The spreadsheet could not be saved.".to_string(),
            VoiceboardError::IO(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VoiceboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_error_is_not_recoverable() {
        let err = VoiceboardError::OrderConfirmation("missing items".to_string());
        assert!(!err.is_recoverable());
        assert!(err.user_message().contains("confirmation"));
    }

    #[test]
    fn test_payload_errors_are_recoverable() {
        assert!(VoiceboardError::WidgetPayload("eof".to_string()).is_recoverable());
        assert!(VoiceboardError::WidgetParameters {
            tag: "showStockPrice".to_string(),
            reason: "missing symbol".to_string(),
        }
        .is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let err: VoiceboardError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, VoiceboardError::IO(_)));
    }
}
