//! egui front end
//!
//! Components only read session state and return [`UiIntent`]s; the app
//! applies intents to the controller. Animations read the clock, never the
//! other way round.

mod app;
pub mod components;
mod theme;

use crate::session::ActionRequest;

pub use app::VoiceboardApp;
pub use theme::Theme;

/// Something the user asked for this frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    Start,
    SendMessage,
    ToggleRecording,
    ToggleVoiceMode,
    /// Discard the session and start over
    EndSession,
    /// Button action for the orchestrator
    Action(ActionRequest),
    /// Export the spreadsheet at this descriptor index
    ExportSpreadsheet(usize),
    DismissIntro,
    DismissError,
}
