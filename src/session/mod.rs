//! Session state controller
//!
//! Merges the inbound event stream into the small set of flags the UI
//! renders from, keeps the current widget list, and tracks in-flight
//! button actions.

pub mod actions;
pub mod confirmation;
pub mod controller;
pub mod page;
pub mod state;
pub mod voice;

pub use actions::{ActionDispatcher, ActionRequest, DispatchOutcome, PendingAction};
pub use confirmation::{OrderConfirmation, OrderId, OrderItem};
pub use controller::SessionController;
pub use page::Page;
pub use state::SessionState;
pub use voice::VoiceCoordinator;
