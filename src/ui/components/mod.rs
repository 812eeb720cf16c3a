//! UI components

pub mod chat_window;
pub mod confirmation_page;
pub mod control_bar;
pub mod indicators;
pub mod intro_popup;
pub mod welcome;
pub mod widget_panel;

pub use chat_window::ChatWindow;
pub use confirmation_page::ConfirmationPage;
pub use control_bar::ControlBar;
pub use indicators::{AgentIndicator, ListeningIndicator};
pub use intro_popup::IntroPopup;
pub use welcome::WelcomeScreen;
pub use widget_panel::WidgetPanel;
