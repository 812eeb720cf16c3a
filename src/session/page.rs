/// Page shown by the front end; exactly one is active
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Page {
    #[default]
    Welcome,
    Home,
    OrderConfirmation,
}

impl Page {
    /// Allowed forward transitions. Nothing leads back to `Welcome`; only a
    /// fresh session does.
    pub fn can_transition_to(&self, next: Page) -> bool {
        matches!(
            (self, next),
            (Page::Welcome, Page::Home) | (Page::Home, Page::OrderConfirmation)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Welcome => "welcome",
            Page::Home => "home",
            Page::OrderConfirmation => "order-confirmation",
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
