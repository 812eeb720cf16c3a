use super::page::Page;

/// UI-relevant flags derived from user actions and inbound events.
///
/// The speaking/thinking flags are independent; thinking and speaking may
/// overlap briefly while a turn hands off from one to the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub current_page: Page,
    /// Capture intent
    pub is_recording: bool,
    pub is_voice_mode: bool,
    /// Set only by VAD signals
    pub is_user_speaking: bool,
    pub is_agent_speaking: bool,
    pub is_agent_thinking: bool,
    /// Lower-level playback status, finer grained than `is_agent_speaking`
    pub is_audio_playing: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            current_page: Page::Welcome,
            is_recording: false,
            is_voice_mode: true,
            is_user_speaking: false,
            is_agent_speaking: false,
            is_agent_thinking: false,
            is_audio_playing: false,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the "thinking" pulse should be shown
    pub fn shows_thinking(&self) -> bool {
        self.is_agent_thinking && !self.is_agent_speaking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SessionState::new();
        assert_eq!(state.current_page, Page::Welcome);
        assert!(state.is_voice_mode);
        assert!(!state.is_recording);
        assert!(!state.shows_thinking());
    }

    #[test]
    fn test_thinking_hidden_while_speaking() {
        let mut state = SessionState::new();
        state.is_agent_thinking = true;
        assert!(state.shows_thinking());
        state.is_agent_speaking = true;
        assert!(!state.shows_thinking());
    }
}
