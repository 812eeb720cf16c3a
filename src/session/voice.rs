//! Voice/audio coordination
//!
//! Folds VAD speech signals, agent lifecycle signals and playback status into
//! [`SessionState`] without letting them contradict each other.

use super::state::SessionState;
use crate::orchestrator::StatusSignal;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct VoiceCoordinator {
    /// Ignore speech-start while the recording intent is off
    gate_on_recording: bool,
    /// Clear a turn's thinking flag after this long without resolution
    thinking_timeout: Option<Duration>,
    thinking_since: Option<Instant>,
    /// Recording state the user asked for that the capture layer has not yet acknowledged
    requested_recording: Option<bool>,
}

impl VoiceCoordinator {
    pub fn new(gate_on_recording: bool, thinking_timeout: Option<Duration>) -> Self {
        Self {
            gate_on_recording,
            thinking_timeout,
            thinking_since: None,
            requested_recording: None,
        }
    }

    /// Apply the user's recording intent immediately and hold it until the
    /// capture layer acknowledges the same value
    pub fn request_recording(&mut self, state: &mut SessionState, on: bool) {
        state.is_recording = on;
        self.requested_recording = Some(on);
    }

    /// Apply one status signal
    pub fn apply(&mut self, state: &mut SessionState, signal: StatusSignal, now: Instant) {
        match signal {
            // A pending user toggle wins over acknowledgments that disagree
            // with it; once a matching ack arrives the capture layer is
            // authoritative again.
            StatusSignal::Recording(on) => match self.requested_recording {
                Some(requested) if requested != on => {
                    debug!("Ignoring stale recording ack {} (requested {})", on, requested);
                }
                _ => {
                    self.requested_recording = None;
                    state.is_recording = on;
                }
            },
            StatusSignal::UserSpeechStart => {
                if self.gate_on_recording && !state.is_recording {
                    debug!("Ignoring speech start while not recording");
                    return;
                }
                state.is_user_speaking = true;
            }
            StatusSignal::UserSpeechEnd => {
                state.is_user_speaking = false;
            }
            StatusSignal::AgentThinking(true) => {
                state.is_agent_thinking = true;
                self.thinking_since = Some(now);
            }
            StatusSignal::AgentThinking(false) => {
                self.end_turn(state);
            }
            StatusSignal::AgentSpeaking(on) => {
                state.is_agent_speaking = on;
                if on {
                    self.end_turn(state);
                }
            }
            StatusSignal::AudioPlaying(on) => {
                state.is_audio_playing = on;
            }
        }
    }

    /// A terminal event for the current turn arrived
    pub fn end_turn(&mut self, state: &mut SessionState) {
        state.is_agent_thinking = false;
        self.thinking_since = None;
    }

    /// Expire a stuck thinking flag. Returns true if it was cleared.
    pub fn tick(&mut self, state: &mut SessionState, now: Instant) -> bool {
        let (Some(timeout), Some(since)) = (self.thinking_timeout, self.thinking_since) else {
            return false;
        };
        if state.is_agent_thinking && now.saturating_duration_since(since) >= timeout {
            warn!("Agent thinking timed out after {:?}", timeout);
            self.end_turn(state);
            return true;
        }
        false
    }
}
