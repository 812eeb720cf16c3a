//! Boundary with the remote orchestrator
//!
//! The transport itself lives outside this crate. The session controller only
//! sees the narrow [`OrchestratorClient`] trait for outbound requests and a
//! stream of [`InboundEvent`]s delivered in generation order.

mod channel;
pub mod loopback;

pub use channel::{ChannelOrchestrator, OrchestratorPeer};

use crate::events::ChatMessage;
use crate::Result;
use serde_json::{Map, Value};

/// Outbound requests the session can make
pub trait OrchestratorClient: Send {
    /// Begin the conversational session
    fn start_session(&self) -> Result<()>;

    /// Send a user text message
    fn send_message(&self, text: &str) -> Result<()>;

    /// Ask the orchestrator to execute a named action
    fn send_action(&self, name: &str, params: &Map<String, Value>) -> Result<()>;
}

/// Outbound request as carried over a channel
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundCommand {
    StartSession,
    SendMessage(String),
    SendAction {
        name: String,
        params: Map<String, Value>,
    },
}

/// Status signals reported by the orchestrator client and the VAD layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSignal {
    /// Capture acknowledged on/off
    Recording(bool),
    /// Agent audio playback lifecycle
    AgentSpeaking(bool),
    /// Start/end of turn processing
    AgentThinking(bool),
    /// Low-level audio decode/playback status
    AudioPlaying(bool),
    /// VAD detected the user starting to speak
    UserSpeechStart,
    /// VAD detected the user stopping
    UserSpeechEnd,
}

/// Everything the session consumes from the outside, in delivery order
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Chat(ChatMessage),
    Status(StatusSignal),
}

impl From<ChatMessage> for InboundEvent {
    fn from(message: ChatMessage) -> Self {
        InboundEvent::Chat(message)
    }
}

impl From<StatusSignal> for InboundEvent {
    fn from(signal: StatusSignal) -> Self {
        InboundEvent::Status(signal)
    }
}
