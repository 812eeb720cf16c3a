use super::{InboundEvent, OrchestratorClient, OutboundCommand};
use crate::{Result, VoiceboardError};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde_json::{Map, Value};

/// Orchestrator client backed by crossbeam channels.
///
/// The client side sends [`OutboundCommand`]s and receives
/// [`InboundEvent`]s; the transport side holds the matching
/// [`OrchestratorPeer`].
pub struct ChannelOrchestrator {
    /// Command sender
    command_tx: Sender<OutboundCommand>,
    /// Event receiver
    event_rx: Receiver<InboundEvent>,
}

/// Transport end of a [`ChannelOrchestrator`]
pub struct OrchestratorPeer {
    command_rx: Receiver<OutboundCommand>,
    event_tx: Sender<InboundEvent>,
}

impl ChannelOrchestrator {
    /// Create a connected client/peer pair with the given buffer size
    pub fn new(buffer_size: usize) -> (Self, OrchestratorPeer) {
        let (command_tx, command_rx) = bounded(buffer_size);
        let (event_tx, event_rx) = bounded(buffer_size);
        (
            Self {
                command_tx,
                event_rx,
            },
            OrchestratorPeer {
                command_rx,
                event_tx,
            },
        )
    }

    /// Get the inbound event receiver
    pub fn event_receiver(&self) -> Receiver<InboundEvent> {
        self.event_rx.clone()
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<InboundEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Queue a command without blocking the UI loop
    fn send(&self, cmd: OutboundCommand) -> Result<()> {
        self.command_tx.try_send(cmd).map_err(|e| match e {
            TrySendError::Full(_) => {
                VoiceboardError::Orchestrator("command queue is full".to_string())
            }
            TrySendError::Disconnected(_) => {
                VoiceboardError::Orchestrator("orchestrator disconnected".to_string())
            }
        })
    }
}

impl OrchestratorClient for ChannelOrchestrator {
    fn start_session(&self) -> Result<()> {
        self.send(OutboundCommand::StartSession)
    }

    fn send_message(&self, text: &str) -> Result<()> {
        self.send(OutboundCommand::SendMessage(text.to_string()))
    }

    fn send_action(&self, name: &str, params: &Map<String, Value>) -> Result<()> {
        self.send(OutboundCommand::SendAction {
            name: name.to_string(),
            params: params.clone(),
        })
    }
}

impl OrchestratorPeer {
    /// Deliver an event to the client
    pub fn send_event(&self, event: impl Into<InboundEvent>) -> Result<()> {
        self.event_tx
            .send(event.into())
            .map_err(|e| VoiceboardError::Orchestrator(format!("Failed to send event: {}", e)))
    }

    /// Try to receive a command (non-blocking)
    pub fn try_recv_command(&self) -> Option<OutboundCommand> {
        self.command_rx.try_recv().ok()
    }

    /// Block until the next command; errors once the client is gone
    pub fn recv_command(&self) -> Result<OutboundCommand> {
        self.command_rx
            .recv()
            .map_err(|_| VoiceboardError::Orchestrator("client disconnected".to_string()))
    }

    /// Drain all pending commands
    pub fn drain_commands(&self) -> Vec<OutboundCommand> {
        self.command_rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::ChatMessage;
    use crate::orchestrator::StatusSignal;
    use std::thread;
    use std::time::{Duration, Instant};

    #[test]
    fn test_commands_reach_peer() {
        let (client, peer) = ChannelOrchestrator::new(8);
        client.start_session().unwrap();
        client.send_message("hello").unwrap();
        client.send_action("submit_cart_for_order", &Map::new()).unwrap();

        assert_eq!(
            peer.drain_commands(),
            vec![
                OutboundCommand::StartSession,
                OutboundCommand::SendMessage("hello".to_string()),
                OutboundCommand::SendAction {
                    name: "submit_cart_for_order".to_string(),
                    params: Map::new(),
                },
            ]
        );
    }

    #[test]
    fn test_events_reach_client_in_order() {
        let (client, peer) = ChannelOrchestrator::new(8);
        peer.send_event(StatusSignal::AgentThinking(true)).unwrap();
        peer.send_event(ChatMessage::Agent("hi".to_string())).unwrap();

        let rx = client.event_receiver();
        assert_eq!(
            rx.try_recv().unwrap(),
            InboundEvent::Status(StatusSignal::AgentThinking(true))
        );
        assert_eq!(
            client.try_recv_event(),
            Some(InboundEvent::Chat(ChatMessage::Agent("hi".to_string())))
        );
        assert!(client.try_recv_event().is_none());
    }

    #[test]
    fn test_send_fails_after_peer_dropped() {
        let (client, peer) = ChannelOrchestrator::new(1);
        drop(peer);
        assert!(matches!(
            client.send_message("anyone?"),
            Err(VoiceboardError::Orchestrator(_))
        ));
    }

    #[test]
    fn test_full_queue_fails_without_blocking() {
        let (client, peer) = ChannelOrchestrator::new(1);
        client.start_session().unwrap();

        let started = Instant::now();
        let result = thread::spawn(move || client.send_message("second"))
            .join()
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(matches!(result, Err(VoiceboardError::Orchestrator(_))));

        // The queued command is still intact
        assert_eq!(peer.drain_commands(), vec![OutboundCommand::StartSession]);
    }

    #[test]
    fn test_recv_command_until_disconnect() {
        let (client, peer) = ChannelOrchestrator::new(1);
        client.start_session().unwrap();
        assert_eq!(peer.recv_command().unwrap(), OutboundCommand::StartSession);
        drop(client);
        assert!(peer.recv_command().is_err());
    }
}
