//! Local stand-in for the remote orchestrator
//!
//! Echoes user messages, simulates the thinking/speaking lifecycle, turns a
//! message that is itself a JSON widget list into a widget event, and answers
//! cart actions. Used by the desktop binary when no transport is wired up.

use super::{InboundEvent, OrchestratorPeer, OutboundCommand, StatusSignal};
use crate::events::{ChatMessage, WidgetPayload};
use crate::Result;
use serde_json::json;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Events the loopback emits in reply to one command
pub fn respond(cmd: &OutboundCommand) -> Vec<InboundEvent> {
    match cmd {
        OutboundCommand::StartSession => vec![
            ChatMessage::System("session-started".to_string()).into(),
            ChatMessage::Agent("Hi! Ask me about a stock or paste a widget list.".to_string())
                .into(),
        ],
        OutboundCommand::SendMessage(text) => {
            let mut events: Vec<InboundEvent> = vec![
                ChatMessage::User(text.clone()).into(),
                StatusSignal::AgentThinking(true).into(),
            ];
            let trimmed = text.trim_start();
            if trimmed.starts_with('[') {
                events.push(ChatMessage::Widget(WidgetPayload::new(text.clone())).into());
                events.push(ChatMessage::Agent("Here is what you asked for.".to_string()).into());
            } else if trimmed.starts_with('{') {
                // Raw wire event, replayed as if the orchestrator sent it
                match ChatMessage::from_json(text) {
                    Ok(message) => events.push(message.into()),
                    Err(e) => {
                        warn!("Loopback could not decode event: {}", e);
                        events.push(ChatMessage::Agent(format!("Could not decode: {}", e)).into());
                    }
                }
            } else {
                events.push(ChatMessage::Agent(format!("You said: {}", text)).into());
            }
            events.push(StatusSignal::AgentSpeaking(true).into());
            events.push(StatusSignal::AudioPlaying(true).into());
            events.push(StatusSignal::AudioPlaying(false).into());
            events.push(StatusSignal::AgentSpeaking(false).into());
            events
        }
        OutboundCommand::SendAction { name, params } => {
            if name == "submit_cart_for_order" {
                let confirmation = json!({
                    "order_id": "LOCAL-1",
                    "items": [],
                    "total": 0.0,
                    "message": "Thanks! Your order has been placed."
                });
                vec![ChatMessage::Widget(WidgetPayload::order_confirmation(
                    confirmation.to_string(),
                ))
                .into()]
            } else {
                let info = json!([{
                    "type": "showInformation",
                    "parameters": {
                        "title": name,
                        "content": serde_json::Value::Object(params.clone()).to_string()
                    }
                }]);
                vec![
                    ChatMessage::Widget(WidgetPayload::new(info.to_string())).into(),
                    ChatMessage::Agent(format!("Done: {}", name)).into(),
                ]
            }
        }
    }
}

/// Serve `peer` on a background thread until the client disconnects
pub fn spawn(peer: OrchestratorPeer) -> Result<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("loopback-orchestrator".to_string())
        .spawn(move || {
            info!("Loopback orchestrator started");
            while let Ok(cmd) = peer.recv_command() {
                debug!("Loopback received {:?}", cmd);
                for event in respond(&cmd) {
                    if peer.send_event(event).is_err() {
                        return;
                    }
                }
            }
            info!("Loopback orchestrator stopped");
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::{ChannelOrchestrator, OrchestratorClient};
    use serde_json::Map;
    use std::time::Duration;

    #[test]
    fn test_widget_list_message_becomes_widget_event() {
        let events = respond(&OutboundCommand::SendMessage(
            r#"[{"type":"showMarketOverview","parameters":{}}]"#.to_string(),
        ));
        assert!(events
            .iter()
            .any(|e| matches!(e, InboundEvent::Chat(ChatMessage::Widget(_)))));
    }

    #[test]
    fn test_wire_event_message_is_replayed() {
        let raw = r#"{"type":"widget","message":{"type":"order-confirmation","details":"{\"order_id\":7,\"total\":1.0}"}}"#;
        let events = respond(&OutboundCommand::SendMessage(raw.to_string()));
        match &events[2] {
            InboundEvent::Chat(ChatMessage::Widget(payload)) => {
                assert!(payload.is_order_confirmation());
            }
            other => panic!("unexpected event {:?}", other),
        }

        let events = respond(&OutboundCommand::SendMessage("{broken".to_string()));
        assert!(matches!(
            &events[2],
            InboundEvent::Chat(ChatMessage::Agent(text)) if text.starts_with("Could not decode")
        ));
    }

    #[test]
    fn test_submit_yields_confirmation() {
        let events = respond(&OutboundCommand::SendAction {
            name: "submit_cart_for_order".to_string(),
            params: Map::new(),
        });
        match &events[0] {
            InboundEvent::Chat(ChatMessage::Widget(payload)) => {
                assert!(payload.is_order_confirmation())
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_spawned_loopback_replies() {
        let (client, peer) = ChannelOrchestrator::new(32);
        let handle = spawn(peer).unwrap();
        client.start_session().unwrap();

        let rx = client.event_receiver();
        let first = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(
            first,
            InboundEvent::Chat(ChatMessage::System("session-started".to_string()))
        );

        drop(rx);
        drop(client);
        handle.join().unwrap();
    }
}
