use super::types::{ChatEvent, ChatMessage, EventKind};
use chrono::Utc;

/// Append-only, insertion-ordered chat history.
///
/// Events are never mutated or removed; a fresh session starts with a new log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<ChatEvent>,
    next_id: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return the stored event
    pub fn append(&mut self, message: ChatMessage) -> &ChatEvent {
        let event = ChatEvent {
            id: self.next_id,
            message,
            timestamp: Utc::now(),
        };
        self.next_id += 1;
        self.events.push(event);
        &self.events[self.events.len() - 1]
    }

    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    /// Most recent event of the given kind, scanning from the end
    pub fn latest_of(&self, kind: EventKind) -> Option<&ChatEvent> {
        self.events.iter().rev().find(|event| event.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::WidgetPayload;

    #[test]
    fn test_ids_are_monotonic() {
        let mut log = EventLog::new();
        let first = log.append(ChatMessage::User("hi".to_string())).id;
        let second = log.append(ChatMessage::Agent("hello".to_string())).id;
        assert!(second > first);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_latest_of_scans_from_end() {
        let mut log = EventLog::new();
        log.append(ChatMessage::Widget(WidgetPayload::new("[1]")));
        log.append(ChatMessage::Widget(WidgetPayload::new("[2]")));
        log.append(ChatMessage::Agent("done".to_string()));

        let latest = log.latest_of(EventKind::Widget).unwrap();
        assert_eq!(latest.message.as_widget().unwrap().details, "[2]");
        assert!(log.latest_of(EventKind::System).is_none());
    }
}
