use super::descriptor::WidgetDescriptor;
use crate::events::{ChatEvent, WidgetPayload};
use crate::{Result, VoiceboardError};
use serde_json::Value;
use tracing::{debug, warn};

/// Payload of the most recent `widget` event, if any
pub fn latest_widget_payload(events: &[ChatEvent]) -> Option<&WidgetPayload> {
    events
        .iter()
        .rev()
        .find_map(|event| event.message.as_widget())
}

/// Parse a widget payload's `details` string.
///
/// Malformed JSON is an error. Well-formed JSON that is not a list yields an
/// empty list, and list entries that are not descriptors are dropped.
pub fn parse_widget_details(details: &str) -> Result<Vec<WidgetDescriptor>> {
    let value: Value = serde_json::from_str(details)
        .map_err(|e| VoiceboardError::WidgetPayload(e.to_string()))?;

    let Value::Array(items) = value else {
        debug!("Widget details are not a list, nothing to render");
        return Ok(Vec::new());
    };

    let descriptors = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            serde_json::from_value::<WidgetDescriptor>(item)
                .map_err(|e| warn!("Dropping widget entry {}: {}", index, e))
                .ok()
        })
        .collect();

    Ok(descriptors)
}

/// Descriptors of the latest widget event, in rendering order.
///
/// Never fails: a missing widget event or an unparseable payload both
/// produce an empty list.
pub fn extract_latest_widget(events: &[ChatEvent]) -> Vec<WidgetDescriptor> {
    let Some(payload) = latest_widget_payload(events) else {
        return Vec::new();
    };

    match parse_widget_details(&payload.details) {
        Ok(descriptors) => descriptors,
        Err(e) => {
            warn!("Received invalid widget payload: {} ({:?})", e, payload.details);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ChatMessage, EventLog};

    fn log_with(messages: Vec<ChatMessage>) -> EventLog {
        let mut log = EventLog::new();
        for message in messages {
            log.append(message);
        }
        log
    }

    #[test]
    fn test_no_widget_event_is_empty() {
        let log = log_with(vec![
            ChatMessage::User("hi".to_string()),
            ChatMessage::Agent("hello".to_string()),
        ]);
        assert!(extract_latest_widget(log.events()).is_empty());
        assert!(extract_latest_widget(&[]).is_empty());
    }

    #[test]
    fn test_latest_widget_wins() {
        let log = log_with(vec![
            ChatMessage::Widget(WidgetPayload::new(r#"[{"type":"showStockNews","parameters":{"symbol":"TSLA"}}]"#)),
            ChatMessage::Widget(WidgetPayload::new(r#"[{"type":"showMarketHeatmap","parameters":{}}]"#)),
        ]);
        let descriptors = extract_latest_widget(log.events());
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].tag, "showMarketHeatmap");
    }

    #[test]
    fn test_trailing_non_widget_events_do_not_change_result() {
        let mut log = log_with(vec![ChatMessage::Widget(WidgetPayload::new(
            r#"[{"type":"showStockPrice","parameters":{"symbol":"NVDA"}}]"#,
        ))]);
        let before = extract_latest_widget(log.events());
        log.append(ChatMessage::Agent("Here is NVDA".to_string()));
        log.append(ChatMessage::System("audio-status".to_string()));
        assert_eq!(extract_latest_widget(log.events()), before);
    }

    #[test]
    fn test_malformed_details_yield_empty() {
        let log = log_with(vec![ChatMessage::Widget(WidgetPayload::new("not json"))]);
        assert!(extract_latest_widget(log.events()).is_empty());
        assert!(parse_widget_details("not json").is_err());
    }

    #[test]
    fn test_non_list_details_yield_empty() {
        assert!(parse_widget_details(r#"{"type":"showStockPrice"}"#).unwrap().is_empty());
        assert!(parse_widget_details("[]").unwrap().is_empty());
        assert!(parse_widget_details("42").unwrap().is_empty());
    }

    #[test]
    fn test_order_is_preserved_and_bad_entries_dropped() {
        let details = r#"[
            {"type":"showStockPrice","parameters":{"symbol":"AAPL"}},
            "garbage",
            {"type":"showInformation","parameters":{"title":"Market Cap","content":"$3.4T"}}
        ]"#;
        let descriptors = parse_widget_details(details).unwrap();
        let tags: Vec<&str> = descriptors.iter().map(|d| d.tag.as_str()).collect();
        assert_eq!(tags, vec!["showStockPrice", "showInformation"]);
    }

    #[test]
    fn test_spreadsheet_data_is_kept() {
        let details = r#"[{"type":"showSpreadsheet","parameters":{"symbol":"MSFT","metric":"revenues"},
            "data":[{"date":"2024-01-30","value":62020000000},{"date":"2024-04-25","value":61858000000}]}]"#;
        let descriptors = parse_widget_details(details).unwrap();
        assert_eq!(descriptors[0].data.as_ref().map(Vec::len), Some(2));
    }
}
