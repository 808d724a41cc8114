use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::SessionId;

/// Classification of a wire `event_type` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Click,
    MouseMove,
    Scroll,
    Custom,
    /// Any non-empty value the pipeline has no dedicated handling for.
    /// Accepted and folded into session state, never an error.
    Other,
}

impl EventKind {
    /// Classify a raw event type. The empty string is the one invalid
    /// value and returns `None`.
    pub fn classify(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            "click" => Some(Self::Click),
            "mousemove" => Some(Self::MouseMove),
            "scroll" => Some(Self::Scroll),
            "custom" => Some(Self::Custom),
            _ => Some(Self::Other),
        }
    }
}

/// A value in the open custom-attribute map.
///
/// Variant order matters for untagged deserialization: strings, numbers,
/// booleans, then null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomValue {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl CustomValue {
    /// Render the value as a telemetry attribute. Strings pass through,
    /// numbers and booleans are stringified, nulls carry no value.
    pub fn render(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }
}

/// One discrete interaction occurrence submitted for ingestion.
///
/// Caller-supplied and never mutated after creation, apart from the
/// ingestion-time timestamp default. Carries no identity beyond
/// `session_id` plus `timestamp`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionEvent {
    pub event_type: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub cursor_x: i32,
    pub cursor_y: i32,
    pub viewport_x: i32,
    pub viewport_y: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub element_id: String,
    pub element_type: String,
    pub element_text: String,
    pub page_url: String,
    pub user_agent: String,
    pub session_id: SessionId,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, CustomValue>,
}

impl InteractionEvent {
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::classify(&self.event_type)
    }

    pub fn is_click(&self) -> bool {
        self.event_type == "click"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_known_types() {
        assert_eq!(EventKind::classify("click"), Some(EventKind::Click));
        assert_eq!(EventKind::classify("mousemove"), Some(EventKind::MouseMove));
        assert_eq!(EventKind::classify("scroll"), Some(EventKind::Scroll));
        assert_eq!(EventKind::classify("custom"), Some(EventKind::Custom));
    }

    #[test]
    fn classify_unknown_is_other_not_invalid() {
        assert_eq!(EventKind::classify("hover"), Some(EventKind::Other));
        assert_eq!(EventKind::classify("dblclick"), Some(EventKind::Other));
    }

    #[test]
    fn classify_empty_is_invalid() {
        assert_eq!(EventKind::classify(""), None);
    }

    #[test]
    fn custom_value_rendering_policy() {
        assert_eq!(
            CustomValue::String("alpha".into()).render(),
            Some("alpha".into())
        );
        assert_eq!(CustomValue::Number(3.5).render(), Some("3.5".into()));
        assert_eq!(CustomValue::Number(7.0).render(), Some("7".into()));
        assert_eq!(CustomValue::Bool(true).render(), Some("true".into()));
        assert_eq!(CustomValue::Null.render(), None);
    }

    #[test]
    fn custom_value_untagged_deserialization() {
        let map: HashMap<String, CustomValue> = serde_json::from_str(
            r#"{"label":"zone-1","weight":2.5,"active":true,"note":null}"#,
        )
        .unwrap();
        assert_eq!(map["label"], CustomValue::String("zone-1".into()));
        assert_eq!(map["weight"], CustomValue::Number(2.5));
        assert_eq!(map["active"], CustomValue::Bool(true));
        assert_eq!(map["note"], CustomValue::Null);
    }

    #[test]
    fn event_deserializes_from_sparse_wire_json() {
        let event: InteractionEvent = serde_json::from_str(
            r#"{"event_type":"click","cursor_x":10,"cursor_y":20,"session_id":"s1"}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, "click");
        assert_eq!(event.cursor_x, 10);
        assert_eq!(event.cursor_y, 20);
        assert_eq!(event.session_id.as_str(), "s1");
        assert!(event.timestamp.is_none());
        assert!(event.element_id.is_empty());
        assert!(event.custom.is_empty());
    }

    #[test]
    fn event_without_type_deserializes_then_fails_classification() {
        let event: InteractionEvent =
            serde_json::from_str(r#"{"session_id":"s1"}"#).unwrap();
        assert!(event.kind().is_none());
    }

    #[test]
    fn event_serde_roundtrip_with_custom_map() {
        let mut event = InteractionEvent {
            event_type: "custom".into(),
            session_id: SessionId::from_raw("s1"),
            ..Default::default()
        };
        event
            .custom
            .insert("step".into(), CustomValue::Number(4.0));

        let json = serde_json::to_string(&event).unwrap();
        let parsed: InteractionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.event_type, "custom");
        assert_eq!(parsed.custom["step"], CustomValue::Number(4.0));
    }
}
