//! Result types returned by the memory client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to a memory during `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MemoryEventKind {
    Add,
}

/// One memory written by `add`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEvent {
    pub id: String,
    pub memory: String,
    pub event: MemoryEventKind,
}

/// Result of `Memory::add`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddResult {
    pub results: Vec<MemoryEvent>,
}

/// One memory returned by `search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryItem {
    pub id: String,
    /// Memory text, when the payload carries one.
    pub memory: Option<String>,
    /// Relevance to the query (cosine similarity, higher is better).
    pub score: Option<f64>,
    /// Stored metadata: `data`, `user_id`, `created_at`, `hash`.
    pub payload: Value,
}

impl MemoryItem {
    /// Text to display: `memory`, falling back to `payload.data`.
    pub fn display_text(&self) -> Option<&str> {
        self.memory
            .as_deref()
            .filter(|m| !m.is_empty())
            .or_else(|| self.payload.get("data").and_then(Value::as_str))
    }
}

/// Result of `Memory::search`, ordered most relevant first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub results: Vec<MemoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_serializes_uppercase() {
        let event = MemoryEvent {
            id: "id-1".into(),
            memory: "Name is Alice".into(),
            event: MemoryEventKind::Add,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"ADD\""));
    }

    #[test]
    fn test_display_text_falls_back_to_payload_data() {
        let item = MemoryItem {
            id: "id-1".into(),
            memory: None,
            score: Some(0.5),
            payload: json!({"data": "Is building a SaaS startup"}),
        };
        assert_eq!(item.display_text(), Some("Is building a SaaS startup"));

        let item = MemoryItem {
            memory: Some("Name is Alice".into()),
            ..item
        };
        assert_eq!(item.display_text(), Some("Name is Alice"));
    }

    #[test]
    fn test_display_text_missing_everywhere() {
        let item = MemoryItem {
            id: "id-1".into(),
            memory: None,
            score: None,
            payload: json!({}),
        };
        assert_eq!(item.display_text(), None);
    }
}
