use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Event carrying the identifier payload.
pub const EVENT_IDS: &str = "$AndroidIds";

/// Event carrying the device-detail payload.
pub const EVENT_DEVICE_INFO: &str = "$AndroidDeviceInfo";

/// One named analytics event with a flat string payload.
///
/// Payloads never contain empty-for-missing placeholders: a property that
/// could not be read is simply absent, so the map is safe to serialize
/// without further null handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    #[serde(default)]
    pub payload: HashMap<String, String>,
}

impl Event {
    pub fn new(name: impl Into<String>, payload: HashMap<String, String>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Consumer of collected events.
///
/// Fire and forget: implementations must not block the caller for long and
/// are responsible for their own durability and retries.
pub trait EventSink: Send + Sync {
    fn log_event(&self, name: &str, payload: HashMap<String, String>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_roundtrip() {
        let mut payload = HashMap::new();
        payload.insert("build_brand".to_string(), "google".to_string());
        payload.insert("display_density".to_string(), "2.625".to_string());

        let event = Event::new(EVENT_DEVICE_INFO, payload);
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
        assert_eq!(parsed.name, "$AndroidDeviceInfo");
    }

    #[test]
    fn event_missing_payload_defaults_empty() {
        let parsed: Event = serde_json::from_str(r#"{"name":"$AndroidIds"}"#).unwrap();
        assert_eq!(parsed.name, EVENT_IDS);
        assert!(parsed.payload.is_empty());
    }
}
