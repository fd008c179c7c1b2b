//! # Bridge wire envelope.
//!
//! Events cross contexts as `{ "eventKind": <string>, "payload": ... }`
//! frames. [`BridgeMessage::verify`] is the single validation point for
//! inbound traffic: anything whose `eventKind` is missing or not a string is
//! rejected, and the caller drops it silently. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::events::{EventKind, Payload};

/// One event serialized for the cross-context channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeMessage {
    /// The event category, always a string token on the wire.
    pub event_kind: String,

    /// Opaque payload, forwarded verbatim. Omitted when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl BridgeMessage {
    /// Wraps a local event into a wire envelope.
    pub fn new(kind: &EventKind, payload: Option<&Payload>) -> Self {
        Self {
            event_kind: kind.as_str().to_string(),
            payload: payload.cloned(),
        }
    }

    /// Validates an inbound frame.
    ///
    /// Returns `None` for anything that is not an envelope with a string
    /// `eventKind`; the caller drops such frames without error.
    pub fn verify(frame: Value) -> Option<Self> {
        serde_json::from_value(frame).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_uses_camel_case_on_the_wire() {
        let msg = BridgeMessage::new(&"volume-change".into(), Some(&json!(3)));
        let frame = serde_json::to_value(&msg).unwrap();
        assert_eq!(frame, json!({ "eventKind": "volume-change", "payload": 3 }));
    }

    #[test]
    fn test_payload_is_omitted_when_absent() {
        let msg = BridgeMessage::new(&"ping".into(), None);
        let frame = serde_json::to_value(&msg).unwrap();
        assert_eq!(frame, json!({ "eventKind": "ping" }));
    }

    #[test]
    fn test_verify_accepts_valid_frames() {
        let msg = BridgeMessage::verify(json!({ "eventKind": "a", "payload": "x" })).unwrap();
        assert_eq!(msg.event_kind, "a");
        assert_eq!(msg.payload, Some(json!("x")));
    }

    #[test]
    fn test_verify_rejects_non_string_kind() {
        assert!(BridgeMessage::verify(json!({ "eventKind": 42 })).is_none());
        assert!(BridgeMessage::verify(json!({ "eventKind": null })).is_none());
        assert!(BridgeMessage::verify(json!({ "payload": "x" })).is_none());
        assert!(BridgeMessage::verify(json!("not an envelope")).is_none());
        assert!(BridgeMessage::verify(json!(null)).is_none());
    }

    #[test]
    fn test_verify_ignores_unknown_fields() {
        let msg = BridgeMessage::verify(json!({ "eventKind": "a", "extra": true })).unwrap();
        assert_eq!(msg.event_kind, "a");
        assert_eq!(msg.payload, None);
    }
}
