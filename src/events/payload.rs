//! # Event payloads.
//!
//! Payloads are opaque to the bus: they are handed to listeners and to the
//! bridge verbatim, never inspected or validated. [`Payload`] is a JSON value
//! so that any payload the local dispatch accepts is also representable on
//! the bridge wire (the structured-clone analog).

/// Opaque event payload passed through to listeners and the bridge.
pub type Payload = serde_json::Value;

/// Names the payload's shape for debug trace lines.
///
/// Debug mode reports presence and type only, never contents.
pub(crate) fn payload_type(payload: Option<&Payload>) -> &'static str {
    match payload {
        None => "none",
        Some(Payload::Null) => "null",
        Some(Payload::Bool(_)) => "bool",
        Some(Payload::Number(_)) => "number",
        Some(Payload::String(_)) => "string",
        Some(Payload::Array(_)) => "array",
        Some(Payload::Object(_)) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_type_names() {
        assert_eq!(payload_type(None), "none");
        assert_eq!(payload_type(Some(&json!(null))), "null");
        assert_eq!(payload_type(Some(&json!("hello"))), "string");
        assert_eq!(payload_type(Some(&json!({"volume": 3}))), "object");
    }
}
