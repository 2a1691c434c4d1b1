use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// The Pub/Sub message carried inside an envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PubsubMessage {
    /// Base64-encoded UTF-8 JSON payload.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default, alias = "message_id")]
    pub message_id: Option<String>,
    #[serde(default, alias = "publish_time")]
    pub publish_time: Option<String>,
}

/// Transport envelope as delivered by the queue.
///
/// Push subscriptions wrap the message (`{"message": {...}, "subscription": ...}`)
/// while background-function triggers hand over the message itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InboundMessage {
    Push {
        message: PubsubMessage,
        #[serde(default)]
        subscription: Option<String>,
    },
    Bare(PubsubMessage),
}

impl InboundMessage {
    /// Build an envelope around an already-encoded payload.
    pub fn from_data(data: impl Into<String>) -> Self {
        Self::Bare(PubsubMessage {
            data: Some(data.into()),
            ..PubsubMessage::default()
        })
    }

    /// Build an envelope by base64-encoding a JSON payload.
    pub fn from_json(payload: &Value) -> Self {
        Self::from_data(BASE64.encode(payload.to_string()))
    }

    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::decode(format!("malformed envelope: {}", e)))
    }

    pub fn message(&self) -> &PubsubMessage {
        match self {
            Self::Push { message, .. } => message,
            Self::Bare(message) => message,
        }
    }

    pub fn message_id(&self) -> Option<&str> {
        self.message().message_id.as_deref()
    }

    /// Decode the payload into a JSON object.
    pub fn decode_payload(&self) -> Result<Map<String, Value>, DomainError> {
        let data = self
            .message()
            .data
            .as_deref()
            .ok_or_else(|| DomainError::decode("envelope carries no data field"))?;

        let bytes = BASE64
            .decode(data.trim())
            .map_err(|e| DomainError::decode(format!("payload is not valid base64: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| DomainError::decode(format!("payload is not valid UTF-8: {}", e)))?;

        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::decode(format!(
                "payload must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_push_envelope() {
        let raw = json!({
            "message": {
                "data": BASE64.encode(r#"{"whatsappId":"123"}"#),
                "messageId": "m-1",
                "attributes": {"source": "ingress"}
            },
            "subscription": "projects/p/subscriptions/s"
        })
        .to_string();

        let envelope = InboundMessage::parse(&raw).unwrap();
        assert_eq!(envelope.message_id(), Some("m-1"));
        assert_eq!(envelope.message().attributes["source"], "ingress");

        let payload = envelope.decode_payload().unwrap();
        assert_eq!(payload["whatsappId"], "123");
    }

    #[test]
    fn test_decode_bare_event() {
        let raw = json!({ "data": BASE64.encode(r#"{"email":"a@b.com"}"#) }).to_string();

        let envelope = InboundMessage::parse(&raw).unwrap();
        assert!(matches!(envelope, InboundMessage::Bare(_)));
        assert_eq!(envelope.decode_payload().unwrap()["email"], "a@b.com");
    }

    #[test]
    fn test_invalid_base64_is_decode_error() {
        let err = InboundMessage::from_data("%%%not-base64%%%")
            .decode_payload()
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_non_json_payload_is_decode_error() {
        let err = InboundMessage::from_data(BASE64.encode("plain text"))
            .decode_payload()
            .unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_json_array_payload_is_rejected() {
        let err = InboundMessage::from_json(&json!([1, 2, 3]))
            .decode_payload()
            .unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_missing_data_is_decode_error() {
        let envelope = InboundMessage::parse(r#"{"message": {"messageId": "m-2"}}"#).unwrap();
        assert!(envelope.decode_payload().unwrap_err().is_decode());
    }
}
