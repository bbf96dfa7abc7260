//! Two-layer JSON envelope shared with the remote authority.
//!
//! Every response body starts with a fixed anti-sniffing prefix that must be
//! stripped before parsing. The envelope's `payload` is itself a JSON-encoded
//! string and needs a second decode; outgoing requests mirror the same
//! string-within-a-string shape. That double encoding is a boundary contract
//! and is preserved bit-for-bit.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillMapError};

/// Anti-sniffing prefix. Must be kept in sync with the server's transforms.
pub const XSSI_PREFIX: &str = ")]}'";

/// Decoded response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(default)]
    pub xsrf_token: Option<String>,
    #[serde(default)]
    pub payload: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Second decode: parse the payload string into an operation-specific
    /// shape.
    pub fn decode_payload<T: DeserializeOwned>(&self) -> Result<T> {
        let raw = self.payload.as_deref().ok_or_else(|| {
            SkillMapError::MalformedEnvelope("envelope has no payload".to_string())
        })?;
        serde_json::from_str(raw)
            .map_err(|err| SkillMapError::MalformedEnvelope(format!("payload: {err}")))
    }
}

/// Strip the anti-sniffing prefix if present and parse the envelope.
pub fn decode(raw: &str) -> Result<Envelope> {
    let body = raw.strip_prefix(XSSI_PREFIX).unwrap_or(raw);
    serde_json::from_str(body).map_err(|err| SkillMapError::MalformedEnvelope(err.to_string()))
}

#[derive(Debug, Serialize)]
struct RequestEnvelope<'a> {
    xsrf_token: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<&'a str>,
    payload: String,
}

/// Build the outgoing request envelope: the payload serialized once, wrapped
/// with the session token, serialized once more.
pub fn encode_request<T: Serialize>(token: Option<&str>, payload: &T) -> Result<String> {
    encode_keyed_request(token, None, payload)
}

/// As [`encode_request`], with the target resource key alongside the token.
pub fn encode_keyed_request<T: Serialize>(
    token: Option<&str>,
    key: Option<&str>,
    payload: &T,
) -> Result<String> {
    let payload = serde_json::to_string(payload)?;
    Ok(serde_json::to_string(&RequestEnvelope {
        xsrf_token: token,
        key,
        payload,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_strips_prefix() {
        let envelope = decode(")]}'{\"status\": 200, \"xsrf_token\": \"tok\"}").unwrap();
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.xsrf_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_decode_without_prefix() {
        let envelope = decode("{\"status\": 400}").unwrap();
        assert_eq!(envelope.status, 400);
        assert!(envelope.xsrf_token.is_none());
        assert!(envelope.payload.is_none());
        assert!(envelope.message.is_none());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode(")]}'<html>error</html>").unwrap_err();
        assert!(matches!(err, SkillMapError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_payload_second_decode() {
        let body = json!({
            "status": 200,
            "xsrf_token": "tok",
            "payload": "{\"skill_list\": []}"
        })
        .to_string();
        let envelope = decode(&body).unwrap();
        let payload: serde_json::Value = envelope.decode_payload().unwrap();
        assert!(payload["skill_list"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_decode_payload_missing() {
        let envelope = decode("{\"status\": 200}").unwrap();
        let err = envelope.decode_payload::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, SkillMapError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_decode_payload_not_json() {
        let body = json!({"status": 200, "payload": "not json"}).to_string();
        let envelope = decode(&body).unwrap();
        let err = envelope.decode_payload::<serde_json::Value>().unwrap_err();
        assert!(matches!(err, SkillMapError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_encode_request_double_encodes_payload() {
        let encoded = encode_request(Some("tok"), &json!({"version": "1"})).unwrap();
        assert_eq!(encoded, r#"{"xsrf_token":"tok","payload":"{\"version\":\"1\"}"}"#);
    }

    #[test]
    fn test_encode_request_without_token_serializes_null() {
        let encoded = encode_request(None, &json!({})).unwrap();
        assert_eq!(encoded, r#"{"xsrf_token":null,"payload":"{}"}"#);
    }

    #[test]
    fn test_encode_keyed_request_carries_key() {
        let encoded = encode_keyed_request(Some("tok"), Some("s111"), &json!({})).unwrap();
        assert_eq!(encoded, r#"{"xsrf_token":"tok","key":"s111","payload":"{}"}"#);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let payload = json!({"name": "ice skating", "prerequisites": ["s111"]});
        let request = encode_request(Some("tok"), &payload).unwrap();

        // The server echoes the same two-layer shape back.
        let outer: serde_json::Value = serde_json::from_str(&request).unwrap();
        let inner: serde_json::Value =
            serde_json::from_str(outer["payload"].as_str().unwrap()).unwrap();
        assert_eq!(inner, payload);
    }
}
