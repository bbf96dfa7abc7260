//! Property tests for the envelope codec round trip.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use skillmap::sync::envelope;
use skillmap::test_utils::response_body;

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[ -~]{0,32}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        prop::collection::vec("[a-z0-9]{1,12}", 0..4)
            .prop_map(|items| json!(items)),
    ]
}

fn payload_object() -> impl Strategy<Value = Value> {
    prop::collection::btree_map("[a-z_]{1,12}", json_leaf(), 0..6)
        .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<String, Value>>()))
}

proptest! {
    /// Encoding a payload object and reading it back out of the request
    /// envelope yields an equivalent object, with the token alongside.
    #[test]
    fn encode_request_round_trips(
        token in "[A-Za-z0-9_-]{1,24}",
        payload in payload_object(),
    ) {
        let request = envelope::encode_request(Some(&token), &payload).unwrap();

        let outer: Value = serde_json::from_str(&request).unwrap();
        prop_assert_eq!(outer["xsrf_token"].as_str(), Some(token.as_str()));

        let inner: Value = serde_json::from_str(outer["payload"].as_str().unwrap()).unwrap();
        prop_assert_eq!(inner, payload);
    }

    /// A payload pushed through the full response shape (XSSI prefix,
    /// envelope, double-encoded payload) decodes back to itself.
    #[test]
    fn response_decode_round_trips(
        token in "[A-Za-z0-9_-]{1,24}",
        payload in payload_object(),
    ) {
        let body = response_body(200, Some(&token), Some(&payload), None);

        let decoded = envelope::decode(&body).unwrap();
        prop_assert!(decoded.is_ok());
        prop_assert_eq!(decoded.xsrf_token.as_deref(), Some(token.as_str()));

        let inner: Value = decoded.decode_payload().unwrap();
        prop_assert_eq!(inner, payload);
    }

    /// Decoding never panics on arbitrary input; it either parses or fails
    /// with a malformed-envelope error.
    #[test]
    fn decode_is_total(raw in "[ -~]{0,64}") {
        let _ = envelope::decode(&raw);
    }
}
