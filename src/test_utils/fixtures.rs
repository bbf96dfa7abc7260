//! Canned skills, locations, and response bodies.

use serde_json::{Value, json};

use crate::graph::Skill;
use crate::locations::LocationRecord;
use crate::sync::envelope::XSSI_PREFIX;

/// A skill with no prerequisites or locations.
#[must_use]
pub fn skill_fixture(id: &str, name: &str) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        prerequisite_ids: Vec::new(),
        locations: Vec::new(),
    }
}

/// A skill with the given prerequisite ids.
#[must_use]
pub fn skill_with_prereqs(id: &str, name: &str, prerequisite_ids: &[&str]) -> Skill {
    Skill {
        prerequisite_ids: prerequisite_ids.iter().map(ToString::to_string).collect(),
        ..skill_fixture(id, name)
    }
}

/// The lesson-location record used across the suite.
#[must_use]
pub fn location_fixture() -> LocationRecord {
    LocationRecord {
        key: "loc-1".to_string(),
        label: "1.1".to_string(),
        href: "/unit?lesson=1".to_string(),
        edit_href: "/edit?lesson=1".to_string(),
        lesson: "Lesson 1".to_string(),
        unit: "Unit 1".to_string(),
        sort_key: 0,
    }
}

/// Wire-shape JSON for a skill.
#[must_use]
pub fn skill_json(id: &str, name: &str, description: &str, prerequisite_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": description,
        "prerequisite_ids": prerequisite_ids,
    })
}

/// An empty, healthy diagnosis object.
#[must_use]
pub fn diagnosis_json() -> Value {
    json!({
        "cycles": [],
        "singletons": [],
        "long_chains": [],
    })
}

/// Build a full response body: XSSI prefix, envelope, and the payload
/// JSON-encoded a second time, exactly as the authority serializes it.
#[must_use]
pub fn response_body(
    status: u16,
    token: Option<&str>,
    payload: Option<&Value>,
    message: Option<&str>,
) -> String {
    let mut envelope = json!({ "status": status });
    if let Some(token) = token {
        envelope["xsrf_token"] = json!(token);
    }
    if let Some(payload) = payload {
        envelope["payload"] = json!(payload.to_string());
    }
    if let Some(message) = message {
        envelope["message"] = json!(message);
    }
    format!("{XSSI_PREFIX}{envelope}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::envelope;

    #[test]
    fn test_response_body_round_trips_through_the_codec() {
        let payload = json!({ "skill_list": [skill_json("s111", "rock climbing", "", &[])] });
        let body = response_body(200, Some("tok"), Some(&payload), Some("OK"));

        let decoded = envelope::decode(&body).unwrap();
        assert_eq!(decoded.status, 200);
        assert_eq!(decoded.xsrf_token.as_deref(), Some("tok"));
        assert_eq!(decoded.message.as_deref(), Some("OK"));

        let inner: Value = decoded.decode_payload().unwrap();
        assert_eq!(inner, payload);
    }

    #[test]
    fn test_response_body_omits_absent_fields() {
        let body = response_body(400, None, None, None);
        let decoded = envelope::decode(&body).unwrap();
        assert_eq!(decoded.status, 400);
        assert!(decoded.xsrf_token.is_none());
        assert!(decoded.payload.is_none());
        assert!(decoded.message.is_none());
    }

    #[test]
    fn test_skill_with_prereqs() {
        let skill = skill_with_prereqs("s333", "alpinism", &["s111", "s222"]);
        assert_eq!(skill.prerequisite_ids, vec!["s111", "s222"]);
        assert_eq!(skill.name, "alpinism");
    }
}
