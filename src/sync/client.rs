//! Synchronization controller for the skill map.
//!
//! Owns the client-side store, the latest diagnosis, and the rotating
//! anti-forgery token, and reconciles them with server-confirmed state.
//! Each operation issues exactly one network attempt; there is no queueing,
//! no retry, and no optimistic mutation. Failures are surfaced through the
//! message collaborator and returned as errors, and a failed call never
//! touches store, diagnosis, or token.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, SkillMapError};
use crate::graph::{Diagnosis, Skill, SkillStore};
use crate::locations::{LocationIndex, LocationRecord};
use crate::output::{MessageSurface, TracingMessages};
use crate::sync::envelope::{self, Envelope};

/// Protocol version tag sent in every mutation payload.
pub const SKILL_API_VERSION: &str = "1";

const LOAD_TRANSPORT_MSG: &str = "Can't load the skill map.";
const LOAD_REJECTED_MSG: &str = "Unable to load skill map. Reload page and try again.";
const SAVE_TRANSPORT_MSG: &str = "Can't save the skill.";
const SAVE_REJECTED_FALLBACK: &str = "Unable to save the skill.";
const DELETE_TRANSPORT_MSG: &str = "Can't delete the skill.";
const DELETE_REJECTED_FALLBACK: &str = "Unable to delete the skill.";

/// Client-side input to a create-or-update operation.
///
/// Location keys are resolved into denormalized records through the location
/// index when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub prerequisite_ids: Vec<String>,
    pub location_keys: Vec<String>,
}

impl SkillDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            prerequisite_ids: Vec::new(),
            location_keys: Vec::new(),
        }
    }

    /// Target an existing skill instead of creating a new one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_prerequisites(mut self, prerequisite_ids: Vec<String>) -> Self {
        self.prerequisite_ids = prerequisite_ids;
        self
    }

    #[must_use]
    pub fn with_locations(mut self, location_keys: Vec<String>) -> Self {
        self.location_keys = location_keys;
        self
    }
}

/// Outcome of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server confirmed the removal.
    Deleted,
    /// The id did not resolve in the store; no request was issued.
    UnknownId,
}

#[derive(Debug, Serialize)]
struct SkillPayload<'a> {
    version: &'static str,
    name: &'a str,
    description: &'a str,
    prerequisites: &'a [String],
    locations: Vec<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct SkillMapPayload {
    #[serde(default)]
    skill_list: Vec<Skill>,
    #[serde(default)]
    diagnosis: Diagnosis,
}

#[derive(Debug, Deserialize)]
struct SavedSkillPayload {
    #[serde(default)]
    key: Option<String>,
    skill: Skill,
    #[serde(default)]
    skill_list: Vec<Skill>,
    #[serde(default)]
    diagnosis: Diagnosis,
}

/// Controller issuing load/create/update/delete against the remote
/// authority.
pub struct SkillSyncClient {
    config: ServiceConfig,
    http: reqwest::blocking::Client,
    store: SkillStore,
    diagnosis: Diagnosis,
    xsrf_token: Option<String>,
    messages: Box<dyn MessageSurface>,
}

impl SkillSyncClient {
    /// Create a client that reports messages through the tracing subscriber.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        Self::with_messages(config, Box::new(TracingMessages))
    }

    /// Create a client with a caller-supplied message surface.
    pub fn with_messages(
        config: ServiceConfig,
        messages: Box<dyn MessageSurface>,
    ) -> Result<Self> {
        config.validate()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SkillMapError::Config(format!("HTTP client error: {e}")))?;

        Ok(Self {
            config,
            http,
            store: SkillStore::new(),
            diagnosis: Diagnosis::default(),
            xsrf_token: None,
            messages,
        })
    }

    /// The authoritative client-side skill store. Read-only for callers;
    /// mutations happen only through confirmed responses.
    #[must_use]
    pub const fn store(&self) -> &SkillStore {
        &self.store
    }

    /// The last server-reported graph-health diagnosis.
    #[must_use]
    pub const fn diagnosis(&self) -> &Diagnosis {
        &self.diagnosis
    }

    /// The most recently received anti-forgery token.
    #[must_use]
    pub fn xsrf_token(&self) -> Option<&str> {
        self.xsrf_token.as_deref()
    }

    /// Load the full skill map, replacing store and diagnosis wholesale.
    pub fn load(&mut self) -> Result<()> {
        let url = self.config.skill_url();
        debug!(url = %url, "loading skill map");

        let request = envelope::encode_request(self.xsrf_token.as_deref(), &EMPTY_BODY)?;
        let raw = self.dispatch(
            self.http.get(&url).query(&[("request", request.as_str())]),
            LOAD_TRANSPORT_MSG,
        )?;
        let envelope = self.decode_or_report(&raw, LOAD_TRANSPORT_MSG)?;

        if !envelope.is_ok() {
            warn!(status = envelope.status, "skill map load rejected");
            self.messages.show_error(LOAD_REJECTED_MSG);
            return Err(SkillMapError::Rejected {
                status: envelope.status,
                message: LOAD_REJECTED_MSG.to_string(),
            });
        }

        let payload: SkillMapPayload = self.payload_or_report(&envelope, LOAD_TRANSPORT_MSG)?;
        self.xsrf_token = envelope.xsrf_token;
        self.store.replace_all(payload.skill_list);
        self.diagnosis = payload.diagnosis;

        info!(skills = self.store.len(), "skill map loaded");
        Ok(())
    }

    /// Create a new skill or update an existing one.
    ///
    /// Returns the server-confirmed skill (with its assigned id on
    /// creation). The confirmed skill is upserted into the store and the
    /// diagnosis replaced; the rest of the confirmation's skill list is not
    /// merged.
    pub fn create_or_update_skill(
        &mut self,
        draft: &SkillDraft,
        locations: &dyn LocationIndex,
    ) -> Result<Skill> {
        let resolved = self.validate_draft(draft, locations)?;

        let payload = SkillPayload {
            version: SKILL_API_VERSION,
            name: &draft.name,
            description: &draft.description,
            prerequisites: &draft.prerequisite_ids,
            locations: resolved,
        };
        let request = envelope::encode_keyed_request(
            self.xsrf_token.as_deref(),
            draft.id.as_deref(),
            &payload,
        )?;

        let url = self.config.skill_url();
        info!(url = %url, skill_id = ?draft.id, name = %draft.name, "saving skill");

        let raw = self.dispatch(
            self.http.put(&url).query(&[("request", request.as_str())]),
            SAVE_TRANSPORT_MSG,
        )?;
        let envelope = self.decode_or_report(&raw, SAVE_TRANSPORT_MSG)?;

        if !envelope.is_ok() {
            return Err(self.reject(&envelope, SAVE_REJECTED_FALLBACK));
        }

        let payload: SavedSkillPayload = self.payload_or_report(&envelope, SAVE_TRANSPORT_MSG)?;
        debug!(
            key = ?payload.key,
            skills = payload.skill_list.len(),
            "skill save confirmed"
        );

        self.xsrf_token = envelope.xsrf_token;
        self.store.upsert(payload.skill.clone());
        self.diagnosis = payload.diagnosis;
        self.messages.show_transient_notice("Saved.");

        Ok(payload.skill)
    }

    /// Delete a skill by id.
    ///
    /// An id that does not resolve in the store is a defined no-op: the call
    /// returns [`DeleteOutcome::UnknownId`] without issuing any request. On
    /// confirmation the store and diagnosis are replaced wholesale from the
    /// response payload.
    pub fn delete_skill(&mut self, id: &str) -> Result<DeleteOutcome> {
        if !self.store.contains(id) {
            debug!(skill_id = %id, "delete of unknown skill id, no request issued");
            return Ok(DeleteOutcome::UnknownId);
        }

        let token = self.xsrf_token.as_deref().unwrap_or("");
        let url = format!(
            "{}?xsrf_token={}&key={}",
            self.config.skill_url(),
            urlencoding::encode(token),
            urlencoding::encode(id),
        );
        info!(skill_id = %id, "deleting skill");

        let raw = self.dispatch(self.http.delete(&url), DELETE_TRANSPORT_MSG)?;
        let envelope = self.decode_or_report(&raw, DELETE_TRANSPORT_MSG)?;

        if !envelope.is_ok() {
            return Err(self.reject(&envelope, DELETE_REJECTED_FALLBACK));
        }

        let payload: SkillMapPayload = self.payload_or_report(&envelope, DELETE_TRANSPORT_MSG)?;
        self.xsrf_token = envelope.xsrf_token;
        self.store.replace_all(payload.skill_list);
        self.diagnosis = payload.diagnosis;
        self.messages.show_transient_notice("Deleted.");

        Ok(DeleteOutcome::Deleted)
    }

    /// Check the draft against the store invariants and resolve its location
    /// keys. Any failure here is local: no request is issued.
    fn validate_draft(
        &self,
        draft: &SkillDraft,
        locations: &dyn LocationIndex,
    ) -> Result<Vec<LocationRecord>> {
        if draft.name.trim().is_empty() {
            return Err(self.invalid("The skill name can't be empty."));
        }
        for prerequisite in &draft.prerequisite_ids {
            if draft.id.as_deref() == Some(prerequisite.as_str()) {
                return Err(self.invalid("A skill can't be its own prerequisite."));
            }
            if !self.store.contains(prerequisite) {
                return Err(self.invalid(&format!("Unknown prerequisite skill: {prerequisite}.")));
            }
        }

        let mut resolved = Vec::with_capacity(draft.location_keys.len());
        for key in &draft.location_keys {
            match locations.get_by_key(key) {
                Some(record) => resolved.push(record.clone()),
                None => return Err(self.invalid(&format!("Unknown lesson location: {key}."))),
            }
        }
        Ok(resolved)
    }

    fn invalid(&self, text: &str) -> SkillMapError {
        warn!("{text}");
        self.messages.show_error(text);
        SkillMapError::InvalidSkill(text.to_string())
    }

    /// Issue the request and read the body; transport failures reach the
    /// message surface here.
    fn dispatch(
        &self,
        request: reqwest::blocking::RequestBuilder,
        failure_msg: &str,
    ) -> Result<String> {
        match request.send().and_then(|response| response.text()) {
            Ok(body) => Ok(body),
            Err(err) => {
                warn!(error = %err, "transport failure");
                self.messages.show_error(failure_msg);
                Err(SkillMapError::Transport(err))
            }
        }
    }

    fn decode_or_report(&self, raw: &str, failure_msg: &str) -> Result<Envelope> {
        match envelope::decode(raw) {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                warn!(error = %err, "malformed response envelope");
                self.messages.show_error(failure_msg);
                Err(err)
            }
        }
    }

    fn payload_or_report<T: serde::de::DeserializeOwned>(
        &self,
        envelope: &Envelope,
        failure_msg: &str,
    ) -> Result<T> {
        match envelope.decode_payload() {
            Ok(payload) => Ok(payload),
            Err(err) => {
                warn!(error = %err, "malformed response payload");
                self.messages.show_error(failure_msg);
                Err(err)
            }
        }
    }

    /// Surface a non-200 envelope: server message verbatim when present,
    /// generic fallback otherwise.
    fn reject(&self, envelope: &Envelope, fallback: &str) -> SkillMapError {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| fallback.to_string());
        warn!(status = envelope.status, message = %message, "request rejected");
        self.messages.show_error(&message);
        SkillMapError::Rejected {
            status: envelope.status,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmptyBody {}

const EMPTY_BODY: EmptyBody = EmptyBody {};
