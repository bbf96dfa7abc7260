//! Shared test utilities for skillmap.

pub mod fixtures;
pub mod messages;

pub use fixtures::{
    diagnosis_json, location_fixture, response_body, skill_fixture, skill_json, skill_with_prereqs,
};
pub use messages::RecordingMessages;
