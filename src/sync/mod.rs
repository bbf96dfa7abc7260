//! Synchronization against the skill-map remote authority.

pub mod client;
pub mod envelope;

pub use client::{DeleteOutcome, SKILL_API_VERSION, SkillDraft, SkillSyncClient};
pub use envelope::{Envelope, XSSI_PREFIX};
