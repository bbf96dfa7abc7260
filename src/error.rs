//! Error handling for skillmap.
//!
//! This module provides:
//! - [`SkillMapError`]: The main error enum for all skill-map operations
//! - [`Result`]: Crate-wide result alias
//!
//! Every failure is terminal for the triggering call: the caller must
//! re-issue the operation to try again.

use thiserror::Error;

/// Main error type for skill-map operations.
#[derive(Error, Debug)]
pub enum SkillMapError {
    /// Network-level failure before any envelope was received.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body not parseable after prefix-stripping, or a payload
    /// string that failed its second decode.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The server answered with a non-200 envelope status.
    #[error("Request rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Draft validation failed before any request was issued.
    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl SkillMapError {
    /// Whether this error was raised locally, without any request issued.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::InvalidSkill(_) | Self::Json(_) | Self::Config(_))
    }

    /// The envelope status for server rejections.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using SkillMapError.
pub type Result<T> = std::result::Result<T, SkillMapError>;
