use serde::{Deserialize, Serialize};

use crate::error::{Result, SkillMapError};

/// Default REST mount point of the skill-map service.
pub const DEFAULT_REST_PATH: &str = "rest/modules/skill_map";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the skill-map service.
///
/// Designed to be embedded in a host application's configuration; every
/// field except `base_url` has a serde default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Origin of the remote authority, e.g. `https://courses.example.com`.
    pub base_url: String,
    #[serde(default = "default_rest_path")]
    pub rest_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rest_path() -> String {
    DEFAULT_REST_PATH.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl ServiceConfig {
    /// Create a config pointing at the given origin with default paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            rest_path: default_rest_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Override the REST mount point.
    #[must_use]
    pub fn with_rest_path(mut self, rest_path: impl Into<String>) -> Self {
        self.rest_path = rest_path.into();
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the skill collection resource.
    #[must_use]
    pub fn skill_url(&self) -> String {
        format!(
            "{}/{}/skill",
            self.base_url.trim_end_matches('/'),
            self.rest_path.trim_matches('/')
        )
    }

    /// Reject configs that cannot produce a usable endpoint.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(SkillMapError::Config(
                "base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
