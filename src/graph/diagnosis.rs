//! Server-reported graph-health diagnosis.
//!
//! The diagnosis is computed entirely by the remote authority; the client
//! stores the latest report and surfaces it read-only. It is replaced
//! wholesale on every successful round trip, never merged.

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Health report over the prerequisite graph.
///
/// Decoding is tolerant: the authority is observed to send `[]` instead of
/// an object on some confirmations, and any non-object decodes as the empty
/// report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnosis {
    cycles: Vec<Vec<String>>,
    singletons: Vec<String>,
    long_chains: Vec<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct DiagnosisWire {
    #[serde(default)]
    cycles: Vec<Vec<String>>,
    #[serde(default)]
    singletons: Vec<String>,
    #[serde(default)]
    long_chains: Vec<Vec<String>>,
}

impl Diagnosis {
    #[must_use]
    pub fn new(
        cycles: Vec<Vec<String>>,
        singletons: Vec<String>,
        long_chains: Vec<Vec<String>>,
    ) -> Self {
        Self {
            cycles,
            singletons,
            long_chains,
        }
    }

    /// Skill-id loops in the prerequisite graph.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Skills with no prerequisites and no dependents.
    #[must_use]
    pub fn singletons(&self) -> &[String] {
        &self.singletons
    }

    /// Prerequisite chains exceeding the server-defined depth threshold.
    #[must_use]
    pub fn long_chains(&self) -> &[Vec<String>] {
        &self.long_chains
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.cycles.is_empty() && self.singletons.is_empty() && self.long_chains.is_empty()
    }
}

impl<'de> Deserialize<'de> for Diagnosis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Ok(Self::default());
        }
        let wire: DiagnosisWire = serde_json::from_value(value).map_err(D::Error::custom)?;
        Ok(Self {
            cycles: wire.cycles,
            singletons: wire.singletons,
            long_chains: wire.long_chains,
        })
    }
}
