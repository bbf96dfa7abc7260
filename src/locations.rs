//! Lesson-location records and the index collaborator.
//!
//! The location index is owned by a sibling subsystem; the graph core only
//! reads it, to resolve location keys into denormalized records when a skill
//! is tagged.

use serde::{Deserialize, Serialize};

/// Denormalized snapshot of a lesson location, captured at tagging time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub key: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub edit_href: String,
    #[serde(default)]
    pub lesson: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub sort_key: i64,
}

/// Read-only view of the lesson locations known to the sibling subsystem.
pub trait LocationIndex {
    /// Visit every known location.
    fn each_location(&self, visitor: &mut dyn FnMut(&LocationRecord));

    /// Direct lookup by location key.
    fn get_by_key(&self, key: &str) -> Option<&LocationRecord>;
}

/// In-memory location index.
#[derive(Debug, Default, Clone)]
pub struct LocationCatalog {
    records: Vec<LocationRecord>,
}

impl LocationCatalog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    pub fn add(&mut self, record: LocationRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LocationIndex for LocationCatalog {
    fn each_location(&self, visitor: &mut dyn FnMut(&LocationRecord)) {
        for record in &self.records {
            visitor(record);
        }
    }

    fn get_by_key(&self, key: &str) -> Option<&LocationRecord> {
        self.records.iter().find(|record| record.key == key)
    }
}
