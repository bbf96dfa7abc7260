//! Authoritative client-side copy of the skill graph.
//!
//! The store is populated only from server-confirmed state: wholesale after
//! a load or delete, one skill at a time after a create/update confirmation.
//! Prerequisite ids are plain references into the store; iteration tolerates
//! ids that no longer resolve, so a concurrent delete on another client never
//! breaks traversal here.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::locations::LocationRecord;

/// A taggable competency node.
///
/// The id is server-assigned on first successful creation and immutable
/// afterwards; all other attributes are replaceable in place by an update
/// confirmation. Field names match the wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prerequisite_ids: Vec<String>,
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
}

/// Skills indexed by identifier.
///
/// Iteration order is implementation-defined; callers may only rely on every
/// skill being visited exactly once.
#[derive(Debug, Default, Clone)]
pub struct SkillStore {
    skills: HashMap<String, Skill>,
}

impl SkillStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct lookup; no traversal.
    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Visit every skill exactly once.
    pub fn each_skill(&self, mut visitor: impl FnMut(&Skill)) {
        for skill in self.skills.values() {
            visitor(skill);
        }
    }

    /// Visit each prerequisite of `skill` that still resolves.
    ///
    /// Ids that no longer resolve are skipped silently; a dangling reference
    /// left behind by a delete is not an error.
    pub fn each_prerequisite(&self, skill: &Skill, mut visitor: impl FnMut(&Skill)) {
        for id in &skill.prerequisite_ids {
            if let Some(prerequisite) = self.skills.get(id) {
                visitor(prerequisite);
            }
        }
    }

    /// Wholesale replacement after a load or delete confirmation.
    pub fn replace_all(&mut self, skills: Vec<Skill>) {
        self.skills = skills
            .into_iter()
            .map(|skill| (skill.id.clone(), skill))
            .collect();
    }

    /// Insert a new skill or overwrite the one with the same id.
    pub fn upsert(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    /// Remove a skill if present. Does not cascade into other skills'
    /// prerequisite lists.
    pub fn remove(&mut self, id: &str) -> Option<Skill> {
        self.skills.remove(id)
    }
}
