//! In-memory relation data.
//!
//! `RelationSet` is the simplest possible collaborator: every relation
//! triple, alias and mastery record lives in plain collections. The CLI
//! loads one from JSON, the store persists it, and the server shares it
//! between connections.

use crate::error::{Result, SourceError};
use crate::mastery::Mastery;
use crate::relation::Relation;
use crate::source::{AliasSource, MasterySource, RelationSource};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

/// All relation data needed to resolve learning paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationSet {
    /// Alias -> page id.
    #[serde(default)]
    pub aliases: HashMap<String, String>,

    /// "child teaches parent" triples.
    #[serde(default)]
    pub teaches: Vec<Relation>,

    /// "child requires parent" triples.
    #[serde(default)]
    pub requires: Vec<Relation>,

    /// User id -> page id -> mastery.
    #[serde(default)]
    pub masteries: HashMap<String, HashMap<String, Mastery>>,
}

impl RelationSet {
    /// Creates an empty relation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a relation set from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a relation set from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Records that `user_id` has or wants `page_id`.
    pub fn set_mastery(&mut self, user_id: &str, page_id: &str, mastery: Mastery) {
        self.masteries
            .entry(user_id.to_string())
            .or_default()
            .insert(page_id.to_string(), mastery);
    }

    /// Whether `user_id` already knows `page_id`.
    pub fn user_has(&self, user_id: &str, page_id: &str) -> bool {
        self.masteries
            .get(user_id)
            .and_then(|pages| pages.get(page_id))
            .is_some_and(|m| m.has)
    }

    /// Every page id mentioned by a relation or alias.
    pub fn page_ids(&self) -> HashSet<&str> {
        self.teaches
            .iter()
            .chain(self.requires.iter())
            .flat_map(|r| [r.parent_id.as_str(), r.child_id.as_str()])
            .chain(self.aliases.values().map(String::as_str))
            .collect()
    }

    /// Number of users with mastery records.
    pub fn user_count(&self) -> usize {
        self.masteries.len()
    }
}

impl RelationSource for RelationSet {
    fn tutors_for(&self, requirement_ids: &[String]) -> Result<Vec<Relation>> {
        let wanted: HashSet<&str> = requirement_ids.iter().map(String::as_str).collect();
        let rows: Vec<Relation> = self
            .teaches
            .iter()
            .filter(|r| wanted.contains(r.parent_id.as_str()))
            .cloned()
            .collect();

        debug!(
            "tutors_for: {} requirements -> {} rows",
            requirement_ids.len(),
            rows.len()
        );
        Ok(rows)
    }

    fn requirements_for(&self, user_id: &str, tutor_ids: &[String]) -> Result<Vec<Relation>> {
        let wanted: HashSet<&str> = tutor_ids.iter().map(String::as_str).collect();
        let rows: Vec<Relation> = self
            .requires
            .iter()
            .filter(|r| wanted.contains(r.child_id.as_str()))
            .filter(|r| !self.user_has(user_id, &r.parent_id))
            .cloned()
            .collect();

        debug!(
            "requirements_for: {} tutors -> {} rows",
            tutor_ids.len(),
            rows.len()
        );
        Ok(rows)
    }
}

impl MasterySource for RelationSet {
    fn masteries(&self, user_id: &str, page_ids: &[String]) -> Result<HashMap<String, Mastery>> {
        let Some(pages) = self.masteries.get(user_id) else {
            return Ok(HashMap::new());
        };

        Ok(page_ids
            .iter()
            .filter_map(|id| pages.get(id).map(|m| (id.clone(), *m)))
            .collect())
    }
}

impl AliasSource for RelationSet {
    fn resolve_aliases(&self, aliases: &[String]) -> Result<Vec<String>> {
        let known = self.page_ids();

        aliases
            .iter()
            .map(|alias| {
                if let Some(id) = self.aliases.get(alias) {
                    Ok(id.clone())
                } else if known.contains(alias.as_str()) {
                    Ok(alias.clone())
                } else {
                    Err(SourceError::UnknownAlias {
                        alias: alias.clone(),
                    })
                }
            })
            .collect()
    }
}
