//! Collaborator interfaces.
//!
//! The resolver never talks to storage itself. Everything it needs from
//! the outside world comes through these read-only traits, so tests can
//! feed it an in-memory [`RelationSet`](crate::RelationSet) and a server
//! can back it with whatever database it likes.

use crate::error::Result;
use crate::mastery::Mastery;
use crate::relation::Relation;
use std::collections::HashMap;

/// Answers the two relationship queries the graph builder runs.
pub trait RelationSource {
    /// Returns one triple per page that teaches any of `requirement_ids`.
    fn tutors_for(&self, requirement_ids: &[String]) -> Result<Vec<Relation>>;

    /// Returns one triple per requirement of any of `tutor_ids`, leaving
    /// out requirements `user_id` already has.
    fn requirements_for(&self, user_id: &str, tutor_ids: &[String]) -> Result<Vec<Relation>>;
}

/// Looks up learner mastery.
pub trait MasterySource {
    /// Returns the recorded mastery for each of `page_ids` the user has an
    /// entry for. Pages with no entry are absent from the map.
    fn masteries(&self, user_id: &str, page_ids: &[String]) -> Result<HashMap<String, Mastery>>;
}

/// Maps human-readable aliases to stable page ids.
pub trait AliasSource {
    /// Resolves every alias, preserving input order.
    fn resolve_aliases(&self, aliases: &[String]) -> Result<Vec<String>>;
}
