//! Target selection.
//!
//! Before any graph is built, the learner's requested pages are filtered
//! against what they already know.

use std::collections::HashSet;
use tracing::debug;
use tutor_core::{MasterySource, Result};

/// Drops pages `user_id` already has and, with `only_wanted`, pages they
/// have not asked for. Order is preserved and duplicates are removed.
pub fn select_targets<M: MasterySource + ?Sized>(
    mastery: &M,
    user_id: &str,
    candidates: &[String],
    only_wanted: bool,
) -> Result<Vec<String>> {
    let masteries = mastery.masteries(user_id, candidates)?;
    let mut seen = HashSet::new();

    let targets: Vec<String> = candidates
        .iter()
        .filter(|id| seen.insert(id.as_str()))
        .filter(|id| {
            let m = masteries.get(id.as_str()).copied().unwrap_or_default();
            !m.has && (!only_wanted || m.wants)
        })
        .cloned()
        .collect();

    debug!(
        "Selected {} of {} candidate pages for {}",
        targets.len(),
        candidates.len(),
        user_id
    );

    Ok(targets)
}
