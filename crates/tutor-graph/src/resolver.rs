//! Cost resolution for learning graphs.
//!
//! Costs propagate in waves rather than through a priority queue. Each pass
//! freezes every requirement whose tutors are all resolved, then every tutor
//! whose requirements are all resolved. When a pass freezes nothing, the
//! remaining nodes sit on cycles and one requirement is forced through.
//!
//! Cost model:
//! - untaught requirement: `PENALTY_COST`, no lens penalty
//! - requirement: cheapest tutor + lens penalty
//! - tutor: sum of requirements + lens penalty + 1
//!
//! All sums saturate at `i64::MAX`.

use crate::graph::{sort_by_cost, LearningGraph};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use tutor_core::{RequirementNode, TutorNode, PENALTY_COST};

/// Counters describing one resolution run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Number of full passes over the graph.
    pub passes: usize,
    /// Number of nodes forced to break a cycle.
    pub forced: usize,
}

/// Assigns every node its final cost and every requirement its best tutor.
///
/// Never fails: forced cycle breaking resolves at least one node per pass,
/// so the loop ends after at most as many passes as there are nodes.
pub fn compute_learning_path(graph: &mut LearningGraph) -> ResolveStats {
    let LearningGraph {
        requirements,
        tutors,
        requirement_order,
        tutor_order,
        ..
    } = graph;

    let mut stats = ResolveStats::default();

    for req in requirements.values_mut() {
        if req.tutor_ids.is_empty() {
            req.processed = true;
            req.cost = PENALTY_COST;
        }
    }

    while !all_processed(requirements, tutors) {
        stats.passes += 1;

        let mut changed = resolve_requirements(requirements, tutors, requirement_order);
        changed |= resolve_tutors(requirements, tutors, tutor_order);

        if !changed {
            break_cycle(requirements, tutors, requirement_order, tutor_order);
            stats.forced += 1;
        }
    }

    info!(
        "Resolved {} requirements and {} tutors in {} passes ({} forced)",
        requirements.len(),
        tutors.len(),
        stats.passes,
        stats.forced
    );

    stats
}

impl LearningGraph {
    /// Runs cost resolution on this graph.
    pub fn resolve(&mut self) -> ResolveStats {
        compute_learning_path(self)
    }
}

fn all_processed(
    requirements: &HashMap<String, RequirementNode>,
    tutors: &HashMap<String, TutorNode>,
) -> bool {
    requirements.values().all(|r| r.processed) && tutors.values().all(|t| t.processed)
}

fn is_tutor_processed(tutors: &HashMap<String, TutorNode>, id: &str) -> bool {
    tutors.get(id).is_some_and(|t| t.processed)
}

fn is_requirement_processed(requirements: &HashMap<String, RequirementNode>, id: &str) -> bool {
    requirements.get(id).is_some_and(|r| r.processed)
}

/// Cheapest processed tutor of `req`, first one winning ties.
fn cheapest_tutor(req: &RequirementNode, tutors: &HashMap<String, TutorNode>) -> Option<(String, i64)> {
    let mut best: Option<(String, i64)> = None;
    for tutor_id in &req.tutor_ids {
        let Some(tutor) = tutors.get(tutor_id).filter(|t| t.processed) else {
            continue;
        };
        if best.as_ref().map_or(true, |(_, cost)| tutor.cost < *cost) {
            best = Some((tutor_id.clone(), tutor.cost));
        }
    }
    best
}

fn resolve_requirements(
    requirements: &mut HashMap<String, RequirementNode>,
    tutors: &HashMap<String, TutorNode>,
    order: &[String],
) -> bool {
    let mut changed = false;

    for id in order {
        let Some(req) = requirements.get_mut(id) else {
            continue;
        };
        if req.processed {
            continue;
        }

        // Partial minimum so far; a forced break reuses it.
        if let Some((tutor_id, cost)) = cheapest_tutor(req, tutors) {
            req.best_tutor_id = Some(tutor_id);
            req.cost = cost;
        }

        if req.tutor_ids.iter().all(|t| is_tutor_processed(tutors, t)) {
            req.cost = req.cost.saturating_add(req.lens_penalty());
            req.processed = true;
            changed = true;
        }
    }

    changed
}

fn resolve_tutors(
    requirements: &HashMap<String, RequirementNode>,
    tutors: &mut HashMap<String, TutorNode>,
    order: &[String],
) -> bool {
    let mut changed = false;

    for id in order {
        let Some(tutor) = tutors.get_mut(id) else {
            continue;
        };
        if tutor.processed {
            continue;
        }
        if !tutor
            .requirement_ids
            .iter()
            .all(|r| is_requirement_processed(requirements, r))
        {
            continue;
        }

        freeze_tutor(tutor, requirements);
        changed = true;
    }

    changed
}

fn freeze_tutor(tutor: &mut TutorNode, requirements: &HashMap<String, RequirementNode>) {
    let requirement_cost: i64 = tutor
        .requirement_ids
        .iter()
        .map(|id| requirements.get(id).map_or(PENALTY_COST, |r| r.cost))
        .fold(0i64, |acc, cost| acc.saturating_add(cost));

    tutor.cost = requirement_cost
        .saturating_add(tutor.lens_penalty())
        .saturating_add(1);
    tutor.processed = true;
    sort_by_cost(&mut tutor.requirement_ids, requirements);
}

/// Follows first unprocessed edges from `start` until a requirement repeats.
fn walk_cycle(
    requirements: &HashMap<String, RequirementNode>,
    tutors: &HashMap<String, TutorNode>,
    start: &str,
) -> Vec<String> {
    let mut walked = vec![start.to_string()];
    let mut seen: HashSet<&str> = HashSet::new();
    seen.insert(start);
    let mut current = start;

    loop {
        let Some(tutor_id) = requirements.get(current).and_then(|r| {
            r.tutor_ids
                .iter()
                .find(|t| tutors.get(t.as_str()).is_some_and(|t| !t.processed))
        }) else {
            break;
        };
        walked.push(tutor_id.clone());

        let Some(next) = tutors.get(tutor_id).and_then(|t| {
            t.requirement_ids
                .iter()
                .find(|r| requirements.get(r.as_str()).is_some_and(|r| !r.processed))
        }) else {
            break;
        };
        walked.push(next.clone());

        if !seen.insert(next.as_str()) {
            break;
        }
        current = next.as_str();
    }

    walked
}

fn break_cycle(
    requirements: &mut HashMap<String, RequirementNode>,
    tutors: &mut HashMap<String, TutorNode>,
    requirement_order: &[String],
    tutor_order: &[String],
) {
    let start = requirement_order
        .iter()
        .find(|id| requirements.get(id.as_str()).is_some_and(|r| !r.processed));

    if let Some(start) = start {
        let walked = walk_cycle(requirements, tutors, start);
        debug!("Breaking cycle at {}: {}", start, walked.join(" -> "));

        if let Some(req) = requirements.get_mut(start) {
            if req.best_tutor_id.is_none() {
                req.best_tutor_id = req.tutor_ids.first().cloned();
                req.cost = PENALTY_COST;
            }
            req.cost = req.cost.saturating_add(req.lens_penalty());
            req.processed = true;
        }
        return;
    }

    // Only reachable if a tutor points at a requirement missing from the map.
    let stuck = tutor_order
        .iter()
        .find(|id| tutors.get(id.as_str()).is_some_and(|t| !t.processed));
    if let Some(id) = stuck {
        if let Some(tutor) = tutors.get_mut(id.as_str()) {
            debug!("Forcing tutor {} with unresolvable requirements", id);
            freeze_tutor(tutor, requirements);
        }
    }
}
