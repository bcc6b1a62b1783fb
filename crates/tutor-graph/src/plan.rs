//! End-to-end learning path planning.

use crate::builder::PathBuilder;
use crate::graph::LearningGraph;
use crate::targets::select_targets;
use tracing::info;
use tutor_core::{MasterySource, RelationSource, Result, MAX_BUILD_ROUNDS};

/// Knobs for [`plan_learning_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Keep only pages the learner explicitly wants.
    pub only_wanted: bool,
    /// Builder round cap.
    pub max_rounds: usize,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            only_wanted: false,
            max_rounds: MAX_BUILD_ROUNDS,
        }
    }
}

/// Selects targets, builds the graph and resolves its costs.
///
/// The returned graph is fresh and fully resolved. Only collaborator
/// errors can fail the call.
pub fn plan_learning_path<S>(
    source: &S,
    user_id: &str,
    candidates: &[String],
    options: &PlanOptions,
) -> Result<LearningGraph>
where
    S: RelationSource + MasterySource + ?Sized,
{
    let targets = select_targets(source, user_id, candidates, options.only_wanted)?;

    let mut graph = PathBuilder::new(source)
        .with_max_rounds(options.max_rounds)
        .build(user_id, targets)?;

    let stats = graph.resolve();
    info!(
        "Planned path for {}: {} targets, {} nodes, {} cycles broken",
        user_id,
        graph.page_ids().len(),
        graph.node_count(),
        stats.forced
    );

    Ok(graph)
}
