//! Study order for a resolved graph.
//!
//! Walks each target's best tutor and emits tutor pages after everything
//! they require, so reading the list front to back never hits a page whose
//! prerequisites come later.

use crate::graph::LearningGraph;
use std::collections::HashSet;

impl LearningGraph {
    /// Returns tutor page ids in a dependency-respecting reading order.
    ///
    /// Each page appears once. Requirements without a best tutor are
    /// skipped, and cycles are cut at the first repeated tutor.
    pub fn study_order(&self) -> Vec<String> {
        let mut order = Vec::new();
        let mut visited = HashSet::new();

        for id in &self.page_ids {
            self.visit_requirement(id, &mut visited, &mut order);
        }

        order
    }

    fn visit_requirement<'a>(
        &'a self,
        requirement_id: &str,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<String>,
    ) {
        let best = self
            .requirements
            .get(requirement_id)
            .and_then(|r| r.best_tutor_id.as_deref());

        if let Some(tutor_id) = best {
            self.visit_tutor(tutor_id, visited, order);
        }
    }

    fn visit_tutor<'a>(
        &'a self,
        tutor_id: &'a str,
        visited: &mut HashSet<&'a str>,
        order: &mut Vec<String>,
    ) {
        if !visited.insert(tutor_id) {
            return;
        }

        if let Some(tutor) = self.tutors.get(tutor_id) {
            for requirement_id in &tutor.requirement_ids {
                self.visit_requirement(requirement_id, visited, order);
            }
        }

        order.push(tutor_id.to_string());
    }
}
