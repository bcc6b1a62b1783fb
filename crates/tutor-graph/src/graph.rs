//! Core graph data structure.
//!
//! The LearningGraph is an arena of requirement and tutor nodes keyed by
//! page id. It also remembers the order in which ids were discovered so
//! every scan over it is reproducible. One graph belongs to exactly one
//! resolution call; nothing in here is shared.

use std::collections::HashMap;
use tutor_core::{RequirementNode, TutorNode};

/// The bipartite requirement/tutor graph for one learner and one request.
#[derive(Debug, Clone, Default)]
pub struct LearningGraph {
    /// Targets the learner asked for, after mastery filtering.
    pub(crate) page_ids: Vec<String>,

    pub(crate) requirements: HashMap<String, RequirementNode>,
    pub(crate) tutors: HashMap<String, TutorNode>,

    /// Requirement ids in discovery order.
    pub(crate) requirement_order: Vec<String>,

    /// Tutor ids in discovery order.
    pub(crate) tutor_order: Vec<String>,
}

impl LearningGraph {
    /// Creates a graph seeded with one requirement per target id.
    ///
    /// Duplicate targets are collapsed, keeping the first occurrence.
    pub fn new(page_ids: impl IntoIterator<Item = String>) -> Self {
        let mut graph = Self::default();
        for id in page_ids {
            if graph.add_requirement_node(&id, 0) {
                graph.page_ids.push(id);
            }
        }
        graph
    }

    /// Adds a requirement node if it does not exist yet.
    ///
    /// Returns true when the node is new.
    pub fn add_requirement_node(&mut self, page_id: &str, lens_index: i64) -> bool {
        if self.requirements.contains_key(page_id) {
            return false;
        }
        self.requirements
            .insert(page_id.to_string(), RequirementNode::new(page_id, lens_index));
        self.requirement_order.push(page_id.to_string());
        true
    }

    /// Adds a tutor node if it does not exist yet.
    ///
    /// Returns true when the node is new.
    pub fn add_tutor_node(&mut self, page_id: &str, lens_index: i64) -> bool {
        if self.tutors.contains_key(page_id) {
            return false;
        }
        self.tutors
            .insert(page_id.to_string(), TutorNode::new(page_id, lens_index));
        self.tutor_order.push(page_id.to_string());
        true
    }

    /// Records that `tutor_id` can teach `requirement_id`.
    ///
    /// The tutor id is always appended to the requirement's list, even if
    /// it is already there. Returns true when the tutor node is new.
    pub fn add_tutor(&mut self, requirement_id: &str, tutor_id: &str, lens_index: i64) -> bool {
        self.add_requirement_node(requirement_id, lens_index);
        if let Some(req) = self.requirements.get_mut(requirement_id) {
            req.tutor_ids.push(tutor_id.to_string());
        }
        self.add_tutor_node(tutor_id, lens_index)
    }

    /// Records that `tutor_id` requires `requirement_id`.
    ///
    /// Returns true when the requirement node is new.
    pub fn add_requirement(&mut self, tutor_id: &str, requirement_id: &str, lens_index: i64) -> bool {
        self.add_tutor_node(tutor_id, lens_index);
        if let Some(tutor) = self.tutors.get_mut(tutor_id) {
            tutor.requirement_ids.push(requirement_id.to_string());
        }
        self.add_requirement_node(requirement_id, lens_index)
    }

    /// Target ids this graph was built for.
    pub fn page_ids(&self) -> &[String] {
        &self.page_ids
    }

    /// Gets a requirement by page id.
    pub fn requirement(&self, page_id: &str) -> Option<&RequirementNode> {
        self.requirements.get(page_id)
    }

    /// Gets a tutor by page id.
    pub fn tutor(&self, page_id: &str) -> Option<&TutorNode> {
        self.tutors.get(page_id)
    }

    /// The requirement map, keyed by page id.
    pub fn requirement_map(&self) -> &HashMap<String, RequirementNode> {
        &self.requirements
    }

    /// The tutor map, keyed by page id.
    pub fn tutor_map(&self) -> &HashMap<String, TutorNode> {
        &self.tutors
    }

    /// Iterates requirements in discovery order.
    pub fn requirements(&self) -> impl Iterator<Item = &RequirementNode> {
        self.requirement_order
            .iter()
            .filter_map(|id| self.requirements.get(id))
    }

    /// Iterates tutors in discovery order.
    pub fn tutors(&self) -> impl Iterator<Item = &TutorNode> {
        self.tutor_order.iter().filter_map(|id| self.tutors.get(id))
    }

    /// Returns the number of requirement nodes.
    pub fn requirement_count(&self) -> usize {
        self.requirements.len()
    }

    /// Returns the number of tutor nodes.
    pub fn tutor_count(&self) -> usize {
        self.tutors.len()
    }

    /// Returns the total number of nodes on both sides.
    pub fn node_count(&self) -> usize {
        self.requirement_count() + self.tutor_count()
    }

    /// Returns the number of edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        let taught_by: usize = self.requirements.values().map(|r| r.tutor_ids.len()).sum();
        let requires: usize = self.tutors.values().map(|t| t.requirement_ids.len()).sum();
        taught_by + requires
    }

    /// Whether every node on both sides has a final cost.
    pub fn is_resolved(&self) -> bool {
        self.requirements.values().all(|r| r.processed)
            && self.tutors.values().all(|t| t.processed)
    }

    /// Re-sorts a tutor's requirements by ascending cost.
    ///
    /// The sort is stable, so requirements with equal cost keep their
    /// relative order.
    pub fn sort_requirements_by_cost(&mut self, tutor_id: &str) {
        let Some(tutor) = self.tutors.get_mut(tutor_id) else {
            return;
        };
        sort_by_cost(&mut tutor.requirement_ids, &self.requirements);
    }
}

pub(crate) fn sort_by_cost(ids: &mut [String], requirements: &HashMap<String, RequirementNode>) {
    let cost = |id: &String| requirements.get(id).map_or(i64::MAX, |r| r.cost);
    ids.sort_by_key(cost);
}

/// Graph statistics for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub requirement_count: usize,
    pub tutor_count: usize,
    pub edge_count: usize,
}

impl LearningGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            requirement_count: self.requirement_count(),
            tutor_count: self.tutor_count(),
            edge_count: self.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collapses_duplicate_targets() {
        let graph = LearningGraph::new(vec!["1".to_string(), "2".to_string(), "1".to_string()]);
        assert_eq!(graph.page_ids(), &["1".to_string(), "2".to_string()]);
        assert_eq!(graph.requirement_count(), 2);
        assert_eq!(graph.tutor_count(), 0);
    }

    #[test]
    fn test_add_tutor_keeps_duplicates_in_list() {
        let mut graph = LearningGraph::new(vec!["1".to_string()]);
        assert!(graph.add_tutor("1", "2", 0));
        assert!(!graph.add_tutor("1", "2", 0));

        let req = graph.requirement("1").unwrap();
        assert_eq!(req.tutor_ids, vec!["2", "2"]);
        assert_eq!(
            graph.stats(),
            GraphStats {
                requirement_count: 1,
                tutor_count: 1,
                edge_count: 2,
            }
        );
    }

    #[test]
    fn test_same_page_on_both_sides() {
        let mut graph = LearningGraph::new(vec!["1".to_string()]);
        graph.add_tutor("1", "1", 0);
        graph.add_requirement("1", "3", 2);

        assert!(graph.tutor("1").is_some());
        assert_eq!(graph.requirement("3").unwrap().lens_index, 2);
        assert_eq!(graph.tutor("1").unwrap().requirement_ids, vec!["3"]);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn test_discovery_order_is_kept() {
        let mut graph = LearningGraph::new(vec!["b".to_string(), "a".to_string()]);
        graph.add_tutor("a", "z", 0);
        graph.add_tutor("b", "y", 0);

        let reqs: Vec<&str> = graph.requirements().map(|r| r.page_id.as_str()).collect();
        let tutors: Vec<&str> = graph.tutors().map(|t| t.page_id.as_str()).collect();
        assert_eq!(reqs, vec!["b", "a"]);
        assert_eq!(tutors, vec!["z", "y"]);
    }
}
