//! Requirement and tutor nodes.
//!
//! A learning graph is bipartite. Requirements point at the tutors that
//! can teach them; tutors point at the requirements they assume. The same
//! page id may show up on both sides, and a requirement may list itself as
//! its own tutor.

use serde::{Deserialize, Serialize};

/// Cost of anything that cannot be reached. Every node starts here.
pub const PENALTY_COST: i64 = 10_000_000;

/// Cost added per lens position once a node is resolved.
pub const LENS_COST: i64 = 10;

/// Upper bound on builder expansion rounds.
pub const MAX_BUILD_ROUNDS: usize = 20;

/// A prerequisite concept the learner still has to internalize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementNode {
    /// Page id of the concept.
    pub page_id: String,

    /// Position of the lens that introduced this requirement.
    #[serde(skip)]
    pub lens_index: i64,

    /// Tutors that can satisfy this requirement, in discovery order.
    /// May contain the same id more than once.
    pub tutor_ids: Vec<String>,

    /// Cheapest tutor, set once the requirement is resolved.
    #[serde(default)]
    pub best_tutor_id: Option<String>,

    /// Cost of satisfying this requirement.
    pub cost: i64,

    #[serde(skip)]
    pub processed: bool,
}

impl RequirementNode {
    /// Creates an unresolved requirement with no tutors.
    pub fn new(page_id: impl Into<String>, lens_index: i64) -> Self {
        Self {
            page_id: page_id.into(),
            lens_index,
            tutor_ids: Vec::new(),
            best_tutor_id: None,
            cost: PENALTY_COST,
            processed: false,
        }
    }

    /// Cost contributed by this node's lens position.
    pub fn lens_penalty(&self) -> i64 {
        self.lens_index.saturating_mul(LENS_COST)
    }

    /// Whether no page has been found that teaches this requirement.
    pub fn is_untaught(&self) -> bool {
        self.tutor_ids.is_empty()
    }
}

/// A page that can teach one or more requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorNode {
    /// Page id of the tutor.
    pub page_id: String,

    /// Position of the lens that introduced this tutor.
    #[serde(skip)]
    pub lens_index: i64,

    /// Requirements the tutor assumes. Sorted by ascending cost after
    /// resolution.
    pub requirement_ids: Vec<String>,

    /// Cost of reading this tutor, prerequisites included.
    pub cost: i64,

    #[serde(skip)]
    pub processed: bool,
}

impl TutorNode {
    /// Creates an unresolved tutor with no requirements.
    pub fn new(page_id: impl Into<String>, lens_index: i64) -> Self {
        Self {
            page_id: page_id.into(),
            lens_index,
            requirement_ids: Vec::new(),
            cost: PENALTY_COST,
            processed: false,
        }
    }

    /// Cost contributed by this node's lens position.
    pub fn lens_penalty(&self) -> i64 {
        self.lens_index.saturating_mul(LENS_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nodes_start_unreachable() {
        let req = RequirementNode::new("1", 0);
        assert_eq!(req.cost, PENALTY_COST);
        assert!(!req.processed);
        assert!(req.best_tutor_id.is_none());
        assert!(req.is_untaught());

        let tutor = TutorNode::new("2", 3);
        assert_eq!(tutor.cost, PENALTY_COST);
        assert_eq!(tutor.lens_penalty(), 30);
    }

    #[test]
    fn test_bookkeeping_fields_are_not_serialized() {
        let mut req = RequirementNode::new("1", 2);
        req.tutor_ids.push("2".to_string());
        req.best_tutor_id = Some("2".to_string());
        req.processed = true;

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["pageId"], "1");
        assert_eq!(json["bestTutorId"], "2");
        assert_eq!(json["tutorIds"][0], "2");
        assert!(json.get("lensIndex").is_none());
        assert!(json.get("processed").is_none());
    }
}
