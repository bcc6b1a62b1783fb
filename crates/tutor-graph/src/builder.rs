//! Graph builder for constructing a learning graph from relation queries.
//!
//! Starting from the learner's targets, the builder alternates between two
//! questions until nothing new turns up:
//! 1. Which pages teach these requirements?
//! 2. What do those new tutors require?

use crate::graph::LearningGraph;
use tracing::{debug, warn};
use tutor_core::{RelationSource, Result, MAX_BUILD_ROUNDS};

/// Builds a LearningGraph by querying a relation source.
pub struct PathBuilder<'a, S: RelationSource + ?Sized> {
    source: &'a S,
    max_rounds: usize,
}

impl<'a, S: RelationSource + ?Sized> PathBuilder<'a, S> {
    /// Creates a builder over `source` with the default round cap.
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_rounds: MAX_BUILD_ROUNDS,
        }
    }

    /// Overrides the round cap.
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Expands the graph outward from `page_ids` for `user_id`.
    ///
    /// Targets with no tutor after the first round are made to teach
    /// themselves. Requirements found in later rounds get no such
    /// fallback and stay untaught.
    ///
    /// Any query error aborts the build.
    pub fn build(&self, user_id: &str, page_ids: Vec<String>) -> Result<LearningGraph> {
        let mut graph = LearningGraph::new(page_ids);
        let mut new_requirement_ids: Vec<String> = graph.page_ids().to_vec();
        let mut rounds = 0;

        while rounds < self.max_rounds {
            let mut new_tutor_ids = Vec::new();

            if !new_requirement_ids.is_empty() {
                for relation in self.source.tutors_for(&new_requirement_ids)? {
                    if graph.add_tutor(&relation.parent_id, &relation.child_id, relation.lens_index)
                    {
                        new_tutor_ids.push(relation.child_id);
                    }
                }
            }

            if rounds == 0 {
                for id in &new_requirement_ids {
                    let Some(req) = graph.requirement(id) else {
                        continue;
                    };
                    if req.is_untaught() {
                        let lens_index = req.lens_index;
                        debug!("Requirement {} has no tutors, teaching itself", id);
                        if graph.add_tutor(id, id, lens_index) {
                            new_tutor_ids.push(id.clone());
                        }
                    }
                }
            }

            rounds += 1;
            debug!(
                "Round {}: {} new tutors ({} requirements, {} tutors)",
                rounds,
                new_tutor_ids.len(),
                graph.requirement_count(),
                graph.tutor_count()
            );

            if new_tutor_ids.is_empty() {
                return Ok(graph);
            }

            new_requirement_ids.clear();
            for relation in self.source.requirements_for(user_id, &new_tutor_ids)? {
                if graph.add_requirement(&relation.child_id, &relation.parent_id, relation.lens_index)
                {
                    new_requirement_ids.push(relation.parent_id);
                }
            }
        }

        if !new_requirement_ids.is_empty() {
            warn!(
                "Stopped after {} rounds with {} requirements left unexpanded",
                self.max_rounds,
                new_requirement_ids.len()
            );
        }

        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_core::{Mastery, Relation, RelationSet, SourceError};

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builder_follows_relations() {
        let mut set = RelationSet::new();
        set.teaches.push(Relation::new("1", "2", 0));
        set.requires.push(Relation::new("3", "2", 1));
        set.teaches.push(Relation::new("3", "4", 0));

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert_eq!(graph.requirement("1").unwrap().tutor_ids, vec!["2"]);
        assert_eq!(graph.tutor("2").unwrap().requirement_ids, vec!["3"]);
        assert_eq!(graph.requirement("3").unwrap().tutor_ids, vec!["4"]);
        assert_eq!(graph.requirement("3").unwrap().lens_index, 1);
        assert!(graph.tutor("4").unwrap().requirement_ids.is_empty());
    }

    #[test]
    fn test_untaught_target_teaches_itself() {
        let mut set = RelationSet::new();
        set.requires.push(Relation::new("2", "1", 0));

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert_eq!(graph.requirement("1").unwrap().tutor_ids, vec!["1"]);
        // The self-tutor's own requirements are still expanded.
        assert_eq!(graph.tutor("1").unwrap().requirement_ids, vec!["2"]);
    }

    #[test]
    fn test_deeper_untaught_requirement_stays_untaught() {
        let mut set = RelationSet::new();
        set.teaches.push(Relation::new("1", "2", 0));
        set.requires.push(Relation::new("3", "2", 0));

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert!(graph.requirement("3").unwrap().is_untaught());
        assert!(graph.tutor("3").is_none());
    }

    #[test]
    fn test_mastered_requirements_are_skipped() {
        let mut set = RelationSet::new();
        set.teaches.push(Relation::new("1", "2", 0));
        set.requires.push(Relation::new("3", "2", 0));
        set.requires.push(Relation::new("4", "2", 0));
        set.set_mastery("alice", "3", Mastery::has());

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert_eq!(graph.tutor("2").unwrap().requirement_ids, vec!["4"]);
        assert!(graph.requirement("3").is_none());
    }

    #[test]
    fn test_duplicate_relations_are_tolerated() {
        let mut set = RelationSet::new();
        set.teaches.push(Relation::new("1", "2", 0));
        set.teaches.push(Relation::new("1", "2", 0));

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert_eq!(graph.requirement("1").unwrap().tutor_ids, vec!["2", "2"]);
        assert_eq!(graph.tutor_count(), 1);
    }

    #[test]
    fn test_cycles_do_not_hang_builder() {
        let mut set = RelationSet::new();
        set.teaches.push(Relation::new("1", "2", 0));
        set.requires.push(Relation::new("1", "2", 0));

        let graph = PathBuilder::new(&set).build("alice", ids(&["1"])).unwrap();

        assert_eq!(graph.requirement_count(), 1);
        assert_eq!(graph.tutor("2").unwrap().requirement_ids, vec!["1"]);
    }

    #[test]
    fn test_round_cap_leaves_frontier_unexpanded() {
        let mut set = RelationSet::new();
        for i in 0..5 {
            set.teaches
                .push(Relation::new(format!("r{}", i), format!("t{}", i), 0));
            set.requires
                .push(Relation::new(format!("r{}", i + 1), format!("t{}", i), 0));
        }

        let graph = PathBuilder::new(&set)
            .with_max_rounds(2)
            .build("alice", ids(&["r0"]))
            .unwrap();

        assert!(graph.tutor("t1").is_some());
        assert!(graph.tutor("t2").is_none());
        assert!(graph.requirement("r2").unwrap().is_untaught());
    }

    struct FailingSource;

    impl RelationSource for FailingSource {
        fn tutors_for(&self, _requirement_ids: &[String]) -> Result<Vec<Relation>> {
            Err(SourceError::query("connection reset"))
        }

        fn requirements_for(&self, _user_id: &str, _tutor_ids: &[String]) -> Result<Vec<Relation>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_query_error_aborts_build() {
        let err = PathBuilder::new(&FailingSource)
            .build("alice", ids(&["1"]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Relation query failed: connection reset");
    }
}
