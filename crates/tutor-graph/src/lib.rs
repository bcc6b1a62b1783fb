//! Tutorpath Graph - Learning path resolution
//!
//! This crate turns "I want to understand these pages" into a costed,
//! cycle-safe reading plan. It has two halves that run one after the other:
//!
//! - the [`PathBuilder`] expands a bipartite requirement/tutor graph
//!   outward from the learner's targets by querying a relation source
//! - [`compute_learning_path`] assigns every requirement a cost and a best
//!   tutor, breaking cycles when propagation stalls
//!
//! Every call works on its own [`LearningGraph`]; nothing is cached or
//! shared between learners.
//!
//! # Example
//!
//! ```
//! use tutor_core::{Relation, RelationSet};
//! use tutor_graph::{plan_learning_path, LearningPath, PlanOptions};
//!
//! let mut relations = RelationSet::new();
//! relations.teaches.push(Relation::new("bayes", "bayes-guide", 0));
//! relations.requires.push(Relation::new("probability", "bayes-guide", 0));
//! relations.teaches.push(Relation::new("probability", "probability-intro", 0));
//!
//! let graph = plan_learning_path(
//!     &relations,
//!     "alice",
//!     &["bayes".to_string()],
//!     &PlanOptions::default(),
//! )
//! .unwrap();
//!
//! let path = LearningPath::from(&graph);
//! assert_eq!(path.study_order, vec!["probability-intro", "bayes-guide"]);
//! ```

mod builder;
mod edge;
mod export;
mod graph;
mod order;
mod plan;
mod resolver;
pub mod store;
mod targets;

pub use builder::PathBuilder;
pub use edge::{EdgeKind, GraphEdge};
pub use export::{LearningPath, NodeRole, PathNode};
pub use graph::{GraphStats, LearningGraph};
pub use plan::{plan_learning_path, PlanOptions};
pub use resolver::{compute_learning_path, ResolveStats};
pub use store::{RelationStore, StoreError};
pub use targets::select_targets;
