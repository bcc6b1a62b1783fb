//! Tutorpath Core - Learning-path data model
//!
//! This crate defines the pieces every other Tutorpath crate shares:
//! the requirement and tutor nodes that make up a learning graph, the
//! relation triples the persistence layer hands us, learner mastery,
//! and the collaborator traits the graph builder queries.
//!
//! # Example
//!
//! ```
//! use tutor_core::{Relation, RelationSet, RelationSource};
//!
//! let mut set = RelationSet::default();
//! set.teaches.push(Relation::new("bayes", "bayes-intro", 0));
//!
//! let tutors = set.tutors_for(&["bayes".to_string()]).unwrap();
//! assert_eq!(tutors[0].child_id, "bayes-intro");
//! ```

pub mod error;
pub mod mastery;
pub mod node;
pub mod relation;
pub mod relation_set;
pub mod source;

pub use error::{Result, SourceError};
pub use mastery::Mastery;
pub use node::{RequirementNode, TutorNode, LENS_COST, MAX_BUILD_ROUNDS, PENALTY_COST};
pub use relation::Relation;
pub use relation_set::RelationSet;
pub use source::{AliasSource, MasterySource, RelationSource};
