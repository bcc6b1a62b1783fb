//! Edge types for the learning graph.
//!
//! The graph is bipartite, so there are only two relationships:
//! a requirement can be taught by a tutor, and a tutor requires a
//! requirement.

use serde::{Deserialize, Serialize};

/// The type of relationship between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Requirement A can be taught by tutor B.
    TaughtBy,

    /// Tutor A requires requirement B.
    Requires,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::TaughtBy => "taught_by",
            Self::Requires => "requires",
        };
        write!(f, "{}", s)
    }
}

/// A simplified edge for graph export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
}
