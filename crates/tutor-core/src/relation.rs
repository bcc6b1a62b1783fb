//! Relation triples emitted by the persistence layer.

use serde::{Deserialize, Serialize};

/// One `(parent, child, lens)` row.
///
/// For both relation queries the parent is the requirement and the child
/// is the tutor page: either "child teaches parent" or "child requires
/// parent", depending on which query produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub parent_id: String,
    pub child_id: String,
    #[serde(default)]
    pub lens_index: i64,
}

impl Relation {
    /// Creates a relation triple.
    pub fn new(parent_id: impl Into<String>, child_id: impl Into<String>, lens_index: i64) -> Self {
        Self {
            parent_id: parent_id.into(),
            child_id: child_id.into(),
            lens_index,
        }
    }
}
