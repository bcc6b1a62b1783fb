//! Error types for collaborator queries.

use thiserror::Error;

/// Result type alias for collaborator operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors a relation, mastery or alias source can report.
///
/// The graph builder never recovers from these: the whole resolution
/// is aborted and the error reaches the caller unchanged.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The backing storage failed while answering a query.
    #[error("Relation query failed: {message}")]
    Query {
        /// Description of the storage failure.
        message: String,
    },

    /// An alias that maps to no known page.
    #[error("Unknown page alias: {alias}")]
    UnknownAlias {
        /// The alias that could not be resolved.
        alias: String,
    },

    /// Relation data could not be read from disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Relation data was not valid JSON for a relation set.
    #[error("Invalid relation data: {0}")]
    Json(#[from] serde_json::Error),
}

impl SourceError {
    /// Convenience constructor for storage failures.
    pub fn query(message: impl Into<String>) -> Self {
        SourceError::Query {
            message: message.into(),
        }
    }
}
