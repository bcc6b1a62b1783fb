//! Tutorpath Server - WebSocket server for learning path requests
//!
//! This crate exposes the resolver over JSON-RPC 2.0 so a web backend or
//! editor integration can ask for learning paths without linking Rust.
//!
//! The server supports:
//! - Multiple concurrent connections
//! - `graph.info` for relation statistics
//! - `path.resolve` for a learner's costed learning path
//!
//! Relation data is shared read-only; every request builds and resolves
//! its own graph.

use std::sync::Arc;
use tokio::sync::RwLock;
use tutor_core::RelationSet;

/// Relation data shared across connections.
pub type SharedRelations = Arc<RwLock<RelationSet>>;

mod handlers;
mod protocol;
mod server;

pub use protocol::{Request, ResolveParams, Response, RpcError};
pub use server::{ServerConfig, TutorServer};
