//! Request handlers for protocol methods.
//!
//! Each handler implements one method from the Tutorpath protocol.

use crate::protocol::{ResolveParams, Response, INTERNAL_ERROR, SOURCE_ERROR};
use crate::SharedRelations;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, warn};
use tutor_core::{AliasSource, RelationSet, SourceError};
use tutor_graph::{plan_learning_path, LearningPath, PlanOptions};

/// Handles the graph.info method.
pub async fn handle_info(relations: SharedRelations, id: Option<Value>) -> Response {
    let set = relations.read().await;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct InfoResult {
        page_count: usize,
        teaches_count: usize,
        requires_count: usize,
        alias_count: usize,
        user_count: usize,
        version: &'static str,
    }

    Response::success(
        id,
        InfoResult {
            page_count: set.page_ids().len(),
            teaches_count: set.teaches.len(),
            requires_count: set.requires.len(),
            alias_count: set.aliases.len(),
            user_count: set.user_count(),
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Handles the path.resolve method.
///
/// Building and resolving is synchronous, so it runs on the blocking pool
/// with its own read guard.
pub async fn handle_resolve(
    relations: SharedRelations,
    id: Option<Value>,
    params: ResolveParams,
    max_rounds: usize,
) -> Response {
    let start = Instant::now();
    debug!("Resolve for {}: {:?}", params.user_id, params.pages);

    let user_id = params.user_id.clone();
    let planned = tokio::task::spawn_blocking(move || {
        let set = relations.blocking_read();
        resolve_path(&set, &params, max_rounds)
    })
    .await;

    let path = match planned {
        Ok(Ok(path)) => path,
        Ok(Err(e)) => {
            warn!("Resolve failed for {}: {}", user_id, e);
            return Response::error(id, SOURCE_ERROR, e.to_string());
        }
        Err(e) => {
            error!("Resolve task for {} did not finish: {}", user_id, e);
            return Response::error(id, INTERNAL_ERROR, e.to_string());
        }
    };

    #[derive(Serialize)]
    struct ResolveResult {
        #[serde(flatten)]
        path: LearningPath,
        #[serde(rename = "queryTime")]
        query_time: u64,
    }

    Response::success(
        id,
        ResolveResult {
            path,
            query_time: start.elapsed().as_millis() as u64,
        },
    )
}

fn resolve_path(
    set: &RelationSet,
    params: &ResolveParams,
    max_rounds: usize,
) -> Result<LearningPath, SourceError> {
    let page_ids = set.resolve_aliases(&params.pages)?;
    let options = PlanOptions {
        only_wanted: params.only_wanted,
        max_rounds,
    };
    let graph = plan_learning_path(set, &params.user_id, &page_ids, &options)?;
    Ok(LearningPath::from(&graph))
}
