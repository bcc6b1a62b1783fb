//! WebSocket server implementation.
//!
//! Handles client connections and routes messages to handlers.

use crate::handlers::{handle_info, handle_resolve};
use crate::protocol::{Request, ResolveParams, Response};
use crate::SharedRelations;
use futures_util::{SinkExt, StreamExt};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::RwLock;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use tutor_core::{RelationSet, MAX_BUILD_ROUNDS};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
    /// Builder round cap applied to every request.
    pub max_rounds: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 7432)),
            max_rounds: MAX_BUILD_ROUNDS,
        }
    }
}

/// The Tutorpath WebSocket server.
pub struct TutorServer {
    config: ServerConfig,
    relations: SharedRelations,
}

impl TutorServer {
    /// Creates a new server over the given relation data.
    pub fn new(relations: RelationSet, config: ServerConfig) -> Self {
        Self::new_with_shared(Arc::new(RwLock::new(relations)), config)
    }

    /// Creates a server over relation data shared with the caller.
    pub fn new_with_shared(relations: SharedRelations, config: ServerConfig) -> Self {
        Self { config, relations }
    }

    /// Runs the server, accepting connections forever.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Tutorpath server listening on {}", self.config.addr);

        loop {
            match listener.accept().await {
                Ok((stream, addr)) => {
                    debug!("New connection from {}", addr);
                    let relations = self.relations.clone();
                    let max_rounds = self.config.max_rounds;
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, addr, relations, max_rounds).await
                        {
                            error!("Connection error from {}: {}", addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handles a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    relations: SharedRelations,
    max_rounds: usize,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ws_stream = accept_async(stream).await?;
    info!("WebSocket connection established with {}", addr);

    let (mut write, mut read) = ws_stream.split();

    while let Some(msg) = read.next().await {
        let msg = match msg {
            Ok(m) => m,
            Err(e) => {
                warn!("Message error from {}: {}", addr, e);
                break;
            }
        };

        if msg.is_close() {
            debug!("Client {} disconnected", addr);
            break;
        }

        if msg.is_ping() {
            write.send(Message::Pong(msg.into_data())).await?;
            continue;
        }

        if msg.is_text() {
            let text = msg.to_text().unwrap_or("");
            let response = process_message(text, relations.clone(), max_rounds).await;
            let json = serde_json::to_string(&response)?;
            write.send(Message::Text(json)).await?;
        }
    }

    info!("Connection closed: {}", addr);
    Ok(())
}

/// Processes a JSON-RPC message and returns a response.
pub(crate) async fn process_message(
    text: &str,
    relations: SharedRelations,
    max_rounds: usize,
) -> Response {
    let request: Request = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(_) => return Response::parse_error(),
    };

    let id = request.id.clone();
    let method = request.method.as_str();

    debug!("Processing method: {}", method);

    match method {
        "graph.info" => handle_info(relations, id).await,

        "path.resolve" => match serde_json::from_value::<ResolveParams>(request.params) {
            Ok(params) => handle_resolve(relations, id, params, max_rounds).await,
            Err(e) => Response::invalid_params(id, e.to_string()),
        },

        _ => Response::method_not_found(id, method),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR, SOURCE_ERROR};
    use serde_json::json;
    use tutor_core::{Mastery, Relation};

    fn shared() -> SharedRelations {
        let mut set = RelationSet::new();
        set.aliases.insert("bayes".to_string(), "1".to_string());
        set.teaches.push(Relation::new("1", "2", 0));
        set.requires.push(Relation::new("3", "2", 0));
        set.teaches.push(Relation::new("3", "4", 0));
        set.set_mastery("alice", "3", Mastery::has());
        Arc::new(RwLock::new(set))
    }

    async fn call(request: serde_json::Value) -> Response {
        process_message(&request.to_string(), shared(), MAX_BUILD_ROUNDS).await
    }

    #[tokio::test]
    async fn test_graph_info() {
        let response = call(json!({"jsonrpc": "2.0", "method": "graph.info", "id": 1})).await;
        let result = response.result.unwrap();
        assert_eq!(result["teachesCount"], 2);
        assert_eq!(result["aliasCount"], 1);
        assert_eq!(result["userCount"], 1);
        assert_eq!(response.id, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_resolve_by_alias() {
        let response = call(json!({
            "jsonrpc": "2.0",
            "method": "path.resolve",
            "params": {"userId": "bob", "pages": ["bayes"]},
            "id": "a"
        }))
        .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["pageIds"], json!(["1"]));
        assert_eq!(result["requirementMap"]["1"]["bestTutorId"], "2");
        assert_eq!(result["requirementMap"]["1"]["cost"], 2);
        assert_eq!(result["studyOrder"], json!(["4", "2"]));
        assert!(result.get("queryTime").is_some());
    }

    #[tokio::test]
    async fn test_resolve_respects_mastery() {
        let response = call(json!({
            "method": "path.resolve",
            "params": {"userId": "alice", "pages": ["1"]},
            "id": 2
        }))
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["requirementMap"]["1"]["cost"], 1);
        assert!(result["requirementMap"].get("3").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_resolves_share_relations() {
        let relations = shared();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let relations = relations.clone();
                let request = json!({
                    "method": "path.resolve",
                    "params": {"userId": "bob", "pages": ["bayes"]},
                    "id": i
                });
                tokio::spawn(async move {
                    process_message(&request.to_string(), relations, MAX_BUILD_ROUNDS).await
                })
            })
            .collect();

        for (i, task) in tasks.into_iter().enumerate() {
            let response = task.await.unwrap();
            assert_eq!(response.id, Some(json!(i)));
            assert_eq!(response.result.unwrap()["studyOrder"], json!(["4", "2"]));
        }
    }

    #[tokio::test]
    async fn test_unknown_alias() {
        let response = call(json!({
            "method": "path.resolve",
            "params": {"userId": "bob", "pages": ["nope"]},
            "id": 3
        }))
        .await;

        assert_eq!(response.error.unwrap().code, SOURCE_ERROR);
    }

    #[tokio::test]
    async fn test_invalid_params() {
        let response = call(json!({"method": "path.resolve", "params": {}, "id": 4})).await;
        assert_eq!(response.error.unwrap().code, INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = call(json!({"method": "page.delete", "id": 5})).await;
        assert_eq!(response.error.unwrap().code, METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = process_message("{not json", shared(), MAX_BUILD_ROUNDS).await;
        assert_eq!(response.error.unwrap().code, PARSE_ERROR);
        assert!(response.id.is_none());
    }
}
