//! Export of learning graphs.
//!
//! `LearningPath` is what callers serialize: the targets, both node maps
//! and the study order. For visual inspection the graph can also be turned
//! into a petgraph `DiGraph` and rendered as Graphviz DOT.

use crate::edge::{EdgeKind, GraphEdge};
use crate::graph::LearningGraph;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tutor_core::{RequirementNode, TutorNode};

/// A resolved learning path, ready to be serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub page_ids: Vec<String>,
    pub requirement_map: BTreeMap<String, RequirementNode>,
    pub tutor_map: BTreeMap<String, TutorNode>,
    pub study_order: Vec<String>,
}

impl From<&LearningGraph> for LearningPath {
    fn from(graph: &LearningGraph) -> Self {
        Self {
            page_ids: graph.page_ids.clone(),
            requirement_map: graph
                .requirements
                .iter()
                .map(|(id, node)| (id.clone(), node.clone()))
                .collect(),
            tutor_map: graph
                .tutors
                .iter()
                .map(|(id, node)| (id.clone(), node.clone()))
                .collect(),
            study_order: graph.study_order(),
        }
    }
}

/// Which side of the bipartite graph a node sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Requirement,
    Tutor,
}

/// Node weight of the exported petgraph graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    pub page_id: String,
    pub role: NodeRole,
    pub cost: i64,
}

impl fmt::Display for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            NodeRole::Requirement => "req",
            NodeRole::Tutor => "tutor",
        };
        write!(f, "{} {} ({})", role, self.page_id, self.cost)
    }
}

impl LearningGraph {
    /// Returns all edges with source and target ids, in discovery order.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        let taught_by = self.requirements().flat_map(|req| {
            req.tutor_ids.iter().map(move |tutor_id| GraphEdge {
                source: req.page_id.clone(),
                target: tutor_id.clone(),
                kind: EdgeKind::TaughtBy,
            })
        });
        let requires = self.tutors().flat_map(|tutor| {
            tutor.requirement_ids.iter().map(move |req_id| GraphEdge {
                source: tutor.page_id.clone(),
                target: req_id.clone(),
                kind: EdgeKind::Requires,
            })
        });

        taught_by.chain(requires).collect()
    }

    /// Builds a petgraph copy of this graph.
    ///
    /// A page that is both a requirement and a tutor becomes two nodes.
    pub fn to_digraph(&self) -> DiGraph<PathNode, EdgeKind> {
        let mut digraph = DiGraph::new();
        let mut req_index: HashMap<&str, NodeIndex> = HashMap::new();
        let mut tutor_index: HashMap<&str, NodeIndex> = HashMap::new();

        for req in self.requirements() {
            let idx = digraph.add_node(PathNode {
                page_id: req.page_id.clone(),
                role: NodeRole::Requirement,
                cost: req.cost,
            });
            req_index.insert(req.page_id.as_str(), idx);
        }
        for tutor in self.tutors() {
            let idx = digraph.add_node(PathNode {
                page_id: tutor.page_id.clone(),
                role: NodeRole::Tutor,
                cost: tutor.cost,
            });
            tutor_index.insert(tutor.page_id.as_str(), idx);
        }

        for edge in self.export_edges() {
            let (from, to) = match edge.kind {
                EdgeKind::TaughtBy => (
                    req_index.get(edge.source.as_str()),
                    tutor_index.get(edge.target.as_str()),
                ),
                EdgeKind::Requires => (
                    tutor_index.get(edge.source.as_str()),
                    req_index.get(edge.target.as_str()),
                ),
            };
            if let (Some(from), Some(to)) = (from, to) {
                digraph.add_edge(*from, *to, edge.kind);
            }
        }

        digraph
    }

    /// Renders the graph as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let digraph = self.to_digraph();
        format!("{}", Dot::new(&digraph))
    }
}
