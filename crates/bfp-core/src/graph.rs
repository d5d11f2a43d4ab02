//! Static waypoint graph.
//!
//! Nodes keep the order they were configured in; the nearest-node resolver
//! relies on that order for tie-breaking. Adjacency is kept exactly as
//! configured: one-way entries and references to undefined waypoints are
//! tolerated and only reported through [`WaypointGraph::audit`].

use crate::error::{ChartError, RouteError};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A named navigation fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointNode {
    pub id: String,
    #[serde(rename = "coords")]
    pub position: Point,
}

impl WaypointNode {
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// Read-only graph of waypoints. Edge weights are the planar distance between
/// the two endpoints and are never stored.
#[derive(Debug, Clone, Default)]
pub struct WaypointGraph {
    nodes: Vec<WaypointNode>,
    index: HashMap<String, usize>,
    adjacency: HashMap<String, Vec<String>>,
    /// Adjacency resolved to node indices, dangling targets dropped.
    edges: Vec<Vec<usize>>,
}

impl WaypointGraph {
    /// Build a graph from its nodes and adjacency lists.
    ///
    /// Duplicate entries inside one adjacency list are collapsed (first
    /// occurrence wins). Duplicate node ids are rejected.
    pub fn new<I, K, V>(nodes: Vec<WaypointNode>, adjacency: I) -> Result<Self, ChartError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            if !node.position.is_finite() {
                return Err(ChartError::InvalidCoordinates(node.id.clone()));
            }
            if index.insert(node.id.clone(), idx).is_some() {
                return Err(ChartError::DuplicateNode(node.id.clone()));
            }
        }

        let mut adjacency_map: HashMap<String, Vec<String>> = HashMap::new();
        for (key, neighbors) in adjacency {
            let list = adjacency_map.entry(key.into()).or_default();
            for neighbor in neighbors {
                let neighbor: String = neighbor.into();
                if !list.contains(&neighbor) {
                    list.push(neighbor);
                }
            }
        }

        let edges: Vec<Vec<usize>> = nodes
            .iter()
            .map(|node| {
                adjacency_map
                    .get(&node.id)
                    .map(|list| {
                        list.iter()
                            .filter_map(|neighbor| index.get(neighbor).copied())
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default()
            })
            .collect();

        Ok(Self {
            nodes,
            index,
            adjacency: adjacency_map,
            edges,
        })
    }

    /// Configured neighbors of `id`. Empty when nothing is configured.
    pub fn neighbors(&self, id: &str) -> &[String] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn position(&self, id: &str) -> Result<Point, RouteError> {
        self.node(id)
            .map(|node| node.position)
            .ok_or_else(|| RouteError::UnknownNode(id.to_string()))
    }

    pub fn node(&self, id: &str) -> Option<&WaypointNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in configured order.
    pub fn nodes(&self) -> &[WaypointNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, idx: usize) -> &WaypointNode {
        &self.nodes[idx]
    }

    pub(crate) fn edges_from(&self, idx: usize) -> &[usize] {
        &self.edges[idx]
    }

    /// Report data-authoring problems without changing the topology.
    pub fn audit(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        for node in &self.nodes {
            for neighbor in self.neighbors(&node.id) {
                if !self.contains(neighbor) {
                    issues.push(GraphIssue::DanglingNeighbor {
                        node: node.id.clone(),
                        neighbor: neighbor.clone(),
                    });
                } else if !self.neighbors(neighbor).contains(&node.id) {
                    issues.push(GraphIssue::AsymmetricEdge {
                        from: node.id.clone(),
                        to: neighbor.clone(),
                    });
                }
            }
        }

        let orphans: BTreeSet<&String> = self
            .adjacency
            .keys()
            .filter(|key| !self.contains(key))
            .collect();
        issues.extend(
            orphans
                .into_iter()
                .map(|key| GraphIssue::UndefinedAdjacencyKey(key.clone())),
        );

        issues
    }
}

/// A data problem found by [`WaypointGraph::audit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    /// `node` lists a neighbor that is not a defined waypoint.
    DanglingNeighbor { node: String, neighbor: String },
    /// `from` lists `to`, but `to` does not list `from`.
    AsymmetricEdge { from: String, to: String },
    /// An adjacency list is keyed by something that is not a waypoint.
    UndefinedAdjacencyKey(String),
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingNeighbor { node, neighbor } => {
                write!(f, "{node} lists undefined neighbor {neighbor}")
            }
            Self::AsymmetricEdge { from, to } => {
                write!(f, "{from} lists {to} but {to} does not list {from}")
            }
            Self::UndefinedAdjacencyKey(key) => {
                write!(f, "adjacency defined for {key}, which is not a waypoint")
            }
        }
    }
}
