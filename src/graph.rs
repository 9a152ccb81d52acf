// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::hash_map::{Entry, HashMap};

use crate::{earth_distance, Edge, Node, NodeIndex};

/// Error conditions which may occur when building a [Graph].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(i64),

    #[error("invalid node: {0}")]
    InvalidNode(NodeIndex),

    #[error("negative cost of edge {from} -> {to}: {cost}")]
    NegativeCost {
        from: NodeIndex,
        to: NodeIndex,
        cost: f64,
    },

    #[error("non-finite cost of edge {from} -> {to}: {cost}")]
    NonFiniteCost {
        from: NodeIndex,
        to: NodeIndex,
        cost: f64,
    },
}

/// Represents a road network as a set of [Nodes](Node)
/// and one-way [Edges](Edge) between them.
///
/// Nodes live in an arena and are addressed by [NodeIndex] handles.
/// Once added, nodes are never removed, so handles stay valid for the
/// whole lifetime of the graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Vec<Edge>>,
    by_id: HashMap<i64, NodeIndex>,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns an iterator over handles of all nodes in the graph, in insertion order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex::new)
    }

    /// Checks whether the handle refers to a node of this graph.
    pub fn contains(&self, index: NodeIndex) -> bool {
        index.index() < self.nodes.len()
    }

    /// Retrieves a [Node] by its handle.
    pub fn get_node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.index())
    }

    /// Finds the handle of a [Node] with the provided external id.
    pub fn find_node(&self, id: i64) -> Option<NodeIndex> {
        self.by_id.get(&id).copied()
    }

    /// Adds a new [Node] to the graph, returning its handle.
    ///
    /// Node ids must be unique; adding a node with an already-used id fails
    /// with [GraphError::DuplicateNode].
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex, GraphError> {
        match self.by_id.entry(node.id) {
            Entry::Occupied(_) => Err(GraphError::DuplicateNode(node.id)),
            Entry::Vacant(e) => {
                let index = NodeIndex::new(self.nodes.len());
                e.insert(index);
                self.nodes.push(node);
                self.edges.push(Vec::default());
                Ok(index)
            }
        }
    }

    /// Creates or updates an [Edge] from one node to another.
    ///
    /// Both nodes must exist, and the cost must be finite and non-negative -
    /// shortest-path search relies on that.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, cost: f64) -> Result<(), GraphError> {
        if !self.contains(from) {
            return Err(GraphError::InvalidNode(from));
        }
        if !self.contains(to) {
            return Err(GraphError::InvalidNode(to));
        }
        if !cost.is_finite() {
            return Err(GraphError::NonFiniteCost { from, to, cost });
        }
        if cost < 0.0 {
            return Err(GraphError::NegativeCost { from, to, cost });
        }

        let edges = &mut self.edges[from.index()];
        if let Some(candidate) = edges.iter_mut().find(|e| e.to == to) {
            candidate.cost = cost;
        } else {
            edges.push(Edge { to, cost });
        }
        Ok(())
    }

    /// Gets all outgoing [Edges](Edge) from a node, in insertion order.
    /// Unknown nodes have no edges.
    pub fn get_edges(&self, from: NodeIndex) -> &[Edge] {
        self.edges
            .get(from.index())
            .map(|e| e.as_slice())
            .unwrap_or_default()
    }

    /// Returns an iterator over the direct neighbors of a node.
    pub fn connections(&self, from: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.get_edges(from).iter().map(|e| e.to)
    }

    /// Gets the cost of an [Edge] from one node to another.
    /// If such an edge doesn't exist, returns [f64::INFINITY].
    pub fn get_edge(&self, from: NodeIndex, to: NodeIndex) -> f64 {
        self.get_edges(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.cost)
            .unwrap_or(f64::INFINITY)
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// and is not suitable for large graphs.
    pub fn find_nearest_node(&self, lat: f32, lon: f32) -> Option<NodeIndex> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, nd)| (earth_distance(lat, lon, nd.lat, nd.lon), idx))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, idx)| NodeIndex::new(idx))
    }
}
