// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeIndex;

/// Cheapest sequence of nodes between two points of a [Graph](crate::Graph),
/// as returned by [Dijkstra::compute_shortest_path](crate::Dijkstra::compute_shortest_path).
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    nodes: Vec<NodeIndex>,
    cost: f64,
}

impl Route {
    pub(super) fn new(nodes: Vec<NodeIndex>, cost: f64) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, cost }
    }

    /// Nodes of the route, from the source to the destination (both inclusive).
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.nodes
    }

    /// Total cost of all edges along the route.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of nodes on the route; always at least 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn source(&self) -> NodeIndex {
        self.nodes[0]
    }

    pub fn destination(&self) -> NodeIndex {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn into_nodes(self) -> Vec<NodeIndex> {
        self.nodes
    }
}

/// Walks predecessor labels (indexed by [NodeIndex]) back from `destination`,
/// and returns the path in source-to-destination order.
///
/// Returns `None` if the walk ends at a node other than `source`,
/// meaning `destination` was not reached by the search.
pub fn reconstruct(
    predecessor: &[Option<NodeIndex>],
    source: NodeIndex,
    destination: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut path = vec![destination];
    let mut last = destination;

    while let Some(nd) = predecessor.get(last.index()).copied().flatten() {
        path.push(nd);
        last = nd;
    }

    if last != source {
        return None;
    }

    path.reverse();
    Some(path)
}
