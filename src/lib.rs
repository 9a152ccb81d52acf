// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Shortest-path routing over road-network graphs.
//!
//! A [Graph] is an arena of [Nodes](Node) addressed by [NodeIndex] handles, with
//! one-way [Edges](Edge) carrying non-negative costs. [Dijkstra] runs a label-setting
//! search from a source node over the whole graph and returns the cheapest [Route]
//! to a destination. Graphs can be built by hand, or loaded from
//! [OpenStreetMap](https://www.openstreetmap.org/) data with the [osm] module.
//!
//! # Example
//!
//! ```
//! let mut g = roadpath::Graph::new();
//! let a = g.add_node(roadpath::Node { id: 1, lat: 0.0, lon: 0.0 }).unwrap();
//! let b = g.add_node(roadpath::Node { id: 2, lat: 0.0, lon: 0.1 }).unwrap();
//! let c = g.add_node(roadpath::Node { id: 3, lat: 0.1, lon: 0.1 }).unwrap();
//! g.add_edge(a, b, 1.0).unwrap();
//! g.add_edge(b, c, 2.0).unwrap();
//! g.add_edge(a, c, 5.0).unwrap();
//!
//! let mut engine = roadpath::Dijkstra::new(&g);
//! let route = engine.compute_shortest_path(a, c).expect("failed to find route");
//!
//! assert_eq!(route.nodes(), &[a, b, c]);
//! assert_eq!(route.cost(), 3.0);
//! ```

mod dijkstra;
mod distance;
mod graph;
pub mod osm;

pub use dijkstra::{
    find_route, reconstruct, Dijkstra, Frontier, HeapFrontier, LinearFrontier, Route,
    RoutingError, SearchState,
};
pub use distance::earth_distance;
pub use graph::{Graph, GraphError};

/// Stable handle of a [Node] inside a [Graph].
///
/// Handles are assigned densely, in insertion order, starting from zero,
/// and are only meaningful for the [Graph] which produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Represents an element of the [Graph].
///
/// `id` is the external identity of the node (e.g. an OpenStreetMap node id)
/// and must be unique within a graph. The position is used for nearest-node lookups
/// and for presenting routes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: i64,
    pub lat: f32,
    pub lon: f32,
}

/// Represents an outgoing (one-way) connection from a specific [Node].
///
/// `cost` is always finite and non-negative, which is enforced by [Graph::add_edge].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeIndex,
    pub cost: f64,
}
