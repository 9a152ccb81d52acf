// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use log::{debug, trace};

use super::{reconstruct, Frontier, HeapFrontier, Route, RoutingError};
use crate::{Edge, Graph, NodeIndex};

/// Lifecycle of a [Dijkstra] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No query has been run since the engine was created or rebound.
    Uninitialized,

    /// The label-setting loop is in progress.
    Running,

    /// The last query has reached its destination and produced a [Route].
    Finalizing,

    /// The last query has exhausted all reachable nodes without reaching its destination.
    NoPathFound,
}

/// Single-source shortest-path search using
/// [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm).
///
/// The engine is bound to a [Graph] and keeps per-query working state
/// (distance and predecessor labels, and the [Frontier]), which is reset on every
/// [compute_shortest_path](Self::compute_shortest_path). The search always finalizes every
/// node reachable from the source, so after a query the labels describe
/// the complete shortest-path tree, available through [distance](Self::distance)
/// and [predecessor](Self::predecessor).
///
/// Queries take `&mut self`; use one engine per logical agent to route concurrently.
#[derive(Debug, Clone)]
pub struct Dijkstra<'g, F: Frontier = HeapFrontier> {
    graph: &'g Graph,
    frontier: F,
    distance: Vec<f64>,
    predecessor: Vec<Option<NodeIndex>>,
    state: SearchState,
    steps: usize,
}

impl<'g> Dijkstra<'g> {
    /// Creates an engine bound to the provided graph, using a [HeapFrontier].
    pub fn new(graph: &'g Graph) -> Self {
        Self::with_frontier(graph, HeapFrontier::default())
    }
}

impl<'g, F: Frontier> Dijkstra<'g, F> {
    /// Creates an engine bound to the provided graph, using a custom [Frontier].
    pub fn with_frontier(graph: &'g Graph, frontier: F) -> Self {
        Self {
            graph,
            frontier,
            distance: Vec::default(),
            predecessor: Vec::default(),
            state: SearchState::Uninitialized,
            steps: 0,
        }
    }

    /// Returns the graph the engine is bound to.
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Binds the engine to a different graph, discarding results of the last query.
    pub fn set_graph(&mut self, graph: &'g Graph) {
        self.graph = graph;
        self.distance.clear();
        self.predecessor.clear();
        self.state = SearchState::Uninitialized;
        self.steps = 0;
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Number of nodes finalized by the last query.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Shortest distance from the source of the last query to `node`,
    /// or `None` if `node` was not reached.
    pub fn distance(&self, node: NodeIndex) -> Option<f64> {
        self.distance
            .get(node.index())
            .copied()
            .filter(|d| d.is_finite())
    }

    /// Node preceding `node` on its shortest path from the source of the last query.
    /// `None` for the source itself and for unreached nodes.
    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.predecessor.get(node.index()).copied().flatten()
    }

    /// Finds the cheapest [Route] from `source` to `destination`.
    ///
    /// Fails with [RoutingError::InvalidNode] if any of the nodes doesn't belong
    /// to the bound graph, and with [RoutingError::NoPathFound] if the destination
    /// can't be reached from the source.
    pub fn compute_shortest_path(
        &mut self,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> Result<Route, RoutingError> {
        for node in [source, destination] {
            if !self.graph.contains(node) {
                return Err(RoutingError::InvalidNode(node));
            }
        }

        debug!("searching for the shortest path {} -> {}", source, destination);
        self.initialize(source);
        self.run();

        match reconstruct(&self.predecessor, source, destination) {
            Some(nodes) => {
                self.state = SearchState::Finalizing;
                let cost = self.distance[destination.index()];
                debug!(
                    "found path {} -> {} over {} nodes with cost {} ({} nodes finalized)",
                    source,
                    destination,
                    nodes.len(),
                    cost,
                    self.steps
                );
                Ok(Route::new(nodes, cost))
            }

            None => {
                self.state = SearchState::NoPathFound;
                debug!(
                    "no path {} -> {} ({} nodes finalized)",
                    source, destination, self.steps
                );
                Err(RoutingError::NoPathFound {
                    from: source,
                    to: destination,
                })
            }
        }
    }

    fn initialize(&mut self, source: NodeIndex) {
        let node_count = self.graph.len();

        self.distance.clear();
        self.distance.resize(node_count, f64::INFINITY);
        self.distance[source.index()] = 0.0;

        self.predecessor.clear();
        self.predecessor.resize(node_count, None);

        self.frontier.initialize(node_count, source);
        self.state = SearchState::Running;
        self.steps = 0;
    }

    fn run(&mut self) {
        while !self.frontier.is_empty() {
            // No minimum means all remaining nodes are unreachable
            let Some(u) = self.frontier.extract_minimum() else {
                break;
            };

            self.frontier.remove(u);
            self.steps += 1;

            let graph = self.graph;
            let u_distance = self.distance[u.index()];
            for &Edge { to: v, cost } in graph.get_edges(u) {
                // Finalized nodes can't be improved
                if self.frontier.contains(v) {
                    self.relax(u, v, u_distance + cost);
                }
            }
        }
    }

    fn relax(&mut self, u: NodeIndex, v: NodeIndex, candidate: f64) {
        // Strict comparison keeps the first-discovered predecessor on ties
        if candidate < self.distance[v.index()] {
            trace!("relaxing {} -> {}: {}", u, v, candidate);
            self.distance[v.index()] = candidate;
            self.predecessor[v.index()] = Some(u);
            self.frontier.decrease_key(v, candidate);
        }
    }
}

/// Finds the cheapest [Route] between two nodes using a fresh [Dijkstra] engine.
pub fn find_route(
    g: &Graph,
    source: NodeIndex,
    destination: NodeIndex,
) -> Result<Route, RoutingError> {
    Dijkstra::new(g).compute_shortest_path(source, destination)
}
