// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::NodeIndex;

/// Error conditions which may occur during [compute_shortest_path](crate::Dijkstra::compute_shortest_path)
/// or [find_route](crate::find_route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// The start or end node doesn't exist in the bound graph.
    #[error("invalid node: {0}")]
    InvalidNode(NodeIndex),

    /// No sequence of edges leads from the start to the end node.
    #[error("no path from {from} to {to}")]
    NoPathFound { from: NodeIndex, to: NodeIndex },
}
