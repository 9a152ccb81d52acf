// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod engine;
mod error;
mod frontier;
mod route;

pub use engine::{find_route, Dijkstra, SearchState};
pub use error::RoutingError;
pub use frontier::{Frontier, HeapFrontier, LinearFrontier};
pub use route::{reconstruct, Route};
