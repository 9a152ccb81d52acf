//! Property tests of the shortest-path engine on random graphs.

use proptest::prelude::*;
use proptest::sample::Index;

use roadpath::{Dijkstra, Graph, LinearFrontier, Node, NodeIndex, RoutingError};

/// Builds a graph with `n` nodes and the given edges. Costs are small integers,
/// so that sums of costs are exact.
fn build(n: usize, edges: &[(usize, usize, u8)]) -> Graph {
    let mut g = Graph::new();
    for id in 0..n {
        g.add_node(Node {
            id: id as i64 + 1,
            lat: 0.0,
            lon: 0.0,
        })
        .unwrap();
    }
    for &(from, to, cost) in edges {
        g.add_edge(NodeIndex::new(from), NodeIndex::new(to), cost as f64)
            .unwrap();
    }
    g
}

fn graphs() -> impl Strategy<Value = Graph> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, 0..n, 0u8..20), 0..n * 3).prop_map(move |e| build(n, &e))
    })
}

/// Reference distances computed with the Bellman-Ford algorithm.
fn bellman_ford(g: &Graph, source: NodeIndex) -> Vec<f64> {
    let mut dist = vec![f64::INFINITY; g.len()];
    dist[source.index()] = 0.0;

    for _ in 0..g.len() {
        for u in g.indices() {
            for e in g.get_edges(u) {
                let candidate = dist[u.index()] + e.cost;
                if candidate < dist[e.to.index()] {
                    dist[e.to.index()] = candidate;
                }
            }
        }
    }

    dist
}

proptest! {
    #[test]
    fn routes_are_optimal(g in graphs(), source in any::<Index>()) {
        let source = NodeIndex::new(source.index(g.len()));
        let expected = bellman_ford(&g, source);
        let mut engine = Dijkstra::new(&g);

        for destination in g.indices() {
            match engine.compute_shortest_path(source, destination) {
                Ok(route) => {
                    prop_assert_eq!(route.source(), source);
                    prop_assert_eq!(route.destination(), destination);
                    prop_assert_eq!(route.cost(), expected[destination.index()]);
                    prop_assert_eq!(engine.distance(destination), Some(route.cost()));

                    let walked: f64 = route
                        .nodes()
                        .windows(2)
                        .map(|pair| g.get_edge(pair[0], pair[1]))
                        .sum();
                    prop_assert_eq!(walked, route.cost());
                }

                Err(e) => {
                    prop_assert_eq!(e, RoutingError::NoPathFound { from: source, to: destination });
                    prop_assert!(expected[destination.index()].is_infinite());
                    prop_assert_eq!(engine.distance(destination), None);
                }
            }
        }
    }

    #[test]
    fn frontiers_finalize_identically(g in graphs(), source in any::<Index>()) {
        let source = NodeIndex::new(source.index(g.len()));
        let mut heap = Dijkstra::new(&g);
        let mut linear = Dijkstra::with_frontier(&g, LinearFrontier::new());

        for destination in g.indices() {
            prop_assert_eq!(
                heap.compute_shortest_path(source, destination),
                linear.compute_shortest_path(source, destination)
            );
            prop_assert_eq!(heap.steps(), linear.steps());

            for node in g.indices() {
                prop_assert_eq!(heap.distance(node), linear.distance(node));
                prop_assert_eq!(heap.predecessor(node), linear.predecessor(node));
            }
        }
    }

    #[test]
    fn repeated_queries_are_idempotent(
        g in graphs(),
        source in any::<Index>(),
        destination in any::<Index>()
    ) {
        let source = NodeIndex::new(source.index(g.len()));
        let destination = NodeIndex::new(destination.index(g.len()));
        let mut engine = Dijkstra::new(&g);

        let first = engine.compute_shortest_path(source, destination);
        let second = engine.compute_shortest_path(source, destination);
        prop_assert_eq!(first, second);
    }
}
