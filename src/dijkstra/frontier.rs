// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::NodeIndex;

/// Set of nodes whose shortest distance is not yet finalized,
/// together with their tentative distances.
///
/// Implementations must agree on the extraction order: the member with the smallest
/// tentative distance comes first, and ties are broken by the lowest [NodeIndex].
/// This keeps routes deterministic regardless of the chosen data structure.
pub trait Frontier {
    /// Makes every node in `0..node_count` a member with an infinite distance,
    /// except for `source`, which starts at zero.
    fn initialize(&mut self, node_count: usize, source: NodeIndex);

    /// Selects, without removing, the member with the smallest tentative distance.
    ///
    /// Returns `None` if the frontier is empty, or if all remaining members
    /// have an infinite distance (none of them is reachable).
    fn extract_minimum(&mut self) -> Option<NodeIndex>;

    /// Removes a node from the frontier, finalizing its distance.
    fn remove(&mut self, node: NodeIndex);

    /// Checks whether a node is still a member of the frontier.
    fn contains(&self, node: NodeIndex) -> bool;

    /// Lowers the tentative distance of a member.
    /// Non-members and non-improving distances are ignored.
    fn decrease_key(&mut self, node: NodeIndex, distance: f64);

    /// Returns the number of members.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Tracks membership and tentative distances shared by both [Frontier] implementations.
#[derive(Debug, Default, Clone)]
struct Members {
    member: Vec<bool>,
    distance: Vec<f64>,
    len: usize,
}

impl Members {
    fn initialize(&mut self, node_count: usize, source: NodeIndex) {
        self.member.clear();
        self.member.resize(node_count, true);
        self.distance.clear();
        self.distance.resize(node_count, f64::INFINITY);
        if let Some(d) = self.distance.get_mut(source.index()) {
            *d = 0.0;
        }
        self.len = node_count;
    }

    #[inline]
    fn contains(&self, node: NodeIndex) -> bool {
        self.member.get(node.index()).copied().unwrap_or(false)
    }

    fn remove(&mut self, node: NodeIndex) {
        if let Some(m) = self.member.get_mut(node.index()) {
            if *m {
                *m = false;
                self.len -= 1;
            }
        }
    }

    /// Stores an improved distance, returning `false` if nothing has changed.
    fn decrease(&mut self, node: NodeIndex, distance: f64) -> bool {
        if self.contains(node) && distance < self.distance[node.index()] {
            self.distance[node.index()] = distance;
            true
        } else {
            false
        }
    }
}

/// [Frontier] which scans all nodes to find the minimum.
///
/// Finding the minimum is O(V), giving O(V² + E) for a whole search.
/// That's fine for small, city-sized graphs; use [HeapFrontier] for anything larger.
#[derive(Debug, Default, Clone)]
pub struct LinearFrontier(Members);

impl LinearFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for LinearFrontier {
    fn initialize(&mut self, node_count: usize, source: NodeIndex) {
        self.0.initialize(node_count, source);
    }

    fn extract_minimum(&mut self) -> Option<NodeIndex> {
        let mut best = None;
        let mut best_distance = f64::INFINITY;

        for (idx, (&member, &distance)) in self.0.member.iter().zip(&self.0.distance).enumerate() {
            // Strict comparison keeps the first (lowest index) node on ties
            if member && distance < best_distance {
                best = Some(NodeIndex::new(idx));
                best_distance = distance;
            }
        }

        best
    }

    fn remove(&mut self, node: NodeIndex) {
        self.0.remove(node);
    }

    fn contains(&self, node: NodeIndex) -> bool {
        self.0.contains(node)
    }

    fn decrease_key(&mut self, node: NodeIndex, distance: f64) {
        self.0.decrease(node, distance);
    }

    fn len(&self) -> usize {
        self.0.len
    }
}

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    at: NodeIndex,
    distance: f64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // NOTE: We revert the order of comparison,
        // as lower distances (and lower indices on ties) are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.at.cmp(&self.at))
    }
}

/// [Frontier] backed by a binary heap, giving O((V + E) log V) for a whole search.
///
/// Instead of a decrease-key operation on the heap, an improved distance pushes
/// a new item; outdated items are discarded when they reach the top.
/// Nodes with an infinite distance never enter the heap.
#[derive(Debug, Default, Clone)]
pub struct HeapFrontier {
    queue: BinaryHeap<QueueItem>,
    members: Members,
}

impl HeapFrontier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Frontier for HeapFrontier {
    fn initialize(&mut self, node_count: usize, source: NodeIndex) {
        self.members.initialize(node_count, source);
        self.queue.clear();
        if self.members.contains(source) {
            self.queue.push(QueueItem {
                at: source,
                distance: 0.0,
            });
        }
    }

    fn extract_minimum(&mut self) -> Option<NodeIndex> {
        while let Some(&item) = self.queue.peek() {
            if self.members.contains(item.at)
                && item.distance <= self.members.distance[item.at.index()]
            {
                return Some(item.at);
            }
            self.queue.pop();
        }
        None
    }

    fn remove(&mut self, node: NodeIndex) {
        self.members.remove(node);
    }

    fn contains(&self, node: NodeIndex) -> bool {
        self.members.contains(node)
    }

    fn decrease_key(&mut self, node: NodeIndex, distance: f64) {
        if self.members.decrease(node, distance) {
            self.queue.push(QueueItem { at: node, distance });
        }
    }

    fn len(&self) -> usize {
        self.members.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(idx: usize) -> NodeIndex {
        NodeIndex::new(idx)
    }

    /// Finalizes all reachable members, returning them in extraction order.
    fn drain<F: Frontier>(f: &mut F) -> Vec<NodeIndex> {
        let mut order = Vec::new();
        while let Some(u) = f.extract_minimum() {
            f.remove(u);
            order.push(u);
        }
        order
    }

    fn check_initialize<F: Frontier + Default>() {
        let mut f = F::default();
        f.initialize(4, n(2));

        assert_eq!(f.len(), 4);
        assert!((0..4).all(|i| f.contains(n(i))));
        assert!(!f.contains(n(4)));
        assert_eq!(f.extract_minimum(), Some(n(2)));

        // Only the source is reachable
        assert_eq!(drain(&mut f), vec![n(2)]);
        assert_eq!(f.len(), 3);
        assert!(!f.is_empty());
    }

    fn check_ties_prefer_lower_index<F: Frontier + Default>() {
        let mut f = F::default();
        f.initialize(5, n(0));
        f.remove(n(0));
        f.decrease_key(n(4), 2.0);
        f.decrease_key(n(3), 1.0);
        f.decrease_key(n(1), 2.0);
        f.decrease_key(n(2), 1.0);

        assert_eq!(drain(&mut f), vec![n(2), n(3), n(1), n(4)]);
        assert!(f.is_empty());
    }

    fn check_removed_nodes_stay_removed<F: Frontier + Default>() {
        let mut f = F::default();
        f.initialize(3, n(0));
        f.remove(n(1));
        f.remove(n(1));
        f.decrease_key(n(1), 0.5);

        assert_eq!(f.len(), 2);
        assert!(!f.contains(n(1)));
        assert_eq!(drain(&mut f), vec![n(0)]);
    }

    fn check_decrease_key_only_lowers<F: Frontier + Default>() {
        let mut f = F::default();
        f.initialize(3, n(0));
        f.remove(n(0));
        f.decrease_key(n(1), 5.0);
        f.decrease_key(n(2), 3.0);
        f.decrease_key(n(2), 4.0);
        assert_eq!(f.extract_minimum(), Some(n(2)));

        f.decrease_key(n(1), 1.0);
        assert_eq!(f.extract_minimum(), Some(n(1)));
        assert_eq!(drain(&mut f), vec![n(1), n(2)]);
    }

    fn check_reinitialize<F: Frontier + Default>() {
        let mut f = F::default();
        f.initialize(3, n(0));
        f.decrease_key(n(1), 1.0);
        drain(&mut f);

        f.initialize(2, n(1));
        assert_eq!(f.len(), 2);
        assert_eq!(drain(&mut f), vec![n(1)]);
    }

    macro_rules! frontier_tests {
        ($name:ident, $frontier:ty) => {
            mod $name {
                use super::*;

                #[test]
                fn initialize() {
                    check_initialize::<$frontier>();
                }

                #[test]
                fn ties_prefer_lower_index() {
                    check_ties_prefer_lower_index::<$frontier>();
                }

                #[test]
                fn removed_nodes_stay_removed() {
                    check_removed_nodes_stay_removed::<$frontier>();
                }

                #[test]
                fn decrease_key_only_lowers() {
                    check_decrease_key_only_lowers::<$frontier>();
                }

                #[test]
                fn reinitialize() {
                    check_reinitialize::<$frontier>();
                }
            }
        };
    }

    frontier_tests!(linear, LinearFrontier);
    frontier_tests!(heap, HeapFrontier);
}
