//! Single-source shortest paths over non-negative link weights.
//!
//! The priority queue has no decrease-key. A `member` array records which
//! ids are currently queued; a relaxed node is inserted only if it is not
//! already waiting, and every relaxation compares against the live
//! `distances` entry rather than the priority it was queued with.

use std::cmp::Ordering;
use std::fmt;

use tracing::debug;

use crate::error::Result;
use crate::graph::{MatrixGraph, NodeId};
use crate::queue::PriorityQueue;
use crate::weight::Weight;

/// Tentative or final distance of a node from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distance<W> {
    Finite(W),
    /// Enabled but not reached.
    Infinite,
    /// The slot holds no node.
    Absent,
}

/// Shortest-path tree rooted at `source`, as parent pointers plus distances.
#[derive(Debug, Clone)]
pub struct ShortestPathTree<W> {
    source: NodeId,
    parents: Vec<Option<NodeId>>,
    distances: Vec<Distance<W>>,
}

impl<W: Weight> ShortestPathTree<W> {
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Shortest distance to `node`, None if unreachable or absent.
    pub fn distance(&self, node: NodeId) -> Option<W> {
        match self.distances.get(node) {
            Some(Distance::Finite(d)) => Some(*d),
            _ => None,
        }
    }

    pub fn distance_state(&self, node: NodeId) -> Distance<W> {
        self.distances.get(node).copied().unwrap_or(Distance::Absent)
    }

    /// Predecessor of `node` on its shortest path. None for the source and
    /// for unreachable nodes.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node).copied().flatten()
    }

    pub fn parents(&self) -> &[Option<NodeId>] {
        &self.parents
    }

    pub fn distances(&self) -> &[Distance<W>] {
        &self.distances
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance(node).is_some()
    }

    /// Number of nodes with a finite distance, source included.
    pub fn reachable_count(&self) -> usize {
        self.distances
            .iter()
            .filter(|d| matches!(d, Distance::Finite(_)))
            .count()
    }

    /// Walk parent pointers from `target` back to the source.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.is_reachable(target) {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }

        path.reverse();
        Some(path)
    }

    /// Tree edges as `(parent, node, distance of node)`, ascending by node.
    pub fn tree_edges(&self) -> impl Iterator<Item = (NodeId, NodeId, W)> + '_ {
        self.parents
            .iter()
            .enumerate()
            .filter_map(move |(node, parent)| {
                let parent = (*parent)?;
                let distance = self.distance(node)?;
                Some((parent, node, distance))
            })
    }
}

impl<W: Weight + fmt::Display> fmt::Display for ShortestPathTree<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SPT from {} (from, to, cost)", self.source)?;
        for (parent, node, distance) in self.tree_edges() {
            writeln!(f, "({}, {}, {})", parent, node, distance)?;
        }
        Ok(())
    }
}

/// Queue entry ordered by priority, then node id.
#[derive(Debug, Clone, Copy)]
struct QueueEntry<W> {
    priority: W,
    node: NodeId,
}

impl<W: Weight> PartialEq for QueueEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for QueueEntry<W> {}

impl<W: Weight> PartialOrd for QueueEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for QueueEntry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // stored weights are never NaN
        self.priority
            .partial_cmp(&other.priority)
            .unwrap_or(Ordering::Equal)
            .then(self.node.cmp(&other.node))
    }
}

/// Shortest paths from `start` to every node reachable over outgoing links.
pub fn dijkstra<L, W: Weight>(
    graph: &MatrixGraph<L, W>,
    start: NodeId,
) -> Result<ShortestPathTree<W>> {
    graph.row(start)?;

    let capacity = graph.capacity();
    let mut distances: Vec<Distance<W>> = (0..capacity)
        .map(|id| {
            if graph.is_node_enabled(id) {
                Distance::Infinite
            } else {
                Distance::Absent
            }
        })
        .collect();
    let mut parents: Vec<Option<NodeId>> = vec![None; capacity];
    let mut member = vec![false; capacity];
    let mut queue = PriorityQueue::with_capacity(graph.node_count());

    distances[start] = Distance::Finite(W::zero());
    queue.insert(QueueEntry {
        priority: W::zero(),
        node: start,
    });
    member[start] = true;

    let mut extractions = 0usize;
    let mut relaxations = 0usize;

    while let Some(u) = queue.min().map(|entry| entry.node) {
        queue.delete_min();
        member[u] = false;
        extractions += 1;

        let Distance::Finite(base) = distances[u] else {
            continue;
        };

        for (v, weight) in graph.successors(u) {
            // a sum past the type's range can never be shorter
            let Some(candidate) = base.checked_add(weight) else {
                continue;
            };
            let improves = match distances[v] {
                Distance::Finite(current) => candidate < current,
                Distance::Infinite | Distance::Absent => true,
            };
            if !improves {
                continue;
            }

            parents[v] = Some(u);
            distances[v] = Distance::Finite(candidate);
            relaxations += 1;

            if !member[v] {
                queue.insert(QueueEntry {
                    priority: candidate,
                    node: v,
                });
                member[v] = true;
            }
        }
    }

    debug!(source = start, extractions, relaxations, "shortest paths computed");

    Ok(ShortestPathTree {
        source: start,
        parents,
        distances,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use proptest::prelude::*;

    fn make_weighted(n: usize, links: &[(NodeId, NodeId, u64)]) -> MatrixGraph<String, u64> {
        let mut g = MatrixGraph::new(n);
        for _ in 0..n {
            g.add_node().unwrap();
        }
        for &(a, b, w) in links {
            g.add_link(a, b, w).unwrap();
        }
        g
    }

    #[test]
    fn test_reference_fixture() {
        let g = make_weighted(4, &[(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 1)]);
        let spt = dijkstra(&g, 0).unwrap();

        assert_eq!(spt.distance(0), Some(0));
        assert_eq!(spt.distance(1), Some(2));
        assert_eq!(spt.distance(2), Some(1));
        assert_eq!(spt.distance(3), Some(3));

        assert_eq!(spt.parent(0), None);
        assert_eq!(spt.parent(1), Some(2));
        assert_eq!(spt.parent(2), Some(0));
        assert_eq!(spt.parent(3), Some(1));
        assert_eq!(spt.parents(), &[None, Some(2), Some(0), Some(1)]);
    }

    #[test]
    fn test_path_to() {
        let g = make_weighted(4, &[(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 1)]);
        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.path_to(3), Some(vec![0, 2, 1, 3]));
        assert_eq!(spt.path_to(0), Some(vec![0]));
    }

    #[test]
    fn test_tree_edges_and_display() {
        let g = make_weighted(4, &[(0, 1, 4), (0, 2, 1), (2, 1, 1), (1, 3, 1)]);
        let spt = dijkstra(&g, 0).unwrap();
        let edges: Vec<_> = spt.tree_edges().collect();
        assert_eq!(edges, vec![(2, 1, 2), (0, 2, 1), (1, 3, 3)]);
        assert_eq!(
            spt.to_string(),
            "SPT from 0 (from, to, cost)\n(2, 1, 2)\n(0, 2, 1)\n(1, 3, 3)\n"
        );
    }

    #[test]
    fn test_unreachable_and_absent() {
        let mut g = make_weighted(5, &[(0, 1, 2), (3, 0, 1)]);
        g.erase_node(4).unwrap();
        let spt = dijkstra(&g, 0).unwrap();

        assert_eq!(spt.distance_state(1), Distance::Finite(2));
        assert_eq!(spt.distance_state(2), Distance::Infinite);
        assert_eq!(spt.distance_state(3), Distance::Infinite);
        assert_eq!(spt.distance_state(4), Distance::Absent);
        assert_eq!(spt.distance_state(99), Distance::Absent);
        assert_eq!(spt.parent(3), None);
        assert_eq!(spt.path_to(3), None);
        assert_eq!(spt.reachable_count(), 2);
    }

    #[test]
    fn test_start_missing() {
        let g = make_weighted(2, &[]);
        let mut empty = g.clone();
        empty.erase_node(0).unwrap();
        assert_eq!(
            dijkstra(&empty, 0).unwrap_err(),
            GraphError::NodeNotFound { node: 0 }
        );
        assert!(dijkstra(&g, 5).is_err());
    }

    #[test]
    fn test_zero_weight_cycle() {
        let g = make_weighted(3, &[(0, 1, 0), (1, 2, 0), (2, 0, 0)]);
        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.distance(2), Some(0));
        assert_eq!(spt.parent(0), None);
        assert_eq!(spt.path_to(2), Some(vec![0, 1, 2]));
    }

    #[test]
    fn test_relax_queued_node() {
        // 3 is queued at 10 via 0 -> 3, then improved to 3 through 1 and 2
        // while still waiting in the queue
        let g = make_weighted(
            5,
            &[(0, 3, 10), (0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1)],
        );
        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.distance(3), Some(3));
        assert_eq!(spt.distance(4), Some(4));
        assert_eq!(spt.path_to(4), Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_overflowing_path_skipped() {
        let mut g: MatrixGraph<String, u32> = MatrixGraph::new(4);
        for _ in 0..4 {
            g.add_node().unwrap();
        }
        g.add_link(0, 1, u32::MAX).unwrap();
        g.add_link(1, 2, 1).unwrap();
        g.add_link(0, 3, 5).unwrap();
        g.add_link(3, 2, u32::MAX - 5).unwrap();

        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.distance(1), Some(u32::MAX));
        assert_eq!(spt.distance(2), Some(u32::MAX));
        assert_eq!(spt.path_to(2), Some(vec![0, 3, 2]));
        assert_eq!(spt.parent(2), Some(3));
    }

    #[test]
    fn test_overflow_leaves_node_unreached() {
        let mut g: MatrixGraph<String, u32> = MatrixGraph::new(3);
        for _ in 0..3 {
            g.add_node().unwrap();
        }
        g.add_link(0, 1, u32::MAX).unwrap();
        g.add_link(1, 2, 1).unwrap();

        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.distance(1), Some(u32::MAX));
        assert_eq!(spt.distance(2), None);
        assert_eq!(spt.distance_state(2), Distance::Infinite);
    }

    #[test]
    fn test_float_weights() {
        let mut g: MatrixGraph<String, f64> = MatrixGraph::new(3);
        for _ in 0..3 {
            g.add_node().unwrap();
        }
        g.add_link(0, 1, 0.5).unwrap();
        g.add_link(1, 2, 0.25).unwrap();
        g.add_link(0, 2, 1.0).unwrap();
        let spt = dijkstra(&g, 0).unwrap();
        assert_eq!(spt.distance(2), Some(0.75));
        assert_eq!(spt.parent(2), Some(1));
    }

    #[test]
    fn test_queue_entry_order() {
        let a = QueueEntry { priority: 1u32, node: 5 };
        let b = QueueEntry { priority: 1u32, node: 2 };
        let c = QueueEntry { priority: 0u32, node: 9 };
        assert!(c < b);
        assert!(b < a);
        assert_eq!(a, QueueEntry { priority: 1, node: 5 });
    }

    // --- Agreement with Bellman-Ford ---

    fn bellman_ford(g: &MatrixGraph<String, u64>, start: NodeId) -> Vec<Option<u64>> {
        let n = g.capacity();
        let mut dist = vec![None; n];
        dist[start] = Some(0);
        for _ in 0..n {
            for u in g.all_nodes() {
                let Some(du) = dist[u] else { continue };
                for (v, w) in g.successors(u) {
                    if dist[v].map_or(true, |dv| du + w < dv) {
                        dist[v] = Some(du + w);
                    }
                }
            }
        }
        dist
    }

    proptest! {
        #[test]
        fn prop_matches_bellman_ford(
            links in prop::collection::vec((0..8usize, 0..8usize, 0..20u64), 0..30),
            start in 0..8usize,
        ) {
            let g = make_weighted(8, &links);
            let spt = dijkstra(&g, start).unwrap();
            let expected = bellman_ford(&g, start);
            for node in 0..8 {
                prop_assert_eq!(spt.distance(node), expected[node]);
                if let Some(parent) = spt.parent(node) {
                    let via = spt.distance(parent).unwrap() + g.weight(parent, node).unwrap();
                    prop_assert_eq!(Some(via), spt.distance(node));
                }
            }
        }
    }
}
