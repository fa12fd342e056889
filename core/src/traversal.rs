use std::collections::VecDeque;

use crate::error::{GraphError, Result};
use crate::graph::{MatrixGraph, NodeId};
use crate::weight::Weight;

/// A node reached during BFS or DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub node: NodeId,
    /// Node the visit was discovered from. None for the start node.
    pub parent: Option<NodeId>,
    /// Hops from the start (BFS) or recursion depth (DFS).
    pub depth: u32,
}

/// Nodes in the order a traversal visited them, start node first.
#[derive(Debug, Clone, Default)]
pub struct TraversalResult {
    pub visits: Vec<Visit>,
}

impl TraversalResult {
    /// Visited node ids in visit order.
    pub fn order(&self) -> Vec<NodeId> {
        self.visits.iter().map(|v| v.node).collect()
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.visits.iter().any(|v| v.node == node)
    }
}

/// Breadth-first traversal following outgoing links.
///
/// Neighbors are enqueued in ascending id order and marked visited when
/// enqueued, so every reachable node appears once, in level order.
pub fn bfs<L, W: Weight>(graph: &MatrixGraph<L, W>, start: NodeId) -> Result<TraversalResult> {
    graph.row(start)?;

    let mut visited = vec![false; graph.capacity()];
    let mut queue: VecDeque<Visit> = VecDeque::new();
    let mut visits = Vec::new();

    visited[start] = true;
    queue.push_back(Visit {
        node: start,
        parent: None,
        depth: 0,
    });

    while let Some(current) = queue.pop_front() {
        visits.push(current);

        for (next, _) in graph.successors(current.node) {
            if !visited[next] {
                visited[next] = true;
                queue.push_back(Visit {
                    node: next,
                    parent: Some(current.node),
                    depth: current.depth + 1,
                });
            }
        }
    }

    Ok(TraversalResult { visits })
}

/// Depth-first pre-order traversal following outgoing links.
///
/// At each node the lowest-id unvisited neighbor is explored to exhaustion
/// before the next one is considered.
pub fn dfs<L, W: Weight>(graph: &MatrixGraph<L, W>, start: NodeId) -> Result<TraversalResult> {
    graph.row(start)?;

    let mut visited = vec![false; graph.capacity()];
    let mut visits = Vec::new();
    dfs_visit(graph, start, None, 0, &mut visited, &mut visits);

    Ok(TraversalResult { visits })
}

fn dfs_visit<L, W: Weight>(
    graph: &MatrixGraph<L, W>,
    node: NodeId,
    parent: Option<NodeId>,
    depth: u32,
    visited: &mut [bool],
    visits: &mut Vec<Visit>,
) {
    visited[node] = true;
    visits.push(Visit {
        node,
        parent,
        depth,
    });

    for (next, _) in graph.successors(node) {
        // visited changes during recursion, so re-check per neighbor
        if !visited[next] {
            dfs_visit(graph, next, Some(node), depth + 1, visited, visits);
        }
    }
}

/// Find some path from `start` to `end` by depth-first backtracking.
///
/// The path is not necessarily the shortest. Returns an empty Vec when `end`
/// is unreachable. With `start == end` the search looks for a cycle through
/// `start`, since a neighbor equal to `end` is accepted before the visited
/// check.
pub fn dfs_walk<L, W: Weight>(
    graph: &MatrixGraph<L, W>,
    start: NodeId,
    end: NodeId,
) -> Result<Vec<NodeId>> {
    graph.row(start)?;
    graph.row(end)?;

    let mut walk = Walk {
        end,
        visited: vec![false; graph.capacity()],
        path: Vec::new(),
        done: false,
    };
    walk.explore(graph, start);

    Ok(walk.path)
}

struct Walk {
    end: NodeId,
    visited: Vec<bool>,
    path: Vec<NodeId>,
    done: bool,
}

impl Walk {
    fn explore<L, W: Weight>(&mut self, graph: &MatrixGraph<L, W>, node: NodeId) {
        self.visited[node] = true;
        self.path.push(node);

        for (next, _) in graph.successors(node) {
            if self.done {
                break;
            }
            if next == self.end {
                self.done = true;
                self.path.push(next);
            } else if !self.visited[next] {
                self.explore(graph, next);
            }
        }

        if !self.done {
            self.path.pop();
        }
    }
}

/// Other nodes reachable from `node` that carry an equal label.
///
/// Unlabelled nodes match other unlabelled nodes. Reachability is decided by
/// a separate `dfs_walk` per candidate.
pub fn same_label_reachable<L: PartialEq, W: Weight>(
    graph: &MatrixGraph<L, W>,
    node: NodeId,
) -> Result<Vec<NodeId>> {
    let label = graph.label(node)?;

    let mut reachable = Vec::new();
    for candidate in graph.all_nodes() {
        if candidate == node || graph.label(candidate)? != label {
            continue;
        }
        if !dfs_walk(graph, node, candidate)?.is_empty() {
            reachable.push(candidate);
        }
    }

    Ok(reachable)
}

/// Reject a path whose consecutive nodes are not linked.
pub fn validate_path<L, W: Weight>(graph: &MatrixGraph<L, W>, path: &[NodeId]) -> Result<()> {
    for pair in path.windows(2) {
        if !graph.is_link_active(pair[0], pair[1]) {
            return Err(GraphError::LinkNotFound {
                from: pair[0],
                to: pair[1],
            });
        }
    }
    Ok(())
}
