//! matrix-graph-core: fixed-capacity directed graph engine.
//!
//! A pure Rust library that stores a directed, weighted graph in an
//! adjacency matrix and provides BFS and DFS traversal, depth-first path
//! search and single-source shortest paths (Dijkstra).
//!
//! Capacity is fixed at construction. Node ids are matrix rows and are
//! reused after a node is erased.

mod degree;
mod dijkstra;
mod error;
mod graph;
mod queue;
mod traversal;
mod weight;

pub use degree::{
    degree_centrality, degree_from, degree_from_avg, degree_to, degree_to_avg, DegreeResult,
};
pub use dijkstra::{dijkstra, Distance, ShortestPathTree};
pub use error::{GraphError, Result};
pub use graph::{AdjacencyRow, LinkInfo, MatrixGraph, NodeId};
pub use queue::PriorityQueue;
pub use traversal::{
    bfs, dfs, dfs_walk, same_label_reachable, validate_path, TraversalResult, Visit,
};
pub use weight::Weight;
