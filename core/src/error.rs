//! Error taxonomy for graph operations.
//!
//! Every guarded operation on [`MatrixGraph`](crate::MatrixGraph) reports
//! a failed precondition through one of these variants instead of silently
//! doing nothing.

use thiserror::Error;

use crate::graph::NodeId;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The id is out of range or its row is disabled.
    #[error("node {node} not found")]
    NodeNotFound { node: NodeId },

    /// Both endpoints may exist, but there is no active link between them.
    #[error("link {from} -> {to} not found")]
    LinkNotFound { from: NodeId, to: NodeId },

    /// Every row is already enabled.
    #[error("graph is full: capacity of {capacity} nodes reached")]
    CapacityExceeded { capacity: usize },

    /// Weight is below zero (or NaN for floating point weights).
    #[error("link {from} -> {to} rejected: weight must be non-negative")]
    NegativeWeight { from: NodeId, to: NodeId },

    /// The edge array for a newly claimed row could not be reserved.
    #[error("failed to allocate adjacency row of {cells} cells")]
    AllocationFailed { cells: usize },
}

impl GraphError {
    pub(crate) fn node(node: NodeId) -> Self {
        GraphError::NodeNotFound { node }
    }

    pub(crate) fn link(from: NodeId, to: NodeId) -> Self {
        GraphError::LinkNotFound { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(GraphError::node(7).to_string(), "node 7 not found");
        assert_eq!(GraphError::link(1, 2).to_string(), "link 1 -> 2 not found");
        assert_eq!(
            GraphError::CapacityExceeded { capacity: 4 }.to_string(),
            "graph is full: capacity of 4 nodes reached"
        );
        assert_eq!(
            GraphError::AllocationFailed { cells: 16 }.to_string(),
            "failed to allocate adjacency row of 16 cells"
        );
    }
}
