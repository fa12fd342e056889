use crate::error::Result;
use crate::graph::{MatrixGraph, NodeId};
use crate::weight::Weight;

/// Degree information for a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub out_degree: usize,
    pub in_degree: usize,
    pub total_degree: usize,
}

/// Number of links leaving `node`.
pub fn degree_to<L, W: Weight>(graph: &MatrixGraph<L, W>, node: NodeId) -> Result<usize> {
    graph.row(node)?;
    Ok(graph.successors(node).count())
}

/// Number of links entering `node`.
pub fn degree_from<L, W: Weight>(graph: &MatrixGraph<L, W>, node: NodeId) -> Result<usize> {
    Ok(graph.adjacent_from(node)?.len())
}

/// Mean out-degree over enabled nodes. None for a graph without nodes.
pub fn degree_to_avg<L, W: Weight>(graph: &MatrixGraph<L, W>) -> Option<f64> {
    average(graph, |node| degree_to(graph, node))
}

/// Mean in-degree over enabled nodes. None for a graph without nodes.
pub fn degree_from_avg<L, W: Weight>(graph: &MatrixGraph<L, W>) -> Option<f64> {
    average(graph, |node| degree_from(graph, node))
}

fn average<L, W: Weight>(
    graph: &MatrixGraph<L, W>,
    degree: impl Fn(NodeId) -> Result<usize>,
) -> Option<f64> {
    if graph.is_empty() {
        return None;
    }
    let sum: usize = graph
        .all_nodes()
        .into_iter()
        .filter_map(|node| degree(node).ok())
        .sum();
    Some(sum as f64 / graph.node_count() as f64)
}

/// Return nodes ranked by degree (total connections).
///
/// If `top_n` is 0, returns all nodes. Otherwise returns the top N by
/// total degree (descending). Ties are broken by node ID (ascending).
pub fn degree_centrality<L, W: Weight>(graph: &MatrixGraph<L, W>, top_n: usize) -> Vec<DegreeResult> {
    let mut in_degrees = vec![0usize; graph.capacity()];
    let mut out_degrees = vec![0usize; graph.capacity()];
    for from in graph.all_nodes() {
        for (to, _) in graph.successors(from) {
            out_degrees[from] += 1;
            in_degrees[to] += 1;
        }
    }

    let mut results: Vec<DegreeResult> = graph
        .all_nodes()
        .into_iter()
        .map(|id| DegreeResult {
            node_id: id,
            out_degree: out_degrees[id],
            in_degree: in_degrees[id],
            total_degree: out_degrees[id] + in_degrees[id],
        })
        .collect();

    // Sort by total degree descending, then by node_id ascending for stability
    results.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then(a.node_id.cmp(&b.node_id))
    });

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
