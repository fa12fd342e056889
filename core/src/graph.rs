use std::fmt;

use tracing::{debug, trace};

use crate::error::{GraphError, Result};
use crate::weight::Weight;

/// Row index in the adjacency matrix. Valid ids lie in `[0, capacity)`.
pub type NodeId = usize;

/// One cell of the adjacency matrix: the directed link `row -> column`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkInfo<W> {
    pub exists: bool,
    pub weight: W,
}

impl<W: Weight> Default for LinkInfo<W> {
    fn default() -> Self {
        Self {
            exists: false,
            weight: W::zero(),
        }
    }
}

/// A matrix row: node state plus the outgoing cells.
///
/// `links` holds `capacity` cells while the row is enabled and is empty
/// (deallocated) otherwise.
#[derive(Debug, Clone)]
pub struct AdjacencyRow<L, W> {
    enabled: bool,
    generation: u32,
    label: Option<L>,
    links: Vec<LinkInfo<W>>,
}

impl<L, W> AdjacencyRow<L, W> {
    fn vacant() -> Self {
        Self {
            enabled: false,
            generation: 0,
            label: None,
            links: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of times this slot has been claimed.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    pub fn links(&self) -> &[LinkInfo<W>] {
        &self.links
    }
}

/// Directed, weighted graph over a fixed-capacity adjacency matrix.
///
/// Node ids are row indices. `add_node` claims the lowest free row, so an
/// id freed by `erase_node` is handed out again; compare
/// [`generation`](Self::generation) values to tell occupants apart.
#[derive(Debug, Clone)]
pub struct MatrixGraph<L = String, W = u32> {
    capacity: usize,
    node_count: usize,
    link_count: usize,
    rows: Vec<AdjacencyRow<L, W>>,
}

impl<L, W: Weight> MatrixGraph<L, W> {
    /// Create an empty graph holding at most `capacity` nodes.
    pub fn new(capacity: usize) -> Self {
        let mut rows = Vec::with_capacity(capacity);
        rows.resize_with(capacity, AdjacencyRow::vacant);
        Self {
            capacity,
            node_count: 0,
            link_count: 0,
            rows,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn is_node_enabled(&self, node: NodeId) -> bool {
        self.rows.get(node).is_some_and(|row| row.enabled)
    }

    pub fn is_link_active(&self, from: NodeId, to: NodeId) -> bool {
        self.is_node_enabled(from)
            && self.is_node_enabled(to)
            && self.rows[from].links[to].exists
    }

    /// Row for an enabled node.
    pub fn row(&self, node: NodeId) -> Result<&AdjacencyRow<L, W>> {
        self.rows
            .get(node)
            .filter(|row| row.enabled)
            .ok_or(GraphError::node(node))
    }

    fn require_nodes(&self, from: NodeId, to: NodeId) -> Result<()> {
        self.row(from)?;
        self.row(to)?;
        Ok(())
    }

    fn require_link(&self, from: NodeId, to: NodeId) -> Result<()> {
        if self.is_link_active(from, to) {
            Ok(())
        } else {
            Err(GraphError::link(from, to))
        }
    }

    // -----------------------------------------------------------------------
    // Node lifecycle
    // -----------------------------------------------------------------------

    /// Claim the lowest free row for an unlabelled node.
    pub fn add_node(&mut self) -> Result<NodeId> {
        self.claim(None)
    }

    /// Claim the lowest free row for a node carrying `label`.
    pub fn add_node_with_label(&mut self, label: L) -> Result<NodeId> {
        self.claim(Some(label))
    }

    fn claim(&mut self, label: Option<L>) -> Result<NodeId> {
        let capacity = self.capacity;
        if self.node_count >= capacity {
            return Err(GraphError::CapacityExceeded { capacity });
        }

        let id = self
            .rows
            .iter()
            .position(|row| !row.enabled)
            .ok_or(GraphError::CapacityExceeded { capacity })?;

        let mut links = Vec::new();
        links
            .try_reserve_exact(capacity)
            .map_err(|_| GraphError::AllocationFailed { cells: capacity })?;
        links.resize(capacity, LinkInfo::default());

        let row = &mut self.rows[id];
        row.enabled = true;
        row.generation = row.generation.wrapping_add(1);
        row.label = label;
        row.links = links;
        self.node_count += 1;

        debug!(node = id, generation = row.generation, "node added");
        Ok(id)
    }

    /// Disable `node`, drop every link into or out of it and free its row.
    ///
    /// Returns the number of links removed.
    pub fn erase_node(&mut self, node: NodeId) -> Result<usize> {
        self.row(node)?;
        self.rows[node].enabled = false;

        let mut removed = 0;
        for row in self.rows.iter_mut().filter(|row| row.enabled) {
            let cell = &mut row.links[node];
            if cell.exists {
                cell.exists = false;
                removed += 1;
            }
        }

        let row = &mut self.rows[node];
        removed += row.links.iter().filter(|cell| cell.exists).count();
        row.links = Vec::new();
        row.label = None;

        self.link_count -= removed;
        self.node_count -= 1;

        debug!(node, links_removed = removed, "node erased");
        Ok(removed)
    }

    pub fn label(&self, node: NodeId) -> Result<Option<&L>> {
        Ok(self.row(node)?.label.as_ref())
    }

    pub fn set_label(&mut self, node: NodeId, label: L) -> Result<()> {
        self.row(node)?;
        self.rows[node].label = Some(label);
        Ok(())
    }

    /// Generation of the node currently occupying `node`'s slot.
    pub fn generation(&self, node: NodeId) -> Result<u32> {
        Ok(self.row(node)?.generation)
    }

    // -----------------------------------------------------------------------
    // Link lifecycle
    // -----------------------------------------------------------------------

    /// Set the link `from -> to`. Re-adding an active link overwrites its weight.
    pub fn add_link(&mut self, from: NodeId, to: NodeId, weight: W) -> Result<()> {
        self.require_nodes(from, to)?;
        if !weight.is_valid() {
            return Err(GraphError::NegativeWeight { from, to });
        }

        let cell = &mut self.rows[from].links[to];
        if !cell.exists {
            cell.exists = true;
            self.link_count += 1;
        }
        cell.weight = weight;

        trace!(from, to, ?weight, "link added");
        Ok(())
    }

    pub fn erase_link(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.require_link(from, to)?;
        self.rows[from].links[to].exists = false;
        self.link_count -= 1;

        trace!(from, to, "link erased");
        Ok(())
    }

    pub fn weight(&self, from: NodeId, to: NodeId) -> Result<W> {
        self.require_link(from, to)?;
        Ok(self.rows[from].links[to].weight)
    }

    pub fn set_weight(&mut self, from: NodeId, to: NodeId, weight: W) -> Result<()> {
        self.require_link(from, to)?;
        if !weight.is_valid() {
            return Err(GraphError::NegativeWeight { from, to });
        }
        self.rows[from].links[to].weight = weight;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Adjacency queries
    // -----------------------------------------------------------------------

    /// Outgoing links of `node` as `(target, weight)`, ascending by target.
    ///
    /// Yields nothing for a disabled node.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, W)> + '_ {
        self.rows
            .get(node)
            .map(|row| row.links.as_slice())
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.exists)
            .map(|(to, cell)| (to, cell.weight))
    }

    /// Targets of links leaving `node`, ascending.
    pub fn adjacent_to(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.row(node)?;
        Ok(self.successors(node).map(|(to, _)| to).collect())
    }

    /// Sources of links entering `node`, ascending.
    pub fn adjacent_from(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.row(node)?;
        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.enabled && row.links[node].exists)
            .map(|(from, _)| from)
            .collect())
    }

    /// Every node linked with `node` in either direction, ascending, no repeats.
    pub fn adjacent_nodes(&self, node: NodeId) -> Result<Vec<NodeId>> {
        let mut nodes = self.adjacent_to(node)?;
        nodes.extend(self.adjacent_from(node)?);
        nodes.sort_unstable();
        nodes.dedup();
        Ok(nodes)
    }

    /// Enabled node ids, ascending.
    pub fn all_nodes(&self) -> Vec<NodeId> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.enabled)
            .map(|(id, _)| id)
            .collect()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let rows = self.rows.len() * size_of::<AdjacencyRow<L, W>>();
        let cells = self.node_count * self.capacity * size_of::<LinkInfo<W>>();
        rows + cells
    }
}

impl<L: fmt::Display, W: Weight + fmt::Display> fmt::Display for MatrixGraph<L, W> {
    /// One line per slot: enabled rows list their label and every cell
    /// (`-` for an absent link), free slots print `(free)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "(empty graph, capacity {})", self.capacity);
        }

        for (id, row) in self.rows.iter().enumerate() {
            if !row.enabled {
                writeln!(f, "{:>4} (free)", id)?;
                continue;
            }
            write!(f, "{:>4} ", id)?;
            match &row.label {
                Some(label) => write!(f, "[{}]", label)?,
                None => write!(f, "[]")?,
            }
            write!(f, " ->")?;
            for cell in &row.links {
                if cell.exists {
                    write!(f, " {}", cell.weight)?;
                } else {
                    write!(f, " -")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
