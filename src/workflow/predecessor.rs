use crate::workflow::graph::WorkflowGraph;
use crate::workflow::node::{NodeId, WorkflowNode};
use ahash::AHashMap;

/// Alias substituted by unary translators when no upstream node resolves, so
/// a missing predecessor is never itself a translation failure.
pub const PLACEHOLDER_INPUT: &str = "input_table";

/// The minimal upstream summary a translator needs: the table alias the
/// predecessor exposes and the columns it is known to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredecessorContext {
    pub alias: String,
    /// Kept sorted and deduplicated for deterministic output.
    pub columns: Vec<String>,
}

impl PredecessorContext {
    pub fn new(alias: &str, columns: Vec<String>) -> Self {
        let mut columns = columns;
        columns.sort();
        columns.dedup();
        Self {
            alias: alias.to_string(),
            columns,
        }
    }

    /// The stand-in context for a root node with no upstream.
    pub fn placeholder() -> Self {
        Self {
            alias: PLACEHOLDER_INPUT.to_string(),
            columns: Vec::new(),
        }
    }

    pub fn for_node(node: &WorkflowNode, provider: &dyn ColumnProvider) -> Self {
        let columns = node.id.map(|id| provider.columns_of(id)).unwrap_or_default();
        Self::new(&node.alias(), columns)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Supplies the exposed-column set for a given upstream node.
///
/// Inferring column exposure for arbitrary node types is deliberately not the
/// resolver's job; the surrounding system provides it per predecessor, e.g.
/// from table specs it already holds.
pub trait ColumnProvider {
    fn columns_of(&self, id: NodeId) -> Vec<String>;
}

impl ColumnProvider for AHashMap<NodeId, Vec<String>> {
    fn columns_of(&self, id: NodeId) -> Vec<String> {
        self.get(&id).cloned().unwrap_or_default()
    }
}

/// Provider for callers with no column knowledge; every set comes back empty.
pub struct NoColumns;

impl ColumnProvider for NoColumns {
    fn columns_of(&self, _id: NodeId) -> Vec<String> {
        Vec::new()
    }
}

impl WorkflowGraph {
    /// Finds the first source whose destination list contains `id`, or `None`
    /// for a root node.
    ///
    /// Sources are scanned in ascending id order so resolution is
    /// deterministic regardless of how the adjacency map hashes.
    pub fn find_single_predecessor(&self, id: NodeId) -> Option<&WorkflowNode> {
        self.predecessor_ids(id)
            .into_iter()
            .find_map(|source| self.node(source))
    }

    /// Collects every source whose destination list contains `id`, in the same
    /// deterministic ascending-id order.
    pub fn find_all_predecessors(&self, id: NodeId) -> Vec<&WorkflowNode> {
        self.predecessor_ids(id)
            .into_iter()
            .filter_map(|source| self.node(source))
            .collect()
    }

    fn predecessor_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut sources: Vec<NodeId> = self
            .next_node_map
            .iter()
            .filter(|(_, dests)| dests.contains(&id))
            .map(|(source, _)| *source)
            .collect();
        sources.sort_unstable();
        sources
    }
}
