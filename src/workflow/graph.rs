use crate::error::DescriptorError;
use crate::settings::ConfigElement;
use crate::workflow::node::{Connection, DescriptorEntry, NodeId, WorkflowNode};
use ahash::AHashMap;
use tracing::warn;

/// The declared node list and connection list of a workflow, read from the
/// descriptor tree before any settings document is merged in.
#[derive(Debug, Clone, Default)]
pub struct WorkflowDescriptor {
    pub nodes: Vec<DescriptorEntry>,
    pub connections: Vec<Connection>,
}

/// Extracts a node id from its settings folder name.
///
/// The container stores each node's settings under a folder whose name ends in
/// a `#<digits>` suffix, e.g. `CSV Reader (#7)`. No marker means the id stays
/// unresolved and the record sorts last.
pub fn node_id_from_folder(folder: &str) -> Option<NodeId> {
    let tail = &folder[folder.rfind('#')? + 1..];
    let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl WorkflowDescriptor {
    /// Reads the descriptor tree: a `nodes` indexed list (each entry with an
    /// `id` leaf and/or a `node_settings_file` leaf) and a `connections`
    /// indexed list (`sourceID`/`destID` leaves). Incomplete entries are kept
    /// where possible and warned about, never silently dropped.
    pub fn from_tree(tree: &ConfigElement) -> Result<Self, DescriptorError> {
        let nodes_section = tree
            .find_child("nodes")
            .ok_or(DescriptorError::MissingSection("nodes"))?;
        let connections_section = tree
            .find_child("connections")
            .ok_or(DescriptorError::MissingSection("connections"))?;

        let mut nodes = Vec::new();
        for (position, entry) in nodes_section.indexed_children().iter().enumerate() {
            let settings_folder = entry
                .get_value("node_settings_file")
                .map(|f| f.split('/').next().unwrap_or(f).to_string());
            let id = entry
                .get_value("id")
                .and_then(|v| v.parse::<NodeId>().ok())
                .or_else(|| settings_folder.as_deref().and_then(node_id_from_folder));
            if id.is_none() {
                warn!(position, "descriptor node entry carries no usable id");
            }
            nodes.push(DescriptorEntry {
                id,
                settings_folder,
                state: entry.get_value("state").map(str::to_string),
            });
        }

        let mut connections = Vec::new();
        for (position, entry) in connections_section.indexed_children().iter().enumerate() {
            let source = entry.get_value("sourceID").and_then(|v| v.parse().ok());
            let dest = entry.get_value("destID").and_then(|v| v.parse().ok());
            match (source, dest) {
                (Some(source), Some(dest)) => connections.push(Connection { source, dest }),
                _ => warn!(position, "connection entry is missing an endpoint, skipped"),
            }
        }

        Ok(Self { nodes, connections })
    }
}

/// The reconstructed workflow graph: id-keyed node records, order indices and
/// the successor adjacency map.
#[derive(Debug, Clone, Default)]
pub struct WorkflowGraph {
    records: Vec<WorkflowNode>,
    index: AHashMap<NodeId, usize>,
    /// source id -> destination ids, in connection declaration order.
    pub next_node_map: AHashMap<NodeId, Vec<NodeId>>,
}

impl WorkflowGraph {
    /// Merges the descriptor with the independently parsed settings documents
    /// into one id-keyed record set.
    ///
    /// `settings_docs` pairs each document with its containing folder name and
    /// may arrive in any order; documents are folded in a canonical order so
    /// the merge result is independent of parse completion order. A node seen
    /// in only one source is still emitted with whatever fields are available.
    pub fn build(
        descriptor: &WorkflowDescriptor,
        settings_docs: Vec<(String, ConfigElement)>,
    ) -> Self {
        let mut graph = WorkflowGraph::default();

        for (position, entry) in descriptor.nodes.iter().enumerate() {
            graph.records.push(WorkflowNode {
                id: entry.id,
                state: entry.state.clone(),
                order_index: Some(position),
                ..WorkflowNode::default()
            });
            if let Some(id) = entry.id {
                graph.index.insert(id, position);
            }
        }

        for connection in &descriptor.connections {
            graph
                .next_node_map
                .entry(connection.source)
                .or_default()
                .push(connection.dest);
        }

        // Canonical fold order, so concurrent discovery upstream cannot
        // influence the merge result.
        let mut docs = settings_docs;
        docs.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (folder, tree) in docs {
            let id = node_id_from_folder(&folder);
            let slot = id.and_then(|id| graph.index.get(&id).copied());
            let record = match slot {
                Some(slot) => &mut graph.records[slot],
                None => {
                    // Settings without a descriptor entry still become a record.
                    graph.records.push(WorkflowNode {
                        id,
                        ..WorkflowNode::default()
                    });
                    let slot = graph.records.len() - 1;
                    if let Some(id) = id {
                        graph.index.insert(id, slot);
                    }
                    &mut graph.records[slot]
                }
            };
            if record.settings.is_some() {
                warn!(folder = %folder, "duplicate settings document for node, keeping first");
                continue;
            }
            record.name = tree.get_value("name").map(str::to_string);
            record.factory = tree.get_value("factory").map(str::to_string);
            record.description = tree.get_value("customDescription").map(str::to_string);
            record.settings = Some(tree);
        }

        for record in &mut graph.records {
            if let Some(id) = record.id {
                if let Some(successors) = graph.next_node_map.get(&id) {
                    record.successors = successors.clone();
                }
            }
        }

        graph
    }

    pub fn node(&self, id: NodeId) -> Option<&WorkflowNode> {
        self.index.get(&id).map(|slot| &self.records[*slot])
    }

    /// Position of the node in the declared sequence, when known.
    pub fn order_index(&self, id: NodeId) -> Option<usize> {
        self.node(id).and_then(|n| n.order_index)
    }

    /// All records, declared order first, then records without an order index
    /// (settings-only or unresolved), ids ascending within each group.
    pub fn nodes_in_order(&self) -> Vec<&WorkflowNode> {
        let mut records: Vec<&WorkflowNode> = self.records.iter().collect();
        records.sort_by_key(|n| (n.order_index.is_none(), n.order_index, n.id.is_none(), n.id));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
