use crate::settings::ConfigElement;

/// Integer node id, unique across one workflow.
pub type NodeId = i64;

/// One node record of the reconstructed workflow graph.
///
/// A record is always emitted even when only one of the two input sources
/// (descriptor entry, settings document) was seen for it; the missing fields
/// stay `None`. `id` is `None` only for a settings document whose folder name
/// carried no id suffix; such records sort last and cannot be addressed for
/// translation.
#[derive(Debug, Clone, Default)]
pub struct WorkflowNode {
    pub id: Option<NodeId>,
    pub name: Option<String>,
    pub factory: Option<String>,
    pub state: Option<String>,
    pub description: Option<String>,
    pub settings: Option<ConfigElement>,
    /// Position in the descriptor's declared node sequence.
    pub order_index: Option<usize>,
    /// Destination ids of outgoing connections, in declaration order.
    pub successors: Vec<NodeId>,
}

impl WorkflowNode {
    /// The table alias this node exposes to its successors.
    pub fn alias(&self) -> String {
        if let Some(name) = &self.name {
            name.clone()
        } else if let Some(id) = self.id {
            format!("node_{}", id)
        } else {
            "unresolved_node".to_string()
        }
    }
}

/// A directed connection between two nodes, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub dest: NodeId,
}

/// One node entry of the workflow descriptor, before merging with the node's
/// independently parsed settings document.
#[derive(Debug, Clone, Default)]
pub struct DescriptorEntry {
    pub id: Option<NodeId>,
    pub settings_folder: Option<String>,
    pub state: Option<String>,
}
