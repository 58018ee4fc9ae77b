//! # Honyaku - Workflow-to-SQL Translation Engine
//!
//! **Honyaku** reconstructs a serialized workflow graph (a directed graph of
//! typed processing nodes, each with its own configuration document) and
//! translates selected node types into equivalent SQL statements that
//! approximate the node's declared semantics.
//!
//! ## Core Workflow
//!
//! The engine is format-agnostic at its boundary: it consumes the attributed
//! [`ConfigElement`](settings::ConfigElement) tree, not raw markup. The
//! primary workflow is:
//!
//! 1.  **Load Your Data**: Decode the container into one descriptor tree plus
//!     one settings tree per node folder (or use
//!     [`ConfigElement::from_json`](settings::ConfigElement::from_json) for a
//!     pre-decoded JSON dump).
//! 2.  **Rebuild the Graph**: Parse the descriptor with
//!     [`WorkflowDescriptor::from_tree`](workflow::WorkflowDescriptor::from_tree)
//!     and merge it with the settings documents via
//!     [`WorkflowGraph::build`](workflow::WorkflowGraph::build). The merge is
//!     independent of the order the documents were parsed in.
//! 3.  **Translate**: Create a [`SqlConverter`](translate::SqlConverter) and
//!     call `convert_node` for the node of interest; upstream context is
//!     resolved from the graph's adjacency map. Every call returns a
//!     [`TranslationResult`](translate::TranslationResult): SQL text
//!     terminated by `;`, or diagnostic text. Diagnostics are data, never
//!     panics or errors, so one broken node never aborts its siblings.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use honyaku::prelude::*;
//! use ahash::AHashMap;
//!
//! fn main() -> Result<()> {
//!     // Assume the container was already decoded into JSON.
//!     let dump: serde_json::Value =
//!         serde_json::from_str(&std::fs::read_to_string("workflow.json")?)?;
//!     let descriptor_tree = ConfigElement::from_json("workflow", &dump["descriptor"]);
//!     let descriptor = WorkflowDescriptor::from_tree(&descriptor_tree)?;
//!
//!     let settings_docs: Vec<(String, ConfigElement)> = dump["settings"]
//!         .as_object()
//!         .into_iter()
//!         .flatten()
//!         .map(|(folder, tree)| (folder.clone(), ConfigElement::from_json("settings", tree)))
//!         .collect();
//!
//!     let graph = WorkflowGraph::build(&descriptor, settings_docs);
//!     let converter = SqlConverter::new();
//!
//!     // Exposed columns per node are supplied by the caller.
//!     let mut columns: AHashMap<NodeId, Vec<String>> = AHashMap::new();
//!     columns.insert(1, vec!["region".to_string(), "sales".to_string()]);
//!
//!     for node in graph.nodes_in_order() {
//!         if let Some(id) = node.id {
//!             println!("{}", converter.convert_node(&graph, id, &columns));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod prelude;
pub mod settings;
pub mod sql;
pub mod translate;
pub mod workflow;
