//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and traits from the honyaku crate.
//! Import this module to get access to the core functionality without having
//! to import each type individually.

// Config tree
pub use crate::settings::ConfigElement;

// Workflow graph reconstruction
pub use crate::workflow::{
    node_id_from_folder, ColumnProvider, Connection, IntoWorkflow, NoColumns, NodeId,
    PredecessorContext, WorkflowDescriptor, WorkflowGraph, WorkflowNode, PLACEHOLDER_INPUT,
};

// Translation
pub use crate::translate::{
    NodeTranslator, SqlConverter, SqlConverterBuilder, TranslationResult, UNSUPPORTED_NODE,
};

// SQL text helpers
pub use crate::sql::{quote_ident, quote_str};

// Error types
pub use crate::error::{DescriptorError, WorkflowConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
