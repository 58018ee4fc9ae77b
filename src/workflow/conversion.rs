use crate::error::WorkflowConversionError;
use crate::workflow::graph::WorkflowGraph;

/// A trait for custom data models that can be converted into a `WorkflowGraph`.
///
/// This is the extension point for sources other than the standard container
/// dump: parse your own format into your own structs, then implement this
/// trait to hand the translation engine a finished graph.
///
/// # Example
///
/// ```rust,no_run
/// use honyaku::prelude::*;
/// use honyaku::error::WorkflowConversionError;
///
/// struct MyNode { id: i64, settings: ConfigElement }
/// struct MyPipeline { nodes: Vec<MyNode> }
///
/// impl IntoWorkflow for MyPipeline {
///     fn into_workflow(self) -> std::result::Result<WorkflowGraph, WorkflowConversionError> {
///         let descriptor = WorkflowDescriptor::default();
///         let docs = self
///             .nodes
///             .into_iter()
///             .map(|n| (format!("Node (#{})", n.id), n.settings))
///             .collect();
///         Ok(WorkflowGraph::build(&descriptor, docs))
///     }
/// }
/// ```
pub trait IntoWorkflow {
    /// Consumes the object and converts it into a reconstructed workflow graph.
    fn into_workflow(self) -> Result<WorkflowGraph, WorkflowConversionError>;
}
