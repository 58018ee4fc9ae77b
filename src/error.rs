use thiserror::Error;

/// Errors that can occur while reading the workflow descriptor tree.
#[derive(Error, Debug, Clone)]
pub enum DescriptorError {
    #[error("Descriptor tree has no '{0}' section")]
    MissingSection(&'static str),
}

/// Errors that can occur when converting a custom source format into a
/// `WorkflowGraph`.
#[derive(Error, Debug, Clone)]
pub enum WorkflowConversionError {
    #[error("Invalid custom workflow data: {0}")]
    ValidationError(String),
}
