pub mod conversion;
pub mod graph;
pub mod node;
pub mod predecessor;

pub use conversion::*;
pub use graph::*;
pub use node::*;
pub use predecessor::*;
