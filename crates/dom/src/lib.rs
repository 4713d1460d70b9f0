pub mod mutate;
pub mod selection;
pub mod tree;
pub mod types;

pub use crate::selection::Selection;
pub use crate::tree::Dom;
pub use crate::types::{Node, NodeData, NodeId};
