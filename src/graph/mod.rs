mod model;
mod node;

pub use model::FlowGraph;
pub use node::{Branch, Edge, Node, NodeId, NodeKind};
