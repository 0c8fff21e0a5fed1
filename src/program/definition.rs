use crate::graph::NodeId;

/// A program snapshot as handed over by the editor at run start.
/// This is the target structure for any custom editor format conversion.
#[derive(Debug, Clone, Default)]
pub struct ProgramDefinition {
    pub nodes: Vec<NodeDefinition>,
    pub edges: Vec<EdgeDefinition>,
}

/// Defines a single node as the editor sees it.
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    pub id: NodeId,
    /// Shape name, e.g. `"process"`, `"decision"`, `"io"`, `"connector"`,
    /// `"start"`, `"end"`, or the legacy `"terminal"`.
    pub shape: String,
    pub label: String,
    pub body: String,
}

/// Defines a connection between two nodes, optionally labelled `Y` or `N`.
#[derive(Debug, Clone)]
pub struct EdgeDefinition {
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
}

impl NodeDefinition {
    pub fn new(id: NodeId, shape: &str, label: &str, body: &str) -> Self {
        Self {
            id,
            shape: shape.to_string(),
            label: label.to_string(),
            body: body.to_string(),
        }
    }
}

impl EdgeDefinition {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            label: None,
        }
    }

    pub fn labelled(source: NodeId, target: NodeId, label: &str) -> Self {
        Self {
            source,
            target,
            label: Some(label.to_string()),
        }
    }
}
