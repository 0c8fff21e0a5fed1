use super::definition::ProgramDefinition;
use crate::error::GraphError;
use crate::graph::{Branch, Edge, FlowGraph, Node, NodeKind};
use ahash::AHashMap;
use tracing::debug;

/// The shapes the builder understands before aliases are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Start,
    End,
    /// Legacy shape: a start node if its label says so, otherwise an end node.
    Terminal,
    Process,
    Decision,
    InputOutput,
    Connector,
}

impl Shape {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Shape::Start),
            "end" => Some(Shape::End),
            "terminal" => Some(Shape::Terminal),
            "process" => Some(Shape::Process),
            "decision" => Some(Shape::Decision),
            "io" | "inputoutput" | "input_output" => Some(Shape::InputOutput),
            "connector" => Some(Shape::Connector),
            _ => None,
        }
    }

    fn resolve(self, label: &str) -> NodeKind {
        match self {
            Shape::Start => NodeKind::Start,
            Shape::End => NodeKind::End,
            Shape::Terminal if label.to_uppercase().contains("START") => NodeKind::Start,
            Shape::Terminal => NodeKind::End,
            Shape::Process => NodeKind::Process,
            Shape::Decision => NodeKind::Decision,
            Shape::InputOutput => NodeKind::InputOutput,
            Shape::Connector => NodeKind::Connector,
        }
    }
}

/// Turns an editor snapshot into a validated `FlowGraph`.
pub struct ProgramBuilder {
    definition: ProgramDefinition,
    aliases: AHashMap<String, Shape>,
}

impl ProgramBuilder {
    pub fn new(definition: ProgramDefinition) -> Self {
        Self {
            definition,
            aliases: AHashMap::new(),
        }
    }

    /// Maps an editor-specific shape name onto one of the built-in shapes.
    /// Unknown built-in names are ignored.
    pub fn with_shape_alias(mut self, user_shape: &str, builtin_shape: &str) -> Self {
        if let Some(shape) = Shape::from_name(builtin_shape) {
            self.aliases.insert(user_shape.trim().to_ascii_lowercase(), shape);
        }
        self
    }

    pub fn build(self) -> Result<FlowGraph, GraphError> {
        let ProgramDefinition { nodes, edges } = self.definition;

        let nodes = nodes
            .into_iter()
            .map(|def| -> Result<Node, GraphError> {
                let shape = self
                    .aliases
                    .get(&def.shape.trim().to_ascii_lowercase())
                    .copied()
                    .or_else(|| Shape::from_name(&def.shape))
                    .ok_or_else(|| GraphError::UnknownShape {
                        node_id: def.id,
                        shape: def.shape.clone(),
                    })?;
                let kind = shape.resolve(&def.label);
                Ok(Node::new(def.id, kind, def.label, def.body))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let decisions: Vec<_> = nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Decision)
            .map(|n| n.id)
            .collect();

        // Branch tags only mean something on edges leaving a Decision.
        let edges = edges
            .into_iter()
            .map(|def| {
                let branch = def
                    .label
                    .as_deref()
                    .filter(|_| decisions.contains(&def.source))
                    .and_then(Branch::from_tag);
                Edge {
                    source: def.source,
                    target: def.target,
                    branch,
                }
            })
            .collect();

        debug!(aliases = self.aliases.len(), "building flow graph from program definition");
        FlowGraph::new(nodes, edges)
    }
}
