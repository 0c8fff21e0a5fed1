use super::{Edge, Node, NodeId, NodeKind};
use crate::error::{ExecutionError, GraphError};
use ahash::AHashMap;
use tracing::debug;

/// Read-only view of a program's nodes and edges for the duration of a run.
///
/// Construction checks the entry: exactly one `Start` node, with nothing
/// pointing back into it. Edges whose endpoints are missing are accepted here
/// and only fault when the engine follows them.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    index: AHashMap<NodeId, usize>,
    outgoing: AHashMap<NodeId, Vec<usize>>,
    entry: NodeId,
}

impl FlowGraph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index = AHashMap::with_capacity(nodes.len());
        for (position, node) in nodes.iter().enumerate() {
            if index.insert(node.id, position).is_some() {
                return Err(GraphError::DuplicateNode(node.id));
            }
        }

        let starts: Vec<NodeId> = nodes
            .iter()
            .filter(|n| n.kind == NodeKind::Start)
            .map(|n| n.id)
            .collect();
        let entry = match starts.as_slice() {
            [] => return Err(GraphError::MissingEntry),
            [only] => *only,
            _ => return Err(GraphError::MultipleEntries(starts)),
        };

        if let Some(edge) = edges.iter().find(|e| e.target == entry) {
            return Err(GraphError::EntryHasPredecessor {
                entry,
                from: edge.source,
            });
        }

        // Per-source edge lists keep authoring order, which decides fallback selection.
        let mut outgoing: AHashMap<NodeId, Vec<usize>> = AHashMap::new();
        for (position, edge) in edges.iter().enumerate() {
            outgoing.entry(edge.source).or_default().push(position);
        }

        debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            entry,
            "flow graph assembled"
        );

        Ok(Self {
            nodes,
            edges,
            index,
            outgoing,
            entry,
        })
    }

    /// The program's single Start node.
    pub fn find_entry(&self) -> Result<&Node, ExecutionError> {
        self.index
            .get(&self.entry)
            .map(|&position| &self.nodes[position])
            .ok_or(ExecutionError::MissingEntry)
    }

    /// Looks up a node, faulting with `BrokenLink` if it does not exist.
    pub fn node(&self, id: NodeId) -> Result<&Node, ExecutionError> {
        self.index
            .get(&id)
            .map(|&position| &self.nodes[position])
            .ok_or(ExecutionError::BrokenLink { node_id: id })
    }

    /// Edges leaving `id`, in the order they were authored.
    pub fn outgoing_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|&position| &self.edges[position])
    }

    pub fn first_successor(&self, id: NodeId) -> Option<NodeId> {
        self.outgoing_edges(id).next().map(|edge| edge.target)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
