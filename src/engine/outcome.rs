use crate::ast::Value;
use crate::error::ExecutionError;
use crate::graph::{Branch, NodeId};

/// What a single call to `Session::step` did.
///
/// `next` is the node the session will execute on its following step; `None`
/// means the run completed because there was no edge to follow.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The start marker was written and the entry's successor selected.
    Started { entry: NodeId, next: Option<NodeId> },
    /// A Process, Connector, or output-only InputOutput node ran.
    Advanced { from: NodeId, next: Option<NodeId> },
    /// A Decision node evaluated its condition and picked an edge.
    Branched {
        from: NodeId,
        outcome: bool,
        /// Tag of the edge actually followed.
        taken: Option<Branch>,
        /// Set when no edge carried the wanted tag and the first edge was used instead.
        fallback: bool,
        next: Option<NodeId>,
        reason: String,
    },
    /// An InputOutput node asked for input; the session now waits.
    Suspended { node: NodeId, prompt: String },
    /// A supplied value was bound and the session moved on.
    Resumed {
        variable: String,
        value: Value,
        next: Option<NodeId>,
    },
    /// An end node was reached.
    Finished { node: NodeId },
    Failed(ExecutionError),
    /// Nothing happened: the session is over, or still waiting for input.
    Idle,
}
