use super::{PendingInput, Session, Status};
use crate::ast::Value;
use crate::error::FaultKind;
use crate::graph::NodeId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Serializable view of a session after a step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub current_node: Option<NodeId>,
    pub status: Status,
    /// Variables in name order.
    pub variables: BTreeMap<String, Value>,
    pub output: Vec<String>,
    pub pending_input: Option<PendingInput>,
    pub error: Option<ErrorReport>,
    pub steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: FaultKind,
    pub message: String,
}

impl SessionSnapshot {
    pub(super) fn capture(session: &Session) -> Self {
        Self {
            current_node: session.current_node(),
            status: session.status(),
            variables: session
                .environment()
                .sorted()
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
            output: session.output().to_vec(),
            pending_input: session.pending_input().cloned(),
            error: session.error().map(|error| ErrorReport {
                kind: error.kind(),
                message: error.to_string(),
            }),
            steps: session.step_count(),
        }
    }
}
