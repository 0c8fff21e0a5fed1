use crate::ast::Value;
use crate::graph::NodeId;
use serde::Serialize;
use thiserror::Error;

/// A lexical or syntactic fault in a node body.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("syntax error at column {position}: {message}")]
pub struct ParseError {
    /// Byte offset into the body where the fault was detected.
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Errors that can occur while parsing or evaluating a node body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("Division by zero in '{operation}'")]
    DivisionByZero { operation: &'static str },

    #[error(
        "Type mismatch during operation '{operation}': expected {expected}, but found value '{found}'"
    )]
    TypeMismatch {
        operation: String,
        expected: String,
        found: Value,
    },

    #[error("Function '{function}' expects {expected} argument(s), but received {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },
}

/// Errors raised while assembling a `FlowGraph` from nodes and edges.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Program has no start node")]
    MissingEntry,

    #[error("Program has more than one start node: {0:?}")]
    MultipleEntries(Vec<NodeId>),

    #[error("Start node '{entry}' has an incoming edge from node '{from}'")]
    EntryHasPredecessor { entry: NodeId, from: NodeId },

    #[error("Node id '{0}' is used by more than one node")]
    DuplicateNode(NodeId),

    #[error("Node '{node_id}' has an unregistered or invalid shape: '{shape}'")]
    UnknownShape { node_id: NodeId, shape: String },
}

/// The fault that moved a session into the `Failed` state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("NO START NODE")]
    MissingEntry,

    #[error("BROKEN LINK: node '{node_id}' does not exist")]
    BrokenLink { node_id: NodeId },

    #[error("ERROR at \"{label}\": {source}")]
    Evaluation {
        label: String,
        #[source]
        source: EvaluationError,
    },

    #[error("MAX STEPS EXCEEDED ({limit}); infinite loop?")]
    MaxStepsExceeded { limit: usize },
}

/// Discriminant of an `ExecutionError`, reported to the UI alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FaultKind {
    MissingEntry,
    BrokenLink,
    EvaluationError,
    MaxStepsExceeded,
}

impl ExecutionError {
    pub fn kind(&self) -> FaultKind {
        match self {
            ExecutionError::MissingEntry => FaultKind::MissingEntry,
            ExecutionError::BrokenLink { .. } => FaultKind::BrokenLink,
            ExecutionError::Evaluation { .. } => FaultKind::EvaluationError,
            ExecutionError::MaxStepsExceeded { .. } => FaultKind::MaxStepsExceeded,
        }
    }
}

/// Errors that can occur when converting an editor's own format into a `ProgramDefinition`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}
