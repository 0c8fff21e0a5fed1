//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the flowrun crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowrun::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let definition = ProgramDefinition {
//!     nodes: vec![
//!         NodeDefinition::new(0, "start", "START", ""),
//!         NodeDefinition::new(1, "io", "ASK", r#"input("Age?", age)"#),
//!         NodeDefinition::new(2, "end", "END", ""),
//!     ],
//!     edges: vec![EdgeDefinition::new(0, 1), EdgeDefinition::new(1, 2)],
//! };
//!
//! let mut session = Session::new(ProgramBuilder::new(definition).build()?);
//! session.step();
//! session.step();
//! if session.status() == Status::WaitingForInput {
//!     session.resume("42");
//! }
//! println!("age = {:?}", session.variable("age"));
//! # Ok(())
//! # }
//! ```

// Execution
pub use crate::engine::{
    EngineConfig, PendingInput, Session, SessionBuilder, SessionSnapshot, Status, StepOutcome,
};

// Graph model and program construction
pub use crate::graph::{Branch, Edge, FlowGraph, Node, NodeId, NodeKind};
pub use crate::program::{
    EdgeDefinition, IntoProgram, NodeDefinition, ProgramBuilder, ProgramDefinition,
};

// Language and evaluation
pub use crate::ast::{EvaluationTrace, Expression, Statement, Value};
pub use crate::evaluator::{Environment, Evaluator};
pub use crate::io::{IoBridge, OutputLog};

// Error types
pub use crate::error::{EvaluationError, ExecutionError, GraphError, ParseError};

// Trace formatting
pub use crate::trace::TraceFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
