//! # Flowrun - Flowchart Execution Engine
//!
//! **Flowrun** runs programs drawn as flowcharts. A program is a directed graph
//! of typed nodes (start, end, process, decision, input/output, connector)
//! whose bodies are written in a tiny expression language. The engine executes
//! it one node per step, so a UI can highlight the active node, show the
//! variables, and pause the run whenever the program asks for input.
//!
//! ## Core Workflow
//!
//! 1.  **Describe Your Program**: Convert your editor's nodes and edges into a
//!     `ProgramDefinition`, directly or by implementing the `IntoProgram` trait.
//! 2.  **Build**: `ProgramBuilder` maps shape names to node kinds and validates
//!     the result into a `FlowGraph`.
//! 3.  **Run**: Create a `Session` and call `step` until it finishes. When the
//!     session is `WaitingForInput`, answer with `resume`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowrun::prelude::*;
//! use flowrun::program::samples;
//!
//! fn main() -> Result<()> {
//!     let graph = ProgramBuilder::new(samples::sum_one_to_five()).build()?;
//!     let mut session = Session::builder(graph).max_steps(100).build();
//!
//!     while !session.is_finished() {
//!         if let StepOutcome::Failed(error) = session.step() {
//!             eprintln!("{}", error);
//!         }
//!     }
//!
//!     for line in session.output() {
//!         println!("{}", line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod io;
pub mod language;
pub mod prelude;
pub mod program;
pub mod trace;
