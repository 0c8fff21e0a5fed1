//! The step-driven state machine that walks a `FlowGraph`.
//!
//! A [`Session`] never loops on its own: every call to [`Session::step`] (or
//! [`Session::resume`]) performs exactly one transition and reports what it did.
//! Timed auto-run belongs to the caller, which simply keeps stepping while
//! the status is `Running`.

use crate::ast::Value;
use crate::error::ExecutionError;
use crate::evaluator::{Environment, Evaluator};
use crate::graph::{Branch, FlowGraph, Node, NodeId, NodeKind};
use crate::io::{Console, IoBridge, OutputLog};
use crate::language::InputDirective;
use crate::trace::TraceFormatter;
use serde::Serialize;
use tracing::{debug, info, warn};

mod config;
mod outcome;
mod snapshot;

pub use config::{DEFAULT_MAX_STEPS, EngineConfig, SessionBuilder};
pub use outcome::StepOutcome;
pub use snapshot::{ErrorReport, SessionSnapshot};

pub const START_MARKER: &str = "── PROGRAM START ──";
pub const END_MARKER: &str = "── PROGRAM END ──";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    NotStarted,
    Running,
    WaitingForInput,
    Completed,
    Failed,
}

/// The question a session is waiting on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingInput {
    pub prompt: String,
    pub variable: String,
}

/// One execution of a program.
pub struct Session {
    graph: FlowGraph,
    config: EngineConfig,
    current: Option<NodeId>,
    env: Environment,
    console: Console,
    status: Status,
    pending: Option<PendingInput>,
    steps: usize,
    error: Option<ExecutionError>,
}

impl Session {
    pub fn new(graph: FlowGraph) -> Self {
        SessionBuilder::new(graph).build()
    }

    pub fn builder(graph: FlowGraph) -> SessionBuilder {
        SessionBuilder::new(graph)
    }

    pub(crate) fn from_parts(
        graph: FlowGraph,
        config: EngineConfig,
        mirror: Option<Box<dyn IoBridge>>,
    ) -> Self {
        Self {
            graph,
            config,
            current: None,
            env: Environment::new(),
            console: Console {
                log: OutputLog::new(),
                mirror,
            },
            status: Status::NotStarted,
            pending: None,
            steps: 0,
            error: None,
        }
    }

    /// Performs one step.
    pub fn step(&mut self) -> StepOutcome {
        self.step_with(None)
    }

    /// Supplies the answer to a pending input request and performs one step.
    pub fn resume(&mut self, value: &str) -> StepOutcome {
        self.step_with(Some(value))
    }

    /// Performs one step, optionally carrying a value for a pending input request.
    ///
    /// Once the session is `Completed` or `Failed` this does nothing. While it is
    /// `WaitingForInput`, a call without a value does nothing either and is not
    /// counted; a value passed in any other state is ignored.
    pub fn step_with(&mut self, input: Option<&str>) -> StepOutcome {
        if self.is_finished() {
            return StepOutcome::Idle;
        }
        if self.status == Status::WaitingForInput && input.is_none() {
            return StepOutcome::Idle;
        }

        self.steps += 1;
        if self.steps > self.config.max_steps {
            return self.fail(ExecutionError::MaxStepsExceeded {
                limit: self.config.max_steps,
            });
        }

        let result = match (self.status, input) {
            (Status::NotStarted, _) => self.start(),
            (Status::WaitingForInput, Some(raw)) => self.accept_input(raw),
            _ => self.execute_current(),
        };

        match result {
            Ok(outcome) => {
                debug!(step = self.steps, ?outcome, "step");
                outcome
            }
            Err(error) => self.fail(error),
        }
    }

    /// Discards all run state so the same program can be run again from the start.
    pub fn reset(&mut self) {
        self.current = None;
        self.env.clear();
        self.console.log.clear();
        self.status = Status::NotStarted;
        self.pending = None;
        self.steps = 0;
        self.error = None;
        debug!("session reset");
    }

    fn start(&mut self) -> Result<StepOutcome, ExecutionError> {
        let entry = self.graph.find_entry()?.id;
        info!(entry, max_steps = self.config.max_steps, "session started");

        self.status = Status::Running;
        self.current = Some(entry);
        self.console.emit(START_MARKER);
        let next = self.go_to(self.graph.first_successor(entry));
        Ok(StepOutcome::Started { entry, next })
    }

    fn accept_input(&mut self, raw: &str) -> Result<StepOutcome, ExecutionError> {
        let Some(pending) = self.pending.take() else {
            return Ok(StepOutcome::Idle);
        };
        let value = Value::from_input(raw);
        debug!(variable = %pending.variable, %value, "input received");

        self.env.set(pending.variable.clone(), value.clone());
        self.console.emit(&format!("> {}", raw));
        self.status = Status::Running;

        let next = self
            .current
            .and_then(|id| self.graph.first_successor(id));
        let next = self.go_to(next);
        Ok(StepOutcome::Resumed {
            variable: pending.variable,
            value,
            next,
        })
    }

    fn execute_current(&mut self) -> Result<StepOutcome, ExecutionError> {
        let Some(id) = self.current else {
            self.status = Status::Completed;
            return Ok(StepOutcome::Idle);
        };
        let node = self.graph.node(id)?.clone();

        match node.kind {
            NodeKind::Start | NodeKind::End => {
                self.console.emit(END_MARKER);
                self.status = Status::Completed;
                info!(
                    steps = self.steps,
                    variables = self.env.len(),
                    "session completed"
                );
                Ok(StepOutcome::Finished { node: id })
            }
            NodeKind::Connector => {
                let next = self.go_to(self.graph.first_successor(id));
                Ok(StepOutcome::Advanced { from: id, next })
            }
            NodeKind::Process => {
                self.run_statements(&node)?;
                let next = self.go_to(self.graph.first_successor(id));
                Ok(StepOutcome::Advanced { from: id, next })
            }
            NodeKind::Decision => self.branch(&node),
            NodeKind::InputOutput => match InputDirective::parse(&node.body) {
                Some(directive) => {
                    debug!(node = id, prompt = %directive.prompt, "waiting for input");
                    self.console.emit(&directive.prompt);
                    self.status = Status::WaitingForInput;
                    let prompt = directive.prompt.clone();
                    self.pending = Some(PendingInput {
                        prompt: directive.prompt,
                        variable: directive.variable,
                    });
                    Ok(StepOutcome::Suspended { node: id, prompt })
                }
                None => {
                    self.run_statements(&node)?;
                    let next = self.go_to(self.graph.first_successor(id));
                    Ok(StepOutcome::Advanced { from: id, next })
                }
            },
        }
    }

    /// Evaluates a Decision and follows the edge tagged for the result.
    ///
    /// Without a matching tag the first outgoing edge is followed whatever the
    /// result was; an empty condition counts as false.
    fn branch(&mut self, node: &Node) -> Result<StepOutcome, ExecutionError> {
        let condition = if node.body.trim().is_empty() {
            None
        } else {
            let mut evaluator = Evaluator::new(&mut self.env, &mut self.console);
            Some(
                evaluator
                    .eval_condition(&node.body)
                    .map_err(|source| evaluation_error(node, source))?,
            )
        };
        let outcome = condition.as_ref().is_some_and(|c| c.outcome);
        let wanted = Branch::for_outcome(outcome);

        let (taken, target, fallback) = {
            let edges: Vec<_> = self.graph.outgoing_edges(node.id).collect();
            match edges.iter().find(|edge| edge.branch == Some(wanted)) {
                Some(edge) => (Some(wanted), Some(edge.target), false),
                None => {
                    let first = edges.first();
                    (
                        first.and_then(|edge| edge.branch),
                        first.map(|edge| edge.target),
                        first.is_some(),
                    )
                }
            }
        };

        let reason = condition.map_or_else(
            || "empty condition".to_string(),
            |c| TraceFormatter::format_trace(&c.trace),
        );
        debug!(node = node.id, outcome, fallback, %reason, "decision");

        let next = self.go_to(target);
        Ok(StepOutcome::Branched {
            from: node.id,
            outcome,
            taken,
            fallback,
            next,
            reason,
        })
    }

    fn run_statements(&mut self, node: &Node) -> Result<(), ExecutionError> {
        if node.body.trim().is_empty() {
            return Ok(());
        }
        Evaluator::new(&mut self.env, &mut self.console)
            .exec_statements(&node.body)
            .map(|_| ())
            .map_err(|source| evaluation_error(node, source))
    }

    /// Moves to `target`, or completes the run when there is nowhere to go.
    fn go_to(&mut self, target: Option<NodeId>) -> Option<NodeId> {
        self.current = target;
        if target.is_none() {
            self.status = Status::Completed;
            info!(
                steps = self.steps,
                variables = self.env.len(),
                "session completed: no outgoing edge"
            );
        }
        target
    }

    fn fail(&mut self, error: ExecutionError) -> StepOutcome {
        warn!(step = self.steps, node = ?self.current, %error, "session failed");
        self.status = Status::Failed;
        self.pending = None;
        self.error = Some(error.clone());
        StepOutcome::Failed(error)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// `true` once the session is `Completed` or `Failed`.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, Status::Completed | Status::Failed)
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    pub fn output(&self) -> &[String] {
        self.console.log.lines()
    }

    pub fn pending_input(&self) -> Option<&PendingInput> {
        self.pending.as_ref()
    }

    pub fn error(&self) -> Option<&ExecutionError> {
        self.error.as_ref()
    }

    pub fn step_count(&self) -> usize {
        self.steps
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Copies everything a UI renders after a step.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(self)
    }
}

fn evaluation_error(node: &Node, source: crate::error::EvaluationError) -> ExecutionError {
    let label = if node.label.trim().is_empty() {
        format!("#{}", node.id)
    } else {
        node.label.clone()
    };
    ExecutionError::Evaluation { label, source }
}
