use crate::ast::{EvaluationTrace, Expression, Statement};
use crate::error::EvaluationError;
use crate::io::IoBridge;
use crate::language;
use tracing::trace;

mod engine;
mod environment;

use engine::AstEngine;
pub use environment::Environment;

/// The result of evaluating a Decision body.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The body's value coerced to a boolean.
    pub outcome: bool,
    /// How the value was reached, for explaining the branch taken.
    pub trace: EvaluationTrace,
}

/// Evaluates node bodies against a run's environment.
///
/// An `Evaluator` borrows the environment mutably for the duration of one node
/// execution. It performs no recovery: the first fault is returned and any
/// assignments made before it stay applied.
pub struct Evaluator<'a> {
    env: &'a mut Environment,
    io: &'a mut dyn IoBridge,
}

impl<'a> Evaluator<'a> {
    pub fn new(env: &'a mut Environment, io: &'a mut dyn IoBridge) -> Self {
        Self { env, io }
    }

    /// Evaluates a parsed expression without touching the environment.
    pub fn evaluate(&mut self, expr: &Expression) -> Result<EvaluationTrace, EvaluationError> {
        AstEngine::new(self.env, self.io).evaluate(expr)
    }

    /// Expression mode: parses `body` as one expression and coerces it to a boolean.
    pub fn eval_condition(&mut self, body: &str) -> Result<Condition, EvaluationError> {
        let expr = language::parse_expression(body)?;
        let trace = self.evaluate(&expr)?;
        let outcome = trace.get_outcome().is_truthy();
        Ok(Condition { outcome, trace })
    }

    /// Statement mode: runs the `;`-separated statements of `body` left to right.
    ///
    /// Each statement is parsed just before it runs, so it sees every assignment
    /// made by the statements before it. Returns the number of statements run.
    pub fn exec_statements(&mut self, body: &str) -> Result<usize, EvaluationError> {
        let chunks = language::split_statements(body)?;
        for tokens in &chunks {
            let statement = language::parse_statement(tokens)?;
            self.execute(&statement)?;
        }
        Ok(chunks.len())
    }

    /// Runs a single statement.
    pub fn execute(&mut self, statement: &Statement) -> Result<(), EvaluationError> {
        match statement {
            Statement::Assign { name, value } => {
                let value = self.evaluate(value)?.get_outcome();
                trace!(variable = %name, %value, "assign");
                self.env.set(name.clone(), value);
            }
            Statement::Expression(expr) => {
                self.evaluate(expr)?;
            }
        }
        Ok(())
    }
}
