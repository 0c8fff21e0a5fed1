use super::Environment;
use crate::ast::{Builtin, EvaluationTrace, Expression, LeafSource, Value};
use crate::error::EvaluationError;
use crate::io::IoBridge;

/// The core recursive engine for evaluating a single expression against an environment.
///
/// The environment is read-only here; only `print` has a side effect, and it
/// goes through the I/O bridge.
pub(super) struct AstEngine<'e, 'io> {
    env: &'e Environment,
    io: &'e mut (dyn IoBridge + 'io),
}

impl<'e, 'io> AstEngine<'e, 'io> {
    pub(super) fn new(env: &'e Environment, io: &'e mut (dyn IoBridge + 'io)) -> Self {
        Self { env, io }
    }

    /// Evaluates the expression and returns a trace of the execution.
    pub(super) fn evaluate(&mut self, expr: &Expression) -> Result<EvaluationTrace, EvaluationError> {
        match expr {
            // --- Arithmetic Operations ---
            Expression::Sum(l, r) => {
                let left = self.evaluate(l)?;
                let right = self.evaluate(r)?;
                let outcome = match (left.get_outcome(), right.get_outcome()) {
                    (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
                    (a @ Value::Text(_), b) | (a, b @ Value::Text(_)) => {
                        Value::Text(format!("{}{}", a, b))
                    }
                    (Value::Number(_), found) | (found, _) => {
                        return Err(type_mismatch("+", "Number or Text", found));
                    }
                };
                Ok(binary("+", left, right, outcome))
            }
            Expression::Subtract(l, r) => self.eval_arithmetic(l, r, "-", |a, b| Ok(a - b)),
            Expression::Multiply(l, r) => self.eval_arithmetic(l, r, "*", |a, b| Ok(a * b)),
            Expression::Divide(l, r) => self.eval_arithmetic(l, r, "/", |a, b| {
                if b == 0.0 {
                    Err(EvaluationError::DivisionByZero { operation: "/" })
                } else {
                    Ok(a / b)
                }
            }),
            Expression::Modulo(l, r) => self.eval_arithmetic(l, r, "%", |a, b| {
                if b == 0.0 {
                    Err(EvaluationError::DivisionByZero { operation: "%" })
                } else {
                    Ok(a % b)
                }
            }),
            Expression::Negate(v) => {
                let child = self.evaluate(v)?;
                let outcome = match child.get_outcome() {
                    Value::Number(n) => Value::Number(-n),
                    found => return Err(type_mismatch("-", "Number", found)),
                };
                Ok(EvaluationTrace::UnaryOp {
                    op_symbol: "-",
                    child: Box::new(child),
                    outcome,
                })
            }

            // --- Comparison Operations ---
            Expression::GreaterThan(l, r) => self.eval_comparison(l, r, ">", |o| o.is_gt()),
            Expression::SmallerThan(l, r) => self.eval_comparison(l, r, "<", |o| o.is_lt()),
            Expression::GreaterThanOrEqual(l, r) => {
                self.eval_comparison(l, r, ">=", |o| o.is_ge())
            }
            Expression::SmallerThanOrEqual(l, r) => {
                self.eval_comparison(l, r, "<=", |o| o.is_le())
            }

            // --- Equality ---
            Expression::Equal(l, r) => {
                let left = self.evaluate(l)?;
                let right = self.evaluate(r)?;
                let outcome = Value::Bool(left.get_outcome() == right.get_outcome());
                Ok(binary("==", left, right, outcome))
            }
            Expression::NotEqual(l, r) => {
                let left = self.evaluate(l)?;
                let right = self.evaluate(r)?;
                let outcome = Value::Bool(left.get_outcome() != right.get_outcome());
                Ok(binary("!=", left, right, outcome))
            }

            // --- Logical Operations ---
            Expression::And(l, r) => {
                let left = self.evaluate(l)?;
                if !left.get_outcome().is_truthy() {
                    return Ok(binary(
                        "&&",
                        left,
                        EvaluationTrace::NotEvaluated,
                        Value::Bool(false),
                    ));
                }
                let right = self.evaluate(r)?;
                let outcome = Value::Bool(right.get_outcome().is_truthy());
                Ok(binary("&&", left, right, outcome))
            }
            Expression::Or(l, r) => {
                let left = self.evaluate(l)?;
                if left.get_outcome().is_truthy() {
                    return Ok(binary(
                        "||",
                        left,
                        EvaluationTrace::NotEvaluated,
                        Value::Bool(true),
                    ));
                }
                let right = self.evaluate(r)?;
                let outcome = Value::Bool(right.get_outcome().is_truthy());
                Ok(binary("||", left, right, outcome))
            }
            Expression::Not(v) => {
                let child = self.evaluate(v)?;
                let outcome = Value::Bool(!child.get_outcome().is_truthy());
                Ok(EvaluationTrace::UnaryOp {
                    op_symbol: "!",
                    child: Box::new(child),
                    outcome,
                })
            }

            // --- Leaf nodes ---
            Expression::Literal(value) => Ok(EvaluationTrace::Leaf {
                source: LeafSource::Literal,
                value: value.clone(),
            }),
            Expression::Variable(name) => {
                let value = self
                    .env
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvaluationError::UndefinedVariable(name.clone()))?;
                Ok(EvaluationTrace::Leaf {
                    source: LeafSource::Variable(name.clone()),
                    value,
                })
            }
            Expression::Call { function, args } => self.eval_call(*function, args),
        }
    }

    fn eval_call(
        &mut self,
        function: Builtin,
        args: &[Expression],
    ) -> Result<EvaluationTrace, EvaluationError> {
        let traces = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = match function {
            Builtin::Print => {
                let line = traces
                    .iter()
                    .map(|t| t.get_outcome().to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.io.emit(&line);
                traces
                    .first()
                    .map_or_else(|| Value::Text(String::new()), EvaluationTrace::get_outcome)
            }
            Builtin::Str => match traces.as_slice() {
                [only] => Value::Text(only.get_outcome().to_string()),
                _ => {
                    return Err(EvaluationError::ArgumentCount {
                        function: function.name().to_string(),
                        expected: 1,
                        found: traces.len(),
                    });
                }
            },
        };

        Ok(EvaluationTrace::Call {
            function: function.name(),
            args: traces,
            outcome,
        })
    }

    fn eval_arithmetic<F>(
        &mut self,
        l: &Expression,
        r: &Expression,
        op: &'static str,
        f: F,
    ) -> Result<EvaluationTrace, EvaluationError>
    where
        F: Fn(f64, f64) -> Result<f64, EvaluationError>,
    {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        let outcome = match (left.get_outcome(), right.get_outcome()) {
            (Value::Number(a), Value::Number(b)) => Value::Number(f(a, b)?),
            (Value::Number(_), found) | (found, _) => {
                return Err(type_mismatch(op, "Number", found));
            }
        };
        Ok(binary(op, left, right, outcome))
    }

    /// Numbers compare numerically and text compares lexicographically.
    fn eval_comparison<F>(
        &mut self,
        l: &Expression,
        r: &Expression,
        op: &'static str,
        f: F,
    ) -> Result<EvaluationTrace, EvaluationError>
    where
        F: Fn(std::cmp::Ordering) -> bool,
    {
        let left = self.evaluate(l)?;
        let right = self.evaluate(r)?;
        let outcome = match (left.get_outcome(), right.get_outcome()) {
            (Value::Number(a), Value::Number(b)) => {
                Value::Bool(a.partial_cmp(&b).is_some_and(&f))
            }
            (Value::Text(a), Value::Text(b)) => Value::Bool(f(a.cmp(&b))),
            (Value::Number(_), found) => return Err(type_mismatch(op, "Number", found)),
            (Value::Text(_), found) => return Err(type_mismatch(op, "Text", found)),
            (found, _) => return Err(type_mismatch(op, "Number or Text", found)),
        };
        Ok(binary(op, left, right, outcome))
    }
}

fn binary(
    op_symbol: &'static str,
    left: EvaluationTrace,
    right: EvaluationTrace,
    outcome: Value,
) -> EvaluationTrace {
    EvaluationTrace::BinaryOp {
        op_symbol,
        left: Box::new(left),
        right: Box::new(right),
        outcome,
    }
}

fn type_mismatch(op: &str, expected: &str, found: Value) -> EvaluationError {
    EvaluationError::TypeMismatch {
        operation: op.to_string(),
        expected: expected.to_string(),
        found,
    }
}
