use crate::ast::{EvaluationTrace, LeafSource, Value};

/// Formats evaluation traces into human-readable strings.
pub struct TraceFormatter;

impl TraceFormatter {
    /// Format an evaluation trace into a human-readable explanation.
    ///
    /// Variables are annotated with the value they held, e.g. `i (was 6) <= 5`.
    pub fn format_trace(trace: &EvaluationTrace) -> String {
        // Start the recursive formatting with the lowest possible parent precedence.
        Self::format_recursive(trace, 0)
    }

    /// Recursively formats the trace, adding parentheses only when necessary.
    fn format_recursive(trace: &EvaluationTrace, parent_precedence: u8) -> String {
        let current_precedence = trace.precedence();
        let needs_parens = current_precedence < parent_precedence;

        let mut result = String::new();
        if needs_parens {
            result.push('(');
        }

        match trace {
            EvaluationTrace::BinaryOp {
                op_symbol,
                left,
                right,
                ..
            } => {
                let left_str = Self::format_recursive(left, current_precedence);

                // For short-circuiting operators, only include the right side if it was evaluated.
                if !matches!(**right, EvaluationTrace::NotEvaluated) {
                    let right_str = Self::format_recursive(right, current_precedence + 1);
                    result.push_str(&format!("{} {} {}", left_str, op_symbol, right_str));
                } else {
                    result.push_str(&left_str);
                }
            }
            EvaluationTrace::UnaryOp {
                op_symbol, child, ..
            } => {
                let child_str = Self::format_recursive(child, current_precedence);
                result.push_str(&format!("{}{}", op_symbol, child_str));
            }
            EvaluationTrace::Call { function, args, .. } => {
                let args_str = args
                    .iter()
                    .map(|arg| Self::format_recursive(arg, 0))
                    .collect::<Vec<_>>()
                    .join(", ");
                result.push_str(&format!("{}({})", function, args_str));
            }
            EvaluationTrace::Leaf { source, value } => match source {
                LeafSource::Variable(name) => {
                    result.push_str(&format!("{} (was {})", name, Self::format_value(value)));
                }
                LeafSource::Literal => result.push_str(&Self::format_value(value)),
            },
            EvaluationTrace::NotEvaluated => {}
        }

        if needs_parens {
            result.push(')');
        }
        result
    }

    /// Format a value for display; text is quoted so it stands out from names.
    fn format_value(value: &Value) -> String {
        match value {
            Value::Text(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}
