use super::Value;

/// A record of how an expression was evaluated, including intermediate values.
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationTrace {
    BinaryOp {
        op_symbol: &'static str,
        left: Box<EvaluationTrace>,
        right: Box<EvaluationTrace>,
        outcome: Value,
    },
    UnaryOp {
        op_symbol: &'static str,
        child: Box<EvaluationTrace>,
        outcome: Value,
    },
    Call {
        function: &'static str,
        args: Vec<EvaluationTrace>,
        outcome: Value,
    },
    Leaf {
        source: LeafSource,
        value: Value,
    },
    /// The right operand of a short-circuited `&&` / `||`.
    NotEvaluated,
}

/// Where a leaf value came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafSource {
    Literal,
    Variable(String),
}

impl EvaluationTrace {
    pub fn get_outcome(&self) -> Value {
        match self {
            EvaluationTrace::BinaryOp { outcome, .. } => outcome.clone(),
            EvaluationTrace::UnaryOp { outcome, .. } => outcome.clone(),
            EvaluationTrace::Call { outcome, .. } => outcome.clone(),
            EvaluationTrace::Leaf { value, .. } => value.clone(),
            EvaluationTrace::NotEvaluated => Value::Bool(false),
        }
    }

    /// Mirrors `Expression::precedence`.
    pub fn precedence(&self) -> u8 {
        match self {
            EvaluationTrace::BinaryOp { op_symbol, .. } => match *op_symbol {
                "||" => 1,
                "&&" => 2,
                "==" | "!=" => 3,
                ">" | ">=" | "<" | "<=" => 4,
                "+" | "-" => 5,
                "*" | "/" | "%" => 6,
                _ => 0,
            },
            EvaluationTrace::UnaryOp { .. } => 7,
            EvaluationTrace::Call { .. }
            | EvaluationTrace::Leaf { .. }
            | EvaluationTrace::NotEvaluated => 8,
        }
    }
}
