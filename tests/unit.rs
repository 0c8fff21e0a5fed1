//! Unit tests for values, expressions, errors, and trace formatting.
use flowrun::ast::{Builtin, LeafSource};
use flowrun::error::FaultKind;
use flowrun::language::parse_expression;
use flowrun::prelude::*;

#[test]
fn test_value_display() {
    assert_eq!(format!("{}", Value::Number(42.0)), "42");
    assert_eq!(format!("{}", Value::Number(-3.0)), "-3");
    assert_eq!(format!("{}", Value::Number(2.5)), "2.5");
    assert_eq!(format!("{}", Value::Bool(true)), "true");
    assert_eq!(format!("{}", Value::from("hi")), "hi");
}

#[test]
fn test_value_truthiness() {
    assert!(Value::Number(1.0).is_truthy());
    assert!(!Value::Number(0.0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(Value::from("x").is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(!Value::Bool(false).is_truthy());
}

#[test]
fn test_value_from_input() {
    assert_eq!(Value::from_input("42"), Value::Number(42.0));
    assert_eq!(Value::from_input(" 3.5 "), Value::Number(3.5));
    assert_eq!(Value::from_input("1e3"), Value::Number(1000.0));
    assert_eq!(Value::from_input("foo"), Value::from("foo"));
    assert_eq!(Value::from_input("12abc"), Value::from("12abc"));
    assert_eq!(Value::from_input("inf"), Value::from("inf"));
    assert_eq!(Value::from_input(""), Value::from(""));
}

#[test]
fn test_expression_display_minimal_parentheses() {
    let cases = [
        ("1 + 2 * 3", "1 + 2 * 3"),
        ("(1 + 2) * 3", "(1 + 2) * 3"),
        ("a - (b - c)", "a - (b - c)"),
        ("(a - b) - c", "a - b - c"),
        ("!(a && b) || c", "!(a && b) || c"),
        ("-(x + 1)", "-(x + 1)"),
        ("print('hi', x)", "print(\"hi\", x)"),
    ];
    for (source, expected) in cases {
        let expr = parse_expression(source).unwrap();
        assert_eq!(expr.to_string(), expected, "display of {:?}", source);
    }
}

#[test]
fn test_expression_referenced_variables() {
    let expr = parse_expression("a + b * a > str(c) && !d").unwrap();
    let mut names = Vec::new();
    expr.referenced_variables(&mut names);
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_builtin_names() {
    assert_eq!(Builtin::from_name("print"), Some(Builtin::Print));
    assert_eq!(Builtin::from_name("str"), Some(Builtin::Str));
    assert_eq!(Builtin::from_name("eval"), None);
    assert_eq!(Builtin::Str.name(), "str");
}

#[test]
fn test_trace_formatter_annotates_variables() {
    let trace = EvaluationTrace::BinaryOp {
        op_symbol: "<=",
        left: Box::new(EvaluationTrace::Leaf {
            source: LeafSource::Variable("i".to_string()),
            value: Value::Number(6.0),
        }),
        right: Box::new(EvaluationTrace::Leaf {
            source: LeafSource::Literal,
            value: Value::Number(5.0),
        }),
        outcome: Value::Bool(false),
    };
    assert_eq!(TraceFormatter::format_trace(&trace), "i (was 6) <= 5");
}

#[test]
fn test_trace_formatter_short_circuit_and_text() {
    let trace = EvaluationTrace::BinaryOp {
        op_symbol: "&&",
        left: Box::new(EvaluationTrace::Leaf {
            source: LeafSource::Variable("name".to_string()),
            value: Value::from(""),
        }),
        right: Box::new(EvaluationTrace::NotEvaluated),
        outcome: Value::Bool(false),
    };
    assert_eq!(TraceFormatter::format_trace(&trace), "name (was \"\")");
    assert_eq!(trace.get_outcome(), Value::Bool(false));
}

#[test]
fn test_execution_error_display() {
    assert_eq!(ExecutionError::MissingEntry.to_string(), "NO START NODE");
    assert_eq!(
        ExecutionError::BrokenLink { node_id: 7 }.to_string(),
        "BROKEN LINK: node '7' does not exist"
    );
    let fault = ExecutionError::Evaluation {
        label: "INIT".to_string(),
        source: EvaluationError::UndefinedVariable("q".to_string()),
    };
    assert_eq!(
        fault.to_string(),
        "ERROR at \"INIT\": Variable 'q' is not defined"
    );
    assert!(
        ExecutionError::MaxStepsExceeded { limit: 500 }
            .to_string()
            .starts_with("MAX STEPS EXCEEDED")
    );
}

#[test]
fn test_execution_error_kind() {
    assert_eq!(ExecutionError::MissingEntry.kind(), FaultKind::MissingEntry);
    assert_eq!(
        ExecutionError::MaxStepsExceeded { limit: 1 }.kind(),
        FaultKind::MaxStepsExceeded
    );
    assert_eq!(
        ExecutionError::Evaluation {
            label: String::new(),
            source: EvaluationError::DivisionByZero { operation: "/" },
        }
        .kind(),
        FaultKind::EvaluationError
    );
}

#[test]
fn test_parse_error_converts_into_evaluation_error() {
    let err: EvaluationError = ParseError::new(3, "expected an expression").into();
    assert_eq!(
        err.to_string(),
        "syntax error at column 3: expected an expression"
    );
}
