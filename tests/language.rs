//! Tests for the lexer, parser, and input directive.
use flowrun::ast::{Builtin, Expression, Statement, Value};
use flowrun::language::lexer::{TokenKind, tokenize};
use flowrun::language::{
    DEFAULT_PROMPT, DEFAULT_VARIABLE, InputDirective, parse_expression, parse_statement,
    parse_statements, split_statements,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_tokenize_operators_and_literals() {
    assert_eq!(
        kinds("x >= 1.5 && !done"),
        vec![
            TokenKind::Ident("x".to_string()),
            TokenKind::Ge,
            TokenKind::Number(1.5),
            TokenKind::AndAnd,
            TokenKind::Bang,
            TokenKind::Ident("done".to_string()),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("a = b == c != d"),
        vec![
            TokenKind::Ident("a".to_string()),
            TokenKind::Assign,
            TokenKind::Ident("b".to_string()),
            TokenKind::EqEq,
            TokenKind::Ident("c".to_string()),
            TokenKind::BangEq,
            TokenKind::Ident("d".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_tokenize_text_literals() {
    assert_eq!(
        kinds(r#""a;b" 'it\'s' "line\n""#),
        vec![
            TokenKind::Text("a;b".to_string()),
            TokenKind::Text("it's".to_string()),
            TokenKind::Text("line\n".to_string()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_tokenize_positions() {
    let tokens = tokenize("  sum + 10").unwrap();
    let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
    assert_eq!(positions, vec![2, 6, 8, 10]);
}

#[test]
fn test_tokenize_errors() {
    let err = tokenize("\"open").unwrap_err();
    assert_eq!(err.position, 0);
    assert!(err.message.contains("unterminated"));

    let err = tokenize("a & b").unwrap_err();
    assert_eq!(err.position, 2);

    assert!(tokenize("x = 1 # comment").is_err());
}

#[test]
fn test_parse_precedence() {
    let expr = parse_expression("1 + 2 * 3").unwrap();
    assert_eq!(
        expr,
        Expression::Sum(
            Box::new(Expression::Literal(Value::Number(1.0))),
            Box::new(Expression::Multiply(
                Box::new(Expression::Literal(Value::Number(2.0))),
                Box::new(Expression::Literal(Value::Number(3.0))),
            )),
        )
    );

    let expr = parse_expression("a || b && c").unwrap();
    assert!(matches!(expr, Expression::Or(_, ref r) if matches!(**r, Expression::And(_, _))));

    let expr = parse_expression("8 - 4 - 2").unwrap();
    assert!(matches!(expr, Expression::Subtract(ref l, _) if matches!(**l, Expression::Subtract(_, _))));
}

#[test]
fn test_parse_calls() {
    let expr = parse_expression(r#"print("a", 1)"#).unwrap();
    match expr {
        Expression::Call { function, args } => {
            assert_eq!(function, Builtin::Print);
            assert_eq!(args.len(), 2);
        }
        other => panic!("expected a call, got {:?}", other),
    }

    let err = parse_expression("system(\"rm\")").unwrap_err();
    assert!(err.message.contains("unknown function 'system'"));
}

#[test]
fn test_parse_expression_errors() {
    assert!(parse_expression("").is_err());
    assert!(parse_expression("1 +").is_err());
    assert!(parse_expression("(1 + 2").is_err());
    assert!(parse_expression("1 2").is_err());
    let err = parse_expression("x = 1").unwrap_err();
    assert!(err.message.contains("expected end of input"));
}

#[test]
fn test_parse_statements() {
    let statements = parse_statements("i = 1; sum = 0;; print(sum)").unwrap();
    assert_eq!(statements.len(), 3);
    assert!(matches!(&statements[0], Statement::Assign { name, .. } if name == "i"));
    assert!(matches!(&statements[2], Statement::Expression(Expression::Call { .. })));
    assert_eq!(statements[1].to_string(), "sum = 0");
}

#[test]
fn test_split_statements_ignores_semicolons_in_text() {
    let chunks = split_statements(r#"s = "a;b"; t = 1"#).unwrap();
    assert_eq!(chunks.len(), 2);
    assert!(chunks.iter().all(|c| c.last().is_some_and(|t| t.kind == TokenKind::Eof)));
    assert!(split_statements("  ;  ").unwrap().is_empty());
}

#[test]
fn test_input_directive() {
    let directive = InputDirective::parse(r#"input("Enter name:", name)"#).unwrap();
    assert_eq!(directive.prompt, "Enter name:");
    assert_eq!(directive.variable, "name");

    let directive = InputDirective::parse(" READ('Age?' , age) ").unwrap();
    assert_eq!(directive.prompt, "Age?");
    assert_eq!(directive.variable, "age");

    let directive = InputDirective::parse("input()").unwrap();
    assert_eq!(directive.prompt, DEFAULT_PROMPT);
    assert_eq!(directive.variable, DEFAULT_VARIABLE);

    let directive = InputDirective::parse("input(n)").unwrap();
    assert_eq!(directive.prompt, DEFAULT_PROMPT);
    assert_eq!(directive.variable, "n");

    let directive = InputDirective::parse(r#"input("")"#).unwrap();
    assert_eq!(directive.prompt, DEFAULT_PROMPT);
}

#[test]
fn test_input_directive_optional_quotes() {
    let directive = InputDirective::parse("input(Enter name, name)").unwrap();
    assert_eq!(directive.prompt, "Enter name");
    assert_eq!(directive.variable, "name");

    let directive = InputDirective::parse(r#"input("Age?", "age")"#).unwrap();
    assert_eq!(directive.prompt, "Age?");
    assert_eq!(directive.variable, "age");

    let directive = InputDirective::parse("read('Count:', 'n')").unwrap();
    assert_eq!(directive.prompt, "Count:");
    assert_eq!(directive.variable, "n");

    let directive = InputDirective::parse("input(Enter a number)").unwrap();
    assert_eq!(directive.prompt, "Enter a number");
    assert_eq!(directive.variable, DEFAULT_VARIABLE);

    let directive = InputDirective::parse(r#"input("a, b", v)"#).unwrap();
    assert_eq!(directive.prompt, "a, b");
    assert_eq!(directive.variable, "v");
}

#[test]
fn test_input_directive_rejects_other_bodies() {
    assert!(InputDirective::parse(r#"print("x")"#).is_none());
    assert!(InputDirective::parse("x = input").is_none());
    assert!(InputDirective::parse(r#"input("a", b); print(b)"#).is_none());
}

#[test]
fn test_parse_statement_without_tokens() {
    let err = parse_statement(&[]).unwrap_err();
    assert!(err.message.contains("expected an expression"));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let parens = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    let err = parse_expression(&parens).unwrap_err();
    assert!(err.message.contains("nested too deeply"));

    let unary = format!("{}1", "-".repeat(10_000));
    assert!(parse_expression(&unary).unwrap_err().message.contains("nested too deeply"));

    let calls = format!("{}1{}", "str(".repeat(10_000), ")".repeat(10_000));
    assert!(parse_expression(&calls).unwrap_err().message.contains("nested too deeply"));
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let chain = format!("{}1", "1 + ".repeat(10_000));
    let err = parse_expression(&chain).unwrap_err();
    assert!(err.message.contains("nested too deeply"));
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let parens = format!("{}1{}", "(".repeat(40), ")".repeat(40));
    assert_eq!(
        parse_expression(&parens).unwrap(),
        Expression::Literal(Value::Number(1.0))
    );

    let chain = format!("{}1", "1 + ".repeat(100));
    assert!(parse_expression(&chain).is_ok());
}
