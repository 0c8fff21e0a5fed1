//! The mini language used in node bodies.
//!
//! Decision bodies hold a single expression. Process and InputOutput bodies hold
//! `;`-separated statements, each either `name = expression` or a bare
//! expression such as `print("hi")`. InputOutput bodies may instead hold an
//! input directive, see [`InputDirective`].

use crate::ast::{Expression, Statement};
use crate::error::ParseError;

mod directive;
pub mod lexer;
mod parser;

pub use directive::{DEFAULT_PROMPT, DEFAULT_VARIABLE, InputDirective};

use lexer::{Token, TokenKind, tokenize};
use parser::Parser;

/// Parses a body holding exactly one expression.
pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    let tokens = tokenize(source)?;
    Parser::new(&tokens).complete_expression()
}

/// Parses one statement from its own `Eof`-terminated token stream, as produced
/// by [`split_statements`].
pub fn parse_statement(tokens: &[Token]) -> Result<Statement, ParseError> {
    Parser::new(tokens).statement()
}

/// Tokenizes a statement body and cuts it at top-level `;` tokens.
///
/// Empty statements are dropped. Each returned chunk ends with its own `Eof`
/// so it can be handed to [`parse_statement`] independently, which lets the
/// evaluator run earlier statements before a later one fails to parse.
pub fn split_statements(source: &str) -> Result<Vec<Vec<Token>>, ParseError> {
    let mut chunks = Vec::new();
    let mut current = Vec::new();
    for token in tokenize(source)? {
        match token.kind {
            TokenKind::Semicolon | TokenKind::Eof => {
                if !current.is_empty() {
                    current.push(Token {
                        kind: TokenKind::Eof,
                        position: token.position,
                    });
                    chunks.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(token),
        }
    }
    Ok(chunks)
}

/// Parses every statement of a body up front.
pub fn parse_statements(source: &str) -> Result<Vec<Statement>, ParseError> {
    split_statements(source)?
        .iter()
        .map(|tokens| parse_statement(tokens))
        .collect()
}
