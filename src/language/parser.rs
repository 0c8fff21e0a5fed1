use super::lexer::{Token, TokenKind};
use crate::ast::{Builtin, Expression, Statement, Value};
use crate::error::ParseError;

/// Height of the tallest expression tree a body may produce.
const MAX_DEPTH: usize = 256;
/// Deepest parenthesis, unary, and call nesting the parser follows.
const MAX_NESTING: usize = 64;

static END: Token = Token {
    kind: TokenKind::Eof,
    position: 0,
};

/// A parsed subtree together with the height of its tree.
struct Parsed {
    expr: Expression,
    depth: usize,
}

impl Parsed {
    fn leaf(expr: Expression) -> Self {
        Self { expr, depth: 1 }
    }
}

type BinaryBuilder = fn(Box<Expression>, Box<Expression>) -> Expression;

/// Recursive-descent parser over the tokens of a single expression or statement.
///
/// Precedence, lowest first: `||`, `&&`, equality, relational, additive,
/// multiplicative, unary, primary. All binary operators are left-associative.
/// The parser's own recursion is capped at `MAX_NESTING` and the height of the
/// tree it builds at `MAX_DEPTH`, so evaluating, formatting, or dropping a
/// parsed tree never recurses deeper than that.
pub(super) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    nesting: usize,
}

impl<'t> Parser<'t> {
    /// `tokens` should end with an `Eof` token; a missing one is treated as present.
    pub(super) fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            nesting: 0,
        }
    }

    /// Parses the whole token stream as one statement.
    pub(super) fn statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match (self.peek_kind(), self.peek_kind_at(1)) {
            (TokenKind::Ident(name), TokenKind::Assign) => {
                let name = name.clone();
                self.pos += 2;
                Statement::Assign {
                    name,
                    value: self.expression()?.expr,
                }
            }
            _ => Statement::Expression(self.expression()?.expr),
        };
        self.expect_end()?;
        Ok(statement)
    }

    /// Parses the whole token stream as one expression.
    pub(super) fn complete_expression(&mut self) -> Result<Expression, ParseError> {
        let parsed = self.expression()?;
        self.expect_end()?;
        Ok(parsed.expr)
    }

    fn expression(&mut self) -> Result<Parsed, ParseError> {
        if matches!(self.peek_kind(), TokenKind::Eof) {
            return Err(self.unexpected("an expression"));
        }
        self.logical_or()
    }

    fn logical_or(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.logical_and()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.logical_and()?;
            left = self.join(Expression::Or, left, right)?;
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.equality()?;
            left = self.join(Expression::And, left, right)?;
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.relational()?;
        loop {
            let build: BinaryBuilder = match self.peek_kind() {
                TokenKind::EqEq => Expression::Equal,
                TokenKind::BangEq => Expression::NotEqual,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.relational()?;
            left = self.join(build, left, right)?;
        }
    }

    fn relational(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.additive()?;
        loop {
            let build: BinaryBuilder = match self.peek_kind() {
                TokenKind::Lt => Expression::SmallerThan,
                TokenKind::Le => Expression::SmallerThanOrEqual,
                TokenKind::Gt => Expression::GreaterThan,
                TokenKind::Ge => Expression::GreaterThanOrEqual,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.additive()?;
            left = self.join(build, left, right)?;
        }
    }

    fn additive(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.multiplicative()?;
        loop {
            let build: BinaryBuilder = match self.peek_kind() {
                TokenKind::Plus => Expression::Sum,
                TokenKind::Minus => Expression::Subtract,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.multiplicative()?;
            left = self.join(build, left, right)?;
        }
    }

    fn multiplicative(&mut self) -> Result<Parsed, ParseError> {
        let mut left = self.unary()?;
        loop {
            let build: BinaryBuilder = match self.peek_kind() {
                TokenKind::Star => Expression::Multiply,
                TokenKind::Slash => Expression::Divide,
                TokenKind::Percent => Expression::Modulo,
                _ => return Ok(left),
            };
            self.pos += 1;
            let right = self.unary()?;
            left = self.join(build, left, right)?;
        }
    }

    fn unary(&mut self) -> Result<Parsed, ParseError> {
        let build: fn(Box<Expression>) -> Expression = match self.peek_kind() {
            TokenKind::Minus => Expression::Negate,
            TokenKind::Bang => Expression::Not,
            _ => return self.primary(),
        };
        let position = self.current().position;
        self.pos += 1;

        self.descend()?;
        let child = self.unary()?;
        self.nesting -= 1;

        let depth = self.checked_depth(child.depth + 1, position)?;
        Ok(Parsed {
            expr: build(Box::new(child.expr)),
            depth,
        })
    }

    fn primary(&mut self) -> Result<Parsed, ParseError> {
        let token = self.current().clone();
        let expr = match token.kind {
            TokenKind::Number(n) => Expression::Literal(Value::Number(n)),
            TokenKind::Text(s) => Expression::Literal(Value::Text(s)),
            TokenKind::True => Expression::Literal(Value::Bool(true)),
            TokenKind::False => Expression::Literal(Value::Bool(false)),
            TokenKind::Ident(name) => {
                if matches!(self.peek_kind_at(1), TokenKind::LParen) {
                    return self.call(name, token.position);
                }
                Expression::Variable(name)
            }
            TokenKind::LParen => {
                self.pos += 1;
                self.descend()?;
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                self.nesting -= 1;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("an expression")),
        };
        self.pos += 1;
        Ok(Parsed::leaf(expr))
    }

    fn call(&mut self, name: String, position: usize) -> Result<Parsed, ParseError> {
        let function = Builtin::from_name(&name)
            .ok_or_else(|| ParseError::new(position, format!("unknown function '{}'", name)))?;
        // Skip the name and the opening parenthesis.
        self.pos += 2;
        self.descend()?;

        let mut args = Vec::new();
        let mut deepest = 0;
        if !self.eat(&TokenKind::RParen) {
            loop {
                let arg = self.expression()?;
                deepest = deepest.max(arg.depth);
                args.push(arg.expr);
                if self.eat(&TokenKind::Comma) {
                    continue;
                }
                self.expect(&TokenKind::RParen)?;
                break;
            }
        }
        self.nesting -= 1;

        let depth = self.checked_depth(deepest + 1, position)?;
        Ok(Parsed {
            expr: Expression::Call { function, args },
            depth,
        })
    }

    fn join(&self, build: BinaryBuilder, left: Parsed, right: Parsed) -> Result<Parsed, ParseError> {
        let depth = self.checked_depth(left.depth.max(right.depth) + 1, self.current().position)?;
        Ok(Parsed {
            expr: build(Box::new(left.expr), Box::new(right.expr)),
            depth,
        })
    }

    /// Enters one level of parenthesis, unary, or call nesting.
    fn descend(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting > MAX_NESTING {
            return Err(self.too_deep(self.current().position));
        }
        Ok(())
    }

    fn checked_depth(&self, depth: usize, position: usize) -> Result<usize, ParseError> {
        if depth > MAX_DEPTH {
            Err(self.too_deep(position))
        } else {
            Ok(depth)
        }
    }

    fn too_deep(&self, position: usize) -> ParseError {
        ParseError::new(position, "expression nested too deeply")
    }

    fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens
            .get(index)
            .or_else(|| self.tokens.last())
            .unwrap_or(&END)
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_kind_at(&self, offset: usize) -> &TokenKind {
        &self.token_at(self.pos + offset).kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_end(&self) -> Result<(), ParseError> {
        match self.peek_kind() {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    fn unexpected(&self, wanted: &str) -> ParseError {
        let token = self.current();
        ParseError::new(
            token.position,
            format!("expected {}, found {}", wanted, token.kind),
        )
    }
}
