use crate::error::ParseError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Text(String),
    Ident(String),
    True,
    False,

    LParen,
    RParen,
    Comma,
    Semicolon,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,

    Assign,
    EqEq,
    BangEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Text(s) => write!(f, "text {:?}", s),
            TokenKind::Ident(name) => write!(f, "'{}'", name),
            TokenKind::True => write!(f, "'true'"),
            TokenKind::False => write!(f, "'false'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::BangEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token.
    pub position: usize,
}

/// Splits a node body into tokens, always terminated by a single `Eof`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source,
        chars: source.char_indices().peekable(),
    };
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<Token, ParseError> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((position, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position: self.source.len(),
            });
        };

        let digit_next = self.chars.peek().is_some_and(|(_, n)| n.is_ascii_digit());
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => self.with_equals(TokenKind::EqEq, TokenKind::Assign),
            '!' => self.with_equals(TokenKind::BangEq, TokenKind::Bang),
            '<' => self.with_equals(TokenKind::Le, TokenKind::Lt),
            '>' => self.with_equals(TokenKind::Ge, TokenKind::Gt),
            '&' => self.doubled('&', TokenKind::AndAnd, position)?,
            '|' => self.doubled('|', TokenKind::OrOr, position)?,
            '"' | '\'' => self.text(c, position)?,
            c if c.is_ascii_digit() => self.number(position)?,
            '.' if digit_next => self.number(position)?,
            c if c.is_alphabetic() || c == '_' => self.identifier(position),
            other => {
                return Err(ParseError::new(
                    position,
                    format!("unexpected character '{}'", other),
                ));
            }
        };

        Ok(Token { kind, position })
    }

    fn with_equals(&mut self, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.chars.next_if(|(_, c)| *c == '=').is_some() {
            matched
        } else {
            single
        }
    }

    fn doubled(
        &mut self,
        expected: char,
        kind: TokenKind,
        position: usize,
    ) -> Result<TokenKind, ParseError> {
        if self.chars.next_if(|(_, c)| *c == expected).is_some() {
            Ok(kind)
        } else {
            Err(ParseError::new(
                position,
                format!("expected '{0}{0}'", expected),
            ))
        }
    }

    fn text(&mut self, quote: char, position: usize) -> Result<TokenKind, ParseError> {
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(TokenKind::Text(value)),
                Some((escape_at, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, c @ ('\\' | '"' | '\''))) => value.push(c),
                    Some((_, other)) => {
                        return Err(ParseError::new(
                            escape_at,
                            format!("unknown escape sequence '\\{}'", other),
                        ));
                    }
                    None => break,
                },
                Some((_, c)) => value.push(c),
                None => break,
            }
        }
        Err(ParseError::new(position, "unterminated text literal"))
    }

    fn number(&mut self, position: usize) -> Result<TokenKind, ParseError> {
        let mut end = position + 1;
        let mut seen_dot = self.source[position..].starts_with('.');
        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = i + 1;
                self.chars.next();
            } else if c == '.' && !seen_dot && self.digit_follows(i) {
                seen_dot = true;
                end = i + 1;
                self.chars.next();
            } else {
                break;
            }
        }
        let literal = &self.source[position..end];
        literal
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::new(position, format!("invalid number '{}'", literal)))
    }

    fn digit_follows(&self, dot_at: usize) -> bool {
        self.source[dot_at + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    }

    fn identifier(&mut self, position: usize) -> TokenKind {
        let mut end = position + self.source[position..].chars().next().map_or(1, char::len_utf8);
        while let Some((i, c)) = self
            .chars
            .next_if(|(_, c)| c.is_alphanumeric() || *c == '_')
        {
            end = i + c.len_utf8();
        }
        match &self.source[position..end] {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            name => TokenKind::Ident(name.to_string()),
        }
    }
}
