use super::Value;
use std::fmt;

/// Functions callable from node bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    /// Appends its rendered arguments to the output log.
    Print,
    /// Renders its argument as text.
    Str,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "print" => Some(Builtin::Print),
            "str" => Some(Builtin::Str),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Print => "print",
            Builtin::Str => "str",
        }
    }
}

/// The Abstract Syntax Tree of a parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Arithmetic
    Sum(Box<Expression>, Box<Expression>),
    Subtract(Box<Expression>, Box<Expression>),
    Multiply(Box<Expression>, Box<Expression>),
    Divide(Box<Expression>, Box<Expression>),
    Modulo(Box<Expression>, Box<Expression>),
    Negate(Box<Expression>),

    // Logical
    Not(Box<Expression>),
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),

    // Comparison
    Equal(Box<Expression>, Box<Expression>),
    NotEqual(Box<Expression>, Box<Expression>),
    GreaterThan(Box<Expression>, Box<Expression>),
    GreaterThanOrEqual(Box<Expression>, Box<Expression>),
    SmallerThan(Box<Expression>, Box<Expression>),
    SmallerThanOrEqual(Box<Expression>, Box<Expression>),

    // Leaf nodes
    Literal(Value),
    Variable(String),
    Call {
        function: Builtin,
        args: Vec<Expression>,
    },
}

/// One statement of a Process or InputOutput body.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign { name: String, value: Expression },
    Expression(Expression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Assign { name, value } => write!(f, "{} = {}", name, value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Start the recursive formatting with the lowest parent precedence.
        self.fmt_with_precedence(f, 0)
    }
}

impl Expression {
    /// Gets the precedence level for an expression type. Higher numbers bind more tightly.
    pub fn precedence(&self) -> u8 {
        match self {
            Expression::Or(_, _) => 1,
            Expression::And(_, _) => 2,
            Expression::Equal(_, _) | Expression::NotEqual(_, _) => 3,
            Expression::GreaterThan(_, _)
            | Expression::GreaterThanOrEqual(_, _)
            | Expression::SmallerThan(_, _)
            | Expression::SmallerThanOrEqual(_, _) => 4,
            Expression::Sum(_, _) | Expression::Subtract(_, _) => 5,
            Expression::Multiply(_, _) | Expression::Divide(_, _) | Expression::Modulo(_, _) => 6,
            Expression::Not(_) | Expression::Negate(_) => 7,
            Expression::Literal(_) | Expression::Variable(_) | Expression::Call { .. } => 8,
        }
    }

    /// Recursively formats the expression, adding parentheses only when necessary.
    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, parent_precedence: u8) -> fmt::Result {
        let current_precedence = self.precedence();
        let needs_parens = current_precedence < parent_precedence;

        if needs_parens {
            write!(f, "(")?;
        }

        match self {
            Expression::Or(l, r) => self.fmt_binary(f, "||", l, r, current_precedence)?,
            Expression::And(l, r) => self.fmt_binary(f, "&&", l, r, current_precedence)?,
            Expression::Equal(l, r) => self.fmt_binary(f, "==", l, r, current_precedence)?,
            Expression::NotEqual(l, r) => self.fmt_binary(f, "!=", l, r, current_precedence)?,
            Expression::GreaterThan(l, r) => self.fmt_binary(f, ">", l, r, current_precedence)?,
            Expression::GreaterThanOrEqual(l, r) => {
                self.fmt_binary(f, ">=", l, r, current_precedence)?
            }
            Expression::SmallerThan(l, r) => self.fmt_binary(f, "<", l, r, current_precedence)?,
            Expression::SmallerThanOrEqual(l, r) => {
                self.fmt_binary(f, "<=", l, r, current_precedence)?
            }
            Expression::Sum(l, r) => self.fmt_binary(f, "+", l, r, current_precedence)?,
            Expression::Subtract(l, r) => self.fmt_binary(f, "-", l, r, current_precedence)?,
            Expression::Multiply(l, r) => self.fmt_binary(f, "*", l, r, current_precedence)?,
            Expression::Divide(l, r) => self.fmt_binary(f, "/", l, r, current_precedence)?,
            Expression::Modulo(l, r) => self.fmt_binary(f, "%", l, r, current_precedence)?,

            // Unary operators
            Expression::Not(v) => {
                write!(f, "!")?;
                v.fmt_with_precedence(f, current_precedence)?;
            }
            Expression::Negate(v) => {
                write!(f, "-")?;
                v.fmt_with_precedence(f, current_precedence)?;
            }

            // Leaf nodes
            Expression::Literal(Value::Text(s)) => write!(f, "{:?}", s)?,
            Expression::Literal(v) => write!(f, "{}", v)?,
            Expression::Variable(name) => write!(f, "{}", name)?,
            Expression::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    arg.fmt_with_precedence(f, 0)?;
                }
                write!(f, ")")?;
            }
        }

        if needs_parens {
            write!(f, ")")?;
        }
        Ok(())
    }

    /// Helper function to format a generic binary expression.
    ///
    /// All binary operators are left-associative, so the right operand needs
    /// parentheses already at equal precedence.
    fn fmt_binary(
        &self,
        f: &mut fmt::Formatter<'_>,
        op: &str,
        l: &Expression,
        r: &Expression,
        current_precedence: u8,
    ) -> fmt::Result {
        l.fmt_with_precedence(f, current_precedence)?;
        write!(f, " {} ", op)?;
        r.fmt_with_precedence(f, current_precedence + 1)?;
        Ok(())
    }

    /// Collects the names of all variables the expression reads.
    pub fn referenced_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expression::Variable(name) => {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
            Expression::Sum(l, r)
            | Expression::Subtract(l, r)
            | Expression::Multiply(l, r)
            | Expression::Divide(l, r)
            | Expression::Modulo(l, r)
            | Expression::And(l, r)
            | Expression::Or(l, r)
            | Expression::Equal(l, r)
            | Expression::NotEqual(l, r)
            | Expression::GreaterThan(l, r)
            | Expression::GreaterThanOrEqual(l, r)
            | Expression::SmallerThan(l, r)
            | Expression::SmallerThanOrEqual(l, r) => {
                l.referenced_variables(names);
                r.referenced_variables(names);
            }
            Expression::Not(v) | Expression::Negate(v) => v.referenced_variables(names),
            Expression::Call { args, .. } => {
                for arg in args {
                    arg.referenced_variables(names);
                }
            }
            Expression::Literal(_) => {}
        }
    }
}
