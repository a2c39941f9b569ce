//! Operator tree and evaluator.
//!
//! [`Expr::parse`] reads a normalized token stream with the usual Boolean
//! precedence: NOT binds tightest, then AND, then OR and XOR (same level,
//! left-associative). Parentheses override precedence.
//!
//! Runs of the same binary operator are kept flat (`A+B+C` is one `Or` with
//! three operands), and a run of negations collapses to its parity. Tree depth
//! therefore only grows with parentheses and with switches between OR and XOR,
//! and both are capped at [`MAX_DEPTH`] levels.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::EvalError;
use crate::token::Token;
use crate::types::{Assignment, Var};

/// Deepest nesting the parser accepts before reporting [`EvalError::TooDeep`].
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expr {
    Var(Var),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    /// True iff an odd number of operands are true.
    Xor(Vec<Expr>),
}

impl Expr {
    pub fn var(name: char) -> Self {
        Expr::Var(Var::new(name))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(value: Self) -> Self {
        Expr::Not(Box::new(value))
    }

    pub fn and(lhs: Self, rhs: Self) -> Self {
        Expr::And(vec![lhs, rhs])
    }

    pub fn or(lhs: Self, rhs: Self) -> Self {
        Expr::Or(vec![lhs, rhs])
    }

    pub fn xor(lhs: Self, rhs: Self) -> Self {
        Expr::Xor(vec![lhs, rhs])
    }
}

impl Expr {
    /// Parses an explicit token stream (see [`crate::normalize`]).
    pub fn parse(tokens: &[Token]) -> Result<Expr, EvalError> {
        if let Some(c) = tokens.iter().find_map(|t| match t {
            Token::Invalid(c) => Some(*c),
            _ => None,
        }) {
            return Err(EvalError::InvalidCharacter(c));
        }
        if tokens.is_empty() {
            return Err(EvalError::EmptyExpression);
        }

        let mut parser = Parser {
            tokens,
            pos: 0,
            depth: 0,
        };
        let expr = parser.parse_or()?;
        match parser.peek() {
            None => Ok(expr),
            Some(Token::Close) => Err(EvalError::UnbalancedParen(parser.pos)),
            Some(token) => Err(parser.unexpected(token)),
        }
    }

    /// Evaluates the expression under `assignment`.
    ///
    /// Every operand is evaluated, so an unbound variable is reported even
    /// where the result would already be decided.
    pub fn eval(&self, assignment: &Assignment<'_>) -> Result<bool, EvalError> {
        match self {
            Expr::Var(v) => assignment.get(*v).ok_or(EvalError::UnboundVariable(*v)),
            Expr::Not(a) => Ok(!a.eval(assignment)?),
            Expr::And(xs) => xs.iter().try_fold(true, |acc, x| Ok(x.eval(assignment)? & acc)),
            Expr::Or(xs) => xs.iter().try_fold(false, |acc, x| Ok(x.eval(assignment)? | acc)),
            Expr::Xor(xs) => xs.iter().try_fold(false, |acc, x| Ok(x.eval(assignment)? != acc)),
        }
    }

    /// Variables referenced by the expression.
    pub fn variables(&self) -> BTreeSet<Var> {
        let mut vars = BTreeSet::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut BTreeSet<Var>) {
        match self {
            Expr::Var(v) => {
                vars.insert(*v);
            }
            Expr::Not(a) => a.collect_variables(vars),
            Expr::And(xs) | Expr::Or(xs) | Expr::Xor(xs) => {
                for x in xs {
                    x.collect_variables(vars);
                }
            }
        }
    }
}

fn write_chain(f: &mut fmt::Formatter<'_>, xs: &[Expr], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, x) in xs.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", x)?;
    }
    write!(f, ")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Not(e) => write!(f, "!{}", e),
            Expr::And(xs) => write_chain(f, xs, "&"),
            Expr::Or(xs) => write_chain(f, xs, "|"),
            Expr::Xor(xs) => write_chain(f, xs, "^"),
        }
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    fn unexpected(&self, token: Token) -> EvalError {
        EvalError::UnexpectedToken {
            found: token,
            position: self.pos,
        }
    }

    // or_expr := and_expr (("or" | "xor") and_expr)*
    fn parse_or(&mut self) -> Result<Expr, EvalError> {
        let base = self.depth;
        let mut lhs = self.parse_and()?;
        while let Some(op @ (Token::Or | Token::Xor)) = self.peek() {
            self.pos += 1;
            let extends = matches!((op, &lhs), (Token::Or, Expr::Or(_)) | (Token::Xor, Expr::Xor(_)));
            if !extends {
                self.enter()?;
            }
            let rhs = self.parse_and()?;
            lhs = match lhs {
                Expr::Or(mut xs) if op == Token::Or => {
                    xs.push(rhs);
                    Expr::Or(xs)
                }
                Expr::Xor(mut xs) if op == Token::Xor => {
                    xs.push(rhs);
                    Expr::Xor(xs)
                }
                lhs if op == Token::Or => Expr::or(lhs, rhs),
                lhs => Expr::xor(lhs, rhs),
            };
        }
        self.depth = base;
        Ok(lhs)
    }

    // and_expr := unary ("and" unary)*
    fn parse_and(&mut self) -> Result<Expr, EvalError> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        while self.peek() == Some(Token::And) {
            self.pos += 1;
            if !matches!(lhs, Expr::And(_)) {
                self.enter()?;
            }
            let rhs = self.parse_unary()?;
            lhs = match lhs {
                Expr::And(mut xs) => {
                    xs.push(rhs);
                    Expr::And(xs)
                }
                lhs => Expr::and(lhs, rhs),
            };
        }
        self.depth = base;
        Ok(lhs)
    }

    // unary := "not"* primary
    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        let mut negated = false;
        while self.peek() == Some(Token::Not) {
            self.pos += 1;
            negated = !negated;
        }
        let operand = self.parse_primary()?;
        Ok(if negated { Expr::not(operand) } else { operand })
    }

    // primary := VAR | "(" or_expr ")"
    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        let start = self.pos;
        match self.advance() {
            Some(Token::Var(v)) => Ok(Expr::Var(v)),
            Some(Token::Open) => {
                self.enter()?;
                let inner = self.parse_or()?;
                match self.peek() {
                    Some(Token::Close) => {
                        self.pos += 1;
                        self.depth -= 1;
                        Ok(inner)
                    }
                    None => Err(EvalError::UnbalancedParen(start)),
                    Some(token) => Err(self.unexpected(token)),
                }
            }
            Some(Token::Prime) => Err(EvalError::DanglingNot(start)),
            Some(token) => {
                self.pos = start;
                Err(self.unexpected(token))
            }
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
