//! Error types.
//!
//! [`EvalError`] is the closed set of reasons a single truth-table row can
//! fail to evaluate. It never aborts enumeration: the enumerator stores it
//! in place of the row's output. [`Error`] covers failures of a whole
//! invocation, such as exceeding the variable cap or failing to write the
//! report.

use num_bigint::BigUint;
use thiserror::Error;

use crate::token::Token;
use crate::types::Var;

/// Per-row evaluation failure.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum EvalError {
    /// Character outside the supported alphabet `[A-Za-z'+^() ]`.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    /// A token appeared where an operand or operator was expected.
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: Token, position: usize },

    /// Input ended while an operand was still expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// Opening or closing parenthesis without a partner.
    #[error("unbalanced parenthesis at position {0}")]
    UnbalancedParen(usize),

    /// Postfix `'` with nothing to negate.
    #[error("dangling ' at position {0}")]
    DanglingNot(usize),

    /// Parenthesized groups or mixed OR/XOR chains nest deeper than the parser allows.
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),

    /// Nothing to evaluate.
    #[error("empty expression")]
    EmptyExpression,

    /// The expression references a variable missing from the row binding.
    #[error("unbound variable {0}")]
    UnboundVariable(Var),
}

/// Invocation-level failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Enumeration would need `rows` assignments.
    #[error("expression has {count} variables ({rows} rows), limit is {limit}")]
    TooManyVariables { count: usize, limit: usize, rows: BigUint },

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
