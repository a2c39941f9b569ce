//! Expression normalizer.
//!
//! Turns the compact notation (`AB'+C`, `(A+B)'C`, `A^B`) into an explicit
//! token stream where every operator is spelled out and negation is prefix:
//!
//! ```text
//! (A+B)'C  ->  not ( A or B ) and C
//! ```
//!
//! Normalization only rewrites tokens. It does not check that the result is
//! well formed; malformed input is reported when the stream is compiled into
//! an [`Expr`] for evaluation.

use std::collections::BTreeSet;
use std::fmt;

use log::debug;

use crate::ast::Expr;
use crate::error::EvalError;
use crate::token::{tokenize, Token, Tokens};
use crate::types::Var;

/// Explicit token stream together with the sorted variable list.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Normalized {
    tokens: Vec<Token>,
    variables: Vec<Var>,
}

impl Normalized {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Distinct variables in ascending order. This is the column order.
    pub fn variables(&self) -> &[Var] {
        &self.variables
    }

    /// Builds the operator tree for evaluation.
    pub fn compile(&self) -> Result<Expr, EvalError> {
        Expr::parse(&self.tokens)
    }
}

impl fmt::Display for Normalized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Tokens(&self.tokens))
    }
}

/// Normalizes a raw expression.
pub fn normalize(raw: &str) -> Normalized {
    let lexed = tokenize(raw);
    let variables = extract_variables(&lexed);
    let tokens = rewrite(&lexed);
    debug!("normalize({:?}) -> {} over {:?}", raw, Tokens(&tokens), variables);
    Normalized { tokens, variables }
}

/// Distinct variables of a token stream, sorted ascending.
pub fn extract_variables(tokens: &[Token]) -> Vec<Var> {
    let set: BTreeSet<Var> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Var(v) => Some(*v),
            _ => None,
        })
        .collect();
    set.into_iter().collect()
}

/// Rewrites postfix negation to prefix and makes implicit AND explicit.
///
/// Applying `rewrite` to its own output returns the same stream.
pub fn rewrite(tokens: &[Token]) -> Vec<Token> {
    insert_implicit_and(&prefix_negation(tokens))
}

/// Moves every `'` in front of its operand: a variable, or the group closed
/// by the preceding `)`.
///
/// Primes are handled left to right, so inner groups are rewritten before the
/// groups enclosing them. A prime without an operand stays in place.
fn prefix_negation(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());

    for &token in tokens {
        if token != Token::Prime {
            out.push(token);
            continue;
        }
        match out.last() {
            Some(Token::Var(_)) => {
                let at = out.len() - 1;
                out.insert(at, Token::Not);
            }
            Some(Token::Close) => match matching_open(&out) {
                Some(at) => out.insert(at, Token::Not),
                None => out.push(Token::Prime),
            },
            _ => out.push(Token::Prime),
        }
    }

    out
}

/// Index of the `(` matching the `)` at the end of `tokens`.
fn matching_open(tokens: &[Token]) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().rev() {
        match token {
            Token::Close => depth += 1,
            Token::Open => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn insert_implicit_and(tokens: &[Token]) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for &token in tokens {
        if let Some(&prev) = out.last() {
            if prev.ends_operand() && token.starts_operand() {
                out.push(Token::And);
            }
        }
        out.push(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn vars(names: &str) -> Vec<Var> {
        names.chars().map(Var::new).collect()
    }

    #[test]
    fn test_implicit_and() {
        assert_eq!(normalize("AB").to_string(), "A and B");
        assert_eq!(normalize("A B").to_string(), "A and B");
        assert_eq!(normalize("A(B)").to_string(), "A and ( B )");
        assert_eq!(normalize("(A)(B)").to_string(), "( A ) and ( B )");
    }

    #[test]
    fn test_postfix_not_on_variable() {
        assert_eq!(normalize("AB'").to_string(), "A and not B");
        assert_eq!(normalize("A'B'C'").to_string(), "not A and not B and not C");
        assert_eq!(normalize("A''").to_string(), "not not A");
    }

    #[test]
    fn test_postfix_not_on_group() {
        assert_eq!(normalize("(A+B)'C").to_string(), "not ( A or B ) and C");
        assert_eq!(normalize("((AB)')C").to_string(), "( not ( A and B ) ) and C");
    }

    #[test]
    fn test_nested_negated_groups() {
        assert_eq!(
            normalize("(A'(B'(C'(D'))))").to_string(),
            "( not A and ( not B and ( not C and ( not D ) ) ) )"
        );
    }

    #[test]
    fn test_xor() {
        assert_eq!(normalize("A^B'").to_string(), "A xor not B");
    }

    #[test]
    fn test_variables_sorted_and_deduplicated() {
        assert_eq!(normalize("BA+C").variables(), vars("ABC").as_slice());
        assert_eq!(normalize("AB+C").variables(), vars("ABC").as_slice());
        assert_eq!(normalize("zAaZA").variables(), vars("AZaz").as_slice());
    }

    #[test]
    fn test_keywords_are_not_variables() {
        let n = normalize("A and not B");
        assert_eq!(n.variables(), vars("AB").as_slice());
        assert_eq!(n.to_string(), "A and not B");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        for raw in ["A+B", "AB'", "(A+B)'C", "A+(BC')'D", "(A'(B'(C'(D'))))", "'A", "A)'", "A^B C"] {
            let once = normalize(raw);
            let twice = rewrite(once.tokens());
            assert_eq!(once.tokens(), twice.as_slice(), "rewrite not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_renormalizing_rendered_form() {
        for raw in ["A+B", "AB'", "(A+B)'C", "ABCD'", "A^B+C"] {
            let once = normalize(raw);
            let again = normalize(&once.to_string());
            assert_eq!(once, again, "rendered form of {:?} does not normalize to itself", raw);
        }
    }

    #[test]
    fn test_dangling_prime_is_kept() {
        assert_eq!(normalize("'A").tokens()[0], Token::Prime);
        assert_eq!(normalize("A+'B").tokens()[2], Token::Prime);
        assert_eq!(normalize("A)'").tokens().last(), Some(&Token::Prime));
    }

    #[test]
    fn test_malformed_input_still_normalizes() {
        let n = normalize("A & B");
        assert_eq!(n.tokens()[1], Token::Invalid('&'));
        assert_eq!(n.variables(), vars("AB").as_slice());
    }
}
