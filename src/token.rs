//! Lexer for the compact Boolean notation.
//!
//! Lexing is total: every character of the input maps to a token or is
//! skipped as whitespace. Characters outside the supported alphabet become
//! [`Token::Invalid`] and are reported later, when the expression is
//! evaluated.

use std::fmt;

use log::debug;

use crate::types::Var;

/// Reserved lowercase words lexed as explicit operators.
pub const KEYWORDS: [&str; 4] = ["and", "or", "not", "xor"];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Token {
    Var(Var),
    /// Prefix negation.
    Not,
    /// Postfix negation marker `'`.
    Prime,
    And,
    Or,
    Xor,
    Open,
    Close,
    Invalid(char),
}

impl Token {
    fn keyword(word: &str) -> Option<Token> {
        match word {
            "and" => Some(Token::And),
            "or" => Some(Token::Or),
            "not" => Some(Token::Not),
            "xor" => Some(Token::Xor),
            _ => None,
        }
    }

    /// Tokens that can end an operand: a variable or a closing parenthesis.
    pub fn ends_operand(self) -> bool {
        matches!(self, Token::Var(_) | Token::Close)
    }

    /// Tokens that can start an operand: a variable, an opening parenthesis, or prefix NOT.
    pub fn starts_operand(self) -> bool {
        matches!(self, Token::Var(_) | Token::Open | Token::Not)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Var(v) => write!(f, "{}", v),
            Token::Not => write!(f, "not"),
            Token::Prime => write!(f, "'"),
            Token::And => write!(f, "and"),
            Token::Or => write!(f, "or"),
            Token::Xor => write!(f, "xor"),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Invalid(c) => write!(f, "{}", c),
        }
    }
}

/// Splits `raw` into tokens.
///
/// A maximal run of letters that spells one of [`KEYWORDS`] becomes that
/// operator; any other run is one [`Token::Var`] per letter, so `WXYZ` is
/// four variables.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii_alphabetic() {
            let mut word = String::from(c);
            while let Some(&next) = chars.peek() {
                if !next.is_ascii_alphabetic() {
                    break;
                }
                word.push(next);
                chars.next();
            }
            match Token::keyword(&word) {
                Some(op) => tokens.push(op),
                None => tokens.extend(word.chars().filter_map(Var::try_new).map(Token::Var)),
            }
            continue;
        }

        let token = match c {
            '\'' => Token::Prime,
            '+' => Token::Or,
            '^' => Token::Xor,
            '(' => Token::Open,
            ')' => Token::Close,
            c if c.is_whitespace() => continue,
            c => Token::Invalid(c),
        };
        tokens.push(token);
    }

    debug!("tokenize({:?}) -> {}", raw, Tokens(&tokens));
    tokens
}

/// Space-separated rendering of a token stream.
pub struct Tokens<'a>(pub &'a [Token]);

impl fmt::Display for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
