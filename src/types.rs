//! Variables and assignments.
//!
//! A [`Var`] is a single ASCII letter. Variables are ordered by their
//! character value, which fixes both the column order of the truth table
//! and the bit order of every [`Assignment`].

use std::fmt;

/// A single-letter Boolean variable.
///
/// # Invariants
///
/// - The wrapped character is an ASCII letter (`A-Z` or `a-z`)
/// - Ordering follows the character value, so `'A' < 'Z' < 'a'`
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(char);

impl Var {
    /// Creates a new variable with the given name.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not an ASCII letter.
    pub fn new(name: char) -> Self {
        assert!(name.is_ascii_alphabetic(), "Variable names must be ASCII letters, got {:?}", name);
        Var(name)
    }

    /// Returns `Some(var)` if `c` is a valid variable name.
    pub fn try_new(c: char) -> Option<Self> {
        c.is_ascii_alphabetic().then_some(Var(c))
    }

    /// Returns the variable name.
    pub fn name(self) -> char {
        self.0
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Var> for char {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A binding of every variable to a Boolean value.
///
/// The binding is the row index itself, decoded in binary-counter order
/// against a borrowed variable list: `vars[0]` is the most significant bit.
/// Building one costs no allocation, so the enumerator creates it on the fly.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Assignment<'a> {
    vars: &'a [Var],
    index: usize,
}

impl<'a> Assignment<'a> {
    /// Decodes row `index` over `vars`.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in `vars.len()` bits.
    pub fn from_index(vars: &'a [Var], index: usize) -> Self {
        assert!(
            vars.len() >= usize::BITS as usize || index >> vars.len() == 0,
            "Row {} out of range for {} variables",
            index,
            vars.len()
        );
        Assignment { vars, index }
    }

    /// Value of the variable at position `pos`.
    pub fn value(&self, pos: usize) -> bool {
        (self.index >> (self.vars.len() - 1 - pos)) & 1 == 1
    }

    /// Returns the value bound to `var`, or `None` if it is unbound.
    pub fn get(&self, var: Var) -> Option<bool> {
        self.vars.iter().position(|&v| v == var).map(|pos| self.value(pos))
    }

    /// Values as `0`/`1` bits, in variable order.
    pub fn bits(&self) -> impl Iterator<Item = u8> + 'a {
        let (n, index) = (self.vars.len(), self.index);
        (0..n).map(move |pos| ((index >> (n - 1 - pos)) & 1) as u8)
    }
}
