//! Truth table enumeration.
//!
//! A [`TruthTable`] holds one [`Row`] per assignment, 2ⁿ rows for n
//! variables, in binary-counter order: the first variable is the most
//! significant bit and the last variable changes fastest.
//!
//! ```text
//! A B | Output
//! 0 0 |   f(0,0)   row 0
//! 0 1 |   f(0,1)   row 1
//! 1 0 |   f(1,0)   row 2
//! 1 1 |   f(1,1)   row 3
//! ```
//!
//! Rows never fail as a group: if the expression is malformed, every row
//! carries the same [`EvalError`] and is still emitted.

use log::{debug, trace, warn};
use num_bigint::BigUint;

use crate::ast::Expr;
use crate::error::{Error, EvalError, Result};
use crate::normalize::{normalize, Normalized};
use crate::types::{Assignment, Var};

/// Default cap on the number of distinct variables (2^20 rows).
pub const DEFAULT_MAX_VARIABLES: usize = 20;

/// Settings for building a table from raw input.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Expressions with more distinct variables are rejected.
    pub max_variables: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
        }
    }
}

/// One evaluated assignment.
///
/// The assignment itself is the binary expansion of `index`; see
/// [`TruthTable::assignment`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Row {
    pub index: usize,
    pub value: Result<bool, EvalError>,
}

impl Row {
    /// Output as `0`/`1`, or `None` if evaluation failed.
    pub fn output_bit(&self) -> Option<u8> {
        self.value.as_ref().ok().map(|&b| b as u8)
    }

    /// Row index if the output is 1.
    pub fn minterm(&self) -> Option<usize> {
        (self.output_bit() == Some(1)).then_some(self.index)
    }

    /// Row index if the output is 0.
    pub fn maxterm(&self) -> Option<usize> {
        (self.output_bit() == Some(0)).then_some(self.index)
    }
}

/// Evaluates `expr` under every assignment of `vars`.
///
/// `expr` is the compiled expression; a compile failure is repeated on every row.
pub fn enumerate(expr: &Result<Expr, EvalError>, vars: &[Var]) -> Vec<Row> {
    let size = 1usize << vars.len();
    let mut rows = Vec::with_capacity(size);

    for index in 0..size {
        let assignment = Assignment::from_index(vars, index);
        let value = match expr {
            Ok(e) => e.eval(&assignment),
            Err(err) => Err(*err),
        };
        trace!("row {} {:?} -> {:?}", index, assignment.bits().collect::<Vec<_>>(), value);
        rows.push(Row { index, value });
    }

    rows
}

/// Exact number of rows for `n` variables.
pub fn row_count(n: usize) -> BigUint {
    BigUint::from(1u8) << n
}

#[derive(Debug, Clone)]
pub struct TruthTable {
    expression: Normalized,
    rows: Vec<Row>,
}

impl TruthTable {
    /// Builds the table for `raw` with the default [`TableConfig`].
    pub fn build(raw: &str) -> Result<Self> {
        Self::build_with(raw, &TableConfig::default())
    }

    pub fn build_with(raw: &str, config: &TableConfig) -> Result<Self> {
        let normalized = normalize(raw);
        let count = normalized.variables().len();
        if count > config.max_variables {
            warn!("Refusing to enumerate {} variables (limit {})", count, config.max_variables);
            return Err(Error::TooManyVariables {
                count,
                limit: config.max_variables,
                rows: row_count(count),
            });
        }
        Ok(Self::from_normalized(normalized))
    }

    /// Enumerates an already normalized expression. No variable cap applies.
    pub fn from_normalized(expression: Normalized) -> Self {
        let compiled = expression.compile();
        match &compiled {
            Ok(expr) => {
                debug!("compiled {} -> {}", expression, expr);
                let unbound: Vec<Var> = expr
                    .variables()
                    .into_iter()
                    .filter(|v| !expression.variables().contains(v))
                    .collect();
                if !unbound.is_empty() {
                    warn!("Expression '{}' uses unlisted variables {:?}", expression, unbound);
                }
            }
            Err(e) => warn!("Expression '{}' does not evaluate: {}", expression, e),
        }
        let rows = enumerate(&compiled, expression.variables());
        TruthTable { expression, rows }
    }

    pub fn expression(&self) -> &Normalized {
        &self.expression
    }

    pub fn variables(&self) -> &[Var] {
        self.expression.variables()
    }

    pub fn num_vars(&self) -> usize {
        self.variables().len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Variable values of `row`.
    pub fn assignment(&self, row: &Row) -> Assignment<'_> {
        Assignment::from_index(self.variables(), row.index)
    }

    /// Output of every row, `None` where evaluation failed.
    pub fn outputs(&self) -> Vec<Option<bool>> {
        self.rows.iter().map(|r| r.value.as_ref().ok().copied()).collect()
    }

    /// Output bit of row `index`, or `None` if the row failed or does not exist.
    pub fn bit(&self, index: usize) -> Option<u8> {
        self.rows.get(index).and_then(Row::output_bit)
    }

    pub fn minterms(&self) -> Vec<usize> {
        self.rows.iter().filter_map(Row::minterm).collect()
    }

    pub fn maxterms(&self) -> Vec<usize> {
        self.rows.iter().filter_map(Row::maxterm).collect()
    }

    pub fn num_errors(&self) -> usize {
        self.rows.iter().filter(|r| r.value.is_err()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ast::MAX_DEPTH;
    use test_log::test;

    fn bits(raw: &str) -> Vec<u8> {
        let table = TruthTable::build(raw).unwrap();
        table.rows().iter().map(|r| r.output_bit().unwrap()).collect()
    }

    #[test]
    fn test_row_count_is_power_of_two() {
        for (raw, n) in [("A", 1), ("A+B", 2), ("ABC", 3), ("A'B+CD^E", 5)] {
            let table = TruthTable::build(raw).unwrap();
            assert_eq!(table.num_vars(), n);
            assert_eq!(table.rows().len(), 1 << n);
        }
    }

    #[test]
    fn test_binary_counter_order() {
        let table = TruthTable::build("C+A+B").unwrap();
        for (i, row) in table.rows().iter().enumerate() {
            assert_eq!(row.index, i);
        }
        let bits = |i: usize| table.assignment(&table.rows()[i]).bits().collect::<Vec<_>>();
        assert_eq!(bits(1), vec![0, 0, 1]);
        assert_eq!(bits(4), vec![1, 0, 0]);
    }

    #[test]
    fn test_reference_outputs() {
        assert_eq!(bits("A+B"), vec![0, 1, 1, 1]);
        assert_eq!(bits("AB'"), vec![0, 0, 1, 0]);
        assert_eq!(bits("(A+B)'C"), vec![0, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_single_minterm() {
        let table = TruthTable::build("ABCD'").unwrap();
        assert_eq!(table.minterms(), vec![14]);
        let asg = table.assignment(&table.rows()[14]);
        assert_eq!(asg.bits().collect::<Vec<_>>(), vec![1, 1, 1, 0]);
        assert_eq!(asg.get(Var::new('D')), Some(false));
    }

    #[test]
    fn test_nested_negated_groups() {
        let table = TruthTable::build("(A'(B'(C'(D'))))").unwrap();
        assert_eq!(table.minterms(), vec![0]);
        assert_eq!(table.maxterms(), (1..16).collect::<Vec<_>>());
    }

    #[test]
    fn test_minterm_maxterm_partition() {
        let table = TruthTable::build("A^B+C'").unwrap();
        for row in table.rows() {
            assert!(row.minterm().is_some() != row.maxterm().is_some());
            let m = row.minterm().or(row.maxterm()).unwrap();
            assert_eq!(m, row.index);
        }
        assert_eq!(table.minterms().len() + table.maxterms().len(), 8);
    }

    #[test]
    fn test_malformed_expression_fills_every_row() {
        let table = TruthTable::build("A+(B").unwrap();
        assert_eq!(table.rows().len(), 4);
        assert_eq!(table.num_errors(), 4);
        for row in table.rows() {
            assert_eq!(row.value, Err(EvalError::UnbalancedParen(2)));
            assert_eq!(row.minterm(), None);
            assert_eq!(row.maxterm(), None);
        }
        assert_eq!(table.outputs(), vec![None; 4]);
    }

    #[test]
    fn test_enumerate_reports_unbound_variables() {
        let expr = Ok(Expr::and(Expr::var('A'), Expr::var('Z')));
        let rows = enumerate(&expr, &[Var::new('A')]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.value == Err(EvalError::UnboundVariable(Var::new('Z')))));
    }

    #[test]
    fn test_variable_cap() {
        let config = TableConfig { max_variables: 3 };
        assert!(TruthTable::build_with("ABC", &config).is_ok());
        match TruthTable::build_with("ABCD", &config) {
            Err(Error::TooManyVariables { count, limit, rows }) => {
                assert_eq!(count, 4);
                assert_eq!(limit, 3);
                assert_eq!(rows, BigUint::from(16u8));
            }
            other => panic!("expected TooManyVariables, got {:?}", other),
        }
    }

    #[test]
    fn test_idempotent_renormalization_preserves_outputs() {
        for raw in ["A+(BC')'D", "((AB)')C", "A^B'C"] {
            let first = TruthTable::build(raw).unwrap();
            let second = TruthTable::build(&first.expression().to_string()).unwrap();
            assert_eq!(first.outputs(), second.outputs());
        }
    }

    #[test]
    fn test_long_chain_table() {
        let table = TruthTable::build(&format!("{}A", "A+".repeat(100_000))).unwrap();
        assert_eq!(table.num_vars(), 1);
        assert_eq!(table.minterms(), vec![1]);
        assert_eq!(table.maxterms(), vec![0]);
    }

    #[test]
    fn test_too_deep_fills_every_row() {
        let raw = format!("{}A+B{}", "(".repeat(100_000), ")".repeat(100_000));
        let table = TruthTable::build(&raw).unwrap();
        assert_eq!(table.rows().len(), 4);
        assert!(table.rows().iter().all(|r| r.value == Err(EvalError::TooDeep(MAX_DEPTH))));
    }

    #[test]
    fn test_bit() {
        let table = TruthTable::build("AB").unwrap();
        assert_eq!(table.bit(3), Some(1));
        assert_eq!(table.bit(0), Some(0));
        assert_eq!(table.bit(4), None);
    }
}
