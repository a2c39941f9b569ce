//! # truth-table: truth tables for compact Boolean expressions
//!
//! **`truth-table`** reads Boolean-algebra expressions in the compact notation
//! used on paper and in digital-logic courses, enumerates their truth table,
//! and lays small functions out as Karnaugh maps.
//!
//! ## Notation
//!
//! | Syntax      | Meaning                                   |
//! |-------------|-------------------------------------------|
//! | `A`         | variable (single letter, case-sensitive)  |
//! | `AB`, `A B` | AND (juxtaposition)                       |
//! | `A+B`       | OR                                        |
//! | `A^B`       | XOR                                       |
//! | `A'`, `(..)'` | NOT (postfix)                           |
//! | `(..)`      | grouping                                  |
//!
//! The lowercase words `and`, `or`, `not`, `xor` are reserved: each is read
//! as an explicit operator when it appears as a whole letter run, which is
//! also how normalized expressions are printed. So `xor` is XOR and not the
//! product of variables `x`, `o`, `r`. Separate the letters (`x o r`) or use
//! capitals (`XOR`) to mean the variables.
//! Precedence from tightest: NOT, AND, then OR and XOR.
//!
//! Parentheses may nest at most [`ast::MAX_DEPTH`] levels. Deeper input
//! evaluates to [`error::EvalError::TooDeep`] on every row.
//!
//! ## Basic Usage
//!
//! ```rust
//! use truth_table::table::TruthTable;
//!
//! let table = TruthTable::build("(A+B)'C").unwrap();
//! assert_eq!(table.expression().to_string(), "not ( A or B ) and C");
//! assert_eq!(table.minterms(), vec![1]);
//! ```
//!
//! ## Core Components
//!
//! - **[`normalize`]**: rewrites the compact notation into an explicit token stream.
//! - **[`ast`]**: operator tree, parser and evaluator.
//! - **[`table`]**: enumeration of all assignments.
//! - **[`kmap`]** and **[`report`]**: rendering.

pub mod ast;
pub mod error;
pub mod kmap;
pub mod normalize;
pub mod report;
pub mod table;
pub mod token;
pub mod types;

pub use report::generate_truth_table;
