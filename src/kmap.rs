//! Karnaugh maps for 2, 3, and 4 variables.
//!
//! Both axes follow Gray-code order, so neighbouring cells differ in exactly
//! one variable:
//!
//! ```text
//!             CD
//!             00   01   11   10
//!   AB=00  |  m0   m1   m3   m2
//!   AB=01  |  m4   m5   m7   m6
//!   AB=11  |  m12  m13  m15  m14
//!   AB=10  |  m8   m9   m11  m10
//! ```
//!
//! Rows are keyed by the first variable (two or three variables) or the first
//! two (four variables); columns by the rest.

use std::fmt;

use crate::table::TruthTable;
use crate::types::Var;

const CELL_WIDTH: usize = 7;
const LABEL_WIDTH: usize = 8;

pub const UNSUPPORTED_MESSAGE: &str = "K-map display is only supported for 2, 3, or 4 variables.";

/// Reflected Gray code over `k` bits, most significant bit first.
pub fn gray_code(k: usize) -> Vec<Vec<u8>> {
    (0..1usize << k)
        .map(|i| {
            let g = i ^ (i >> 1);
            (0..k).map(|j| ((g >> (k - 1 - j)) & 1) as u8).collect()
        })
        .collect()
}

fn key_label(key: &[u8]) -> String {
    key.iter().map(|b| b.to_string()).collect()
}

fn var_label(vars: &[Var]) -> String {
    vars.iter().map(|v| v.name()).collect()
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct KarnaughMap {
    row_vars: Vec<Var>,
    col_vars: Vec<Var>,
    row_keys: Vec<Vec<u8>>,
    col_keys: Vec<Vec<u8>>,
    cells: Vec<Vec<u8>>,
}

impl KarnaughMap {
    /// Lays out `table` as a Karnaugh map, or returns `None` unless it has 2–4 variables.
    ///
    /// Rows that failed to evaluate show as 0.
    pub fn from_table(table: &TruthTable) -> Option<Self> {
        let vars = table.variables();
        let row_bits = match vars.len() {
            2 | 3 => 1,
            4 => 2,
            _ => return None,
        };
        let (row_vars, col_vars) = vars.split_at(row_bits);
        let row_keys = gray_code(row_vars.len());
        let col_keys = gray_code(col_vars.len());

        let cells = row_keys
            .iter()
            .map(|rk| {
                col_keys
                    .iter()
                    .map(|ck| {
                        let index = rk.iter().chain(ck).fold(0usize, |acc, &b| (acc << 1) | b as usize);
                        table.bit(index).unwrap_or(0)
                    })
                    .collect()
            })
            .collect();

        Some(KarnaughMap {
            row_vars: row_vars.to_vec(),
            col_vars: col_vars.to_vec(),
            row_keys,
            col_keys,
            cells,
        })
    }

    pub fn row_vars(&self) -> &[Var] {
        &self.row_vars
    }

    pub fn col_vars(&self) -> &[Var] {
        &self.col_vars
    }

    pub fn row_keys(&self) -> &[Vec<u8>] {
        &self.row_keys
    }

    pub fn col_keys(&self) -> &[Vec<u8>] {
        &self.col_keys
    }

    /// Output bit at grid position (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    fn write_border(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment = "-".repeat(CELL_WIDTH + 2);
        let border = vec![segment; self.col_keys.len()].join("+");
        writeln!(f, "{:w$}+{}+", "", border, w = LABEL_WIDTH)
    }
}

impl fmt::Display for KarnaughMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_name = var_label(&self.col_vars);
        let headers: Vec<String> = if self.col_vars.len() == 1 {
            self.col_keys
                .iter()
                .map(|k| format!("{:^w$}", format!("{}={}", col_name, key_label(k)), w = CELL_WIDTH))
                .collect()
        } else {
            writeln!(f, "{:w$}{}", "", col_name, w = LABEL_WIDTH)?;
            self.col_keys
                .iter()
                .map(|k| format!("{:^w$}", key_label(k), w = CELL_WIDTH))
                .collect()
        };
        writeln!(f, "{:w$}{}", "", headers.join(" | "), w = LABEL_WIDTH + 2)?;

        self.write_border(f)?;
        let row_name = var_label(&self.row_vars);
        for (key, cells) in self.row_keys.iter().zip(&self.cells) {
            let label = format!("{}={}", row_name, key_label(key));
            let row: Vec<String> = cells.iter().map(|c| format!("{:^w$}", c, w = CELL_WIDTH)).collect();
            writeln!(f, "{:<w$}| {} |", label, row.join(" | "), w = LABEL_WIDTH)?;
            self.write_border(f)?;
        }
        Ok(())
    }
}
