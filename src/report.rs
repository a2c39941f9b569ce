//! Human-readable truth table report.
//!
//! The report is meant for people, not machines, but a few substrings are
//! stable and safe to match on: the header `A | B | Output` and, for every
//! row in order, `0 | 1 |   o` where `o` is the output bit or an `ERR(..)`
//! marker.

use std::io::{self, Write};

use log::info;

use crate::error::Result;
use crate::kmap::{KarnaughMap, UNSUPPORTED_MESSAGE};
use crate::table::{TableConfig, TruthTable};

/// Field widths of the tabular report.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Layout {
    /// Spaces before the output value.
    pub output_indent: usize,
    /// Spaces after the output value.
    pub output_trail: usize,
    /// Width of the centered minterm and maxterm fields.
    pub term_width: usize,
    /// Length of the dashed line under the header and after every row.
    pub separator_width: usize,
}

impl Layout {
    pub fn for_variables(n: usize) -> Self {
        Layout {
            output_indent: 3,
            output_trail: 4,
            term_width: 8,
            separator_width: 6 * n + 24,
        }
    }

    fn separator(&self) -> String {
        "-".repeat(self.separator_width)
    }
}

fn index_list(indices: &[usize]) -> String {
    indices.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// Writes the full report for `table`, with the Karnaugh map if `show_map` is set.
pub fn write_report<W: Write>(out: &mut W, table: &TruthTable, show_map: bool) -> io::Result<()> {
    let layout = Layout::for_variables(table.num_vars());
    let names: Vec<String> = table.variables().iter().map(|v| v.to_string()).collect();

    writeln!(out)?;
    writeln!(out, "Parsed expression: {}", table.expression())?;
    writeln!(out)?;
    writeln!(out, "{} | Output | Minterm | Maxterm", names.join(" | "))?;
    writeln!(out, "{}", layout.separator())?;

    for row in table.rows() {
        let bits: Vec<String> = table.assignment(row).bits().map(|b| b.to_string()).collect();
        let output = match &row.value {
            Ok(value) => (*value as u8).to_string(),
            Err(e) => format!("ERR({})", e),
        };
        let minterm = row.minterm().map(|i| i.to_string()).unwrap_or_default();
        let maxterm = row.maxterm().map(|i| i.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{} |{:indent$}{}{:trail$}| {:^w$} | {:^w$}",
            bits.join(" | "),
            "",
            output,
            "",
            minterm,
            maxterm,
            indent = layout.output_indent,
            trail = layout.output_trail,
            w = layout.term_width,
        )?;
        writeln!(out, "{}", layout.separator())?;
    }

    if table.num_errors() == 0 {
        writeln!(out)?;
        writeln!(out, "Minterms: Σm({})", index_list(&table.minterms()))?;
        writeln!(out, "Maxterms: ΠM({})", index_list(&table.maxterms()))?;
    }

    if show_map {
        writeln!(out, "\nKarnaugh Map:\n")?;
        match KarnaughMap::from_table(table) {
            Some(map) => write!(out, "{}", map)?,
            None => writeln!(out, "{}", UNSUPPORTED_MESSAGE)?,
        }
    }

    Ok(())
}

/// Builds the table for `raw` and writes the report to `out`.
pub fn generate_truth_table_to<W: Write>(out: &mut W, raw: &str, show_map: bool, config: &TableConfig) -> Result<()> {
    let table = TruthTable::build_with(raw, config)?;
    info!(
        "{} variables, {} rows, {} minterms",
        table.num_vars(),
        table.rows().len(),
        table.minterms().len()
    );
    write_report(out, &table, show_map)?;
    Ok(())
}

/// Builds the table for `raw` and prints the report to standard output.
pub fn generate_truth_table(raw: &str, show_map: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    generate_truth_table_to(&mut out, raw, show_map, &TableConfig::default())
}
