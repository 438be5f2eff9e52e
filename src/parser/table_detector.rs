//! Pipe-table detection and validation.
//!
//! The assembler feeds contiguous runs of table-looking lines into a
//! [`TableCandidate`]. A candidate is either promoted to [`TableData`] or
//! demoted back into text with its lines untouched, so nothing the model
//! wrote is ever lost.

use crate::model::TableData;

use super::markup::MarkerGuard;
use super::provenance::normalize_cell;

/// Check if a line looks like a pipe-table row.
///
/// The trimmed line must start with `|` and contain another `|` after it.
pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('|') && trimmed[1..].contains('|')
}

/// Check if a line is a header/body formatting row such as `|---|:---:|`.
pub fn is_formatting_row(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

/// A maximal run of consecutive table lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableCandidate {
    lines: Vec<String>,
}

impl TableCandidate {
    /// Create an empty candidate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line (stored trimmed).
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.trim().to_string());
    }

    /// Source lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines were collected.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Try to promote the candidate to a table.
    ///
    /// Needs at least two header cells and at least one data row. The
    /// header is split like any other row, so a blank corner cell keeps its
    /// column. Rows are padded or truncated to the header count.
    pub fn parse(&self) -> Option<TableData> {
        let (header_line, rest) = self.lines.split_first()?;

        let headers = split_row(header_line);

        let body = match rest.first() {
            Some(line) if is_formatting_row(line) => &rest[1..],
            _ => rest,
        };

        let rows: Vec<Vec<String>> = body.iter().map(|line| split_row(line)).collect();

        if rows.is_empty() {
            log::debug!(
                "table candidate rejected: no data rows ({} headers)",
                headers.len()
            );
            return None;
        }

        let column_count = headers.len();
        match TableData::new(headers, rows) {
            Some(table) => {
                log::debug!(
                    "table detected: {} columns, {} rows",
                    table.column_count(),
                    table.row_count()
                );
                Some(table)
            }
            None => {
                log::debug!("table candidate rejected: {} header cells", column_count);
                None
            }
        }
    }

    /// Give the source lines back for use as ordinary text.
    pub fn demote(self) -> Vec<String> {
        self.lines
    }

    /// Take the collected lines, leaving the candidate empty.
    pub(crate) fn take(&mut self) -> TableCandidate {
        std::mem::take(self)
    }
}

/// Split a row, dropping the empty artifacts of the outer pipes.
///
/// Markers are protected first so a `|` inside `{{color:...}}` stays in
/// its cell.
fn split_row(line: &str) -> Vec<String> {
    let (guard, protected) = MarkerGuard::protect(line);
    let mut cells: Vec<&str> = protected.split('|').map(str::trim).collect();

    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }

    cells
        .into_iter()
        .map(|cell| normalize_cell(&guard.restore(cell)))
        .collect()
}
