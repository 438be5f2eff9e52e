//! Table types.

use serde::{Deserialize, Serialize};

/// Minimum number of header columns for a table.
pub const MIN_COLUMNS: usize = 2;

/// A validated table.
///
/// Every row has exactly as many cells as there are headers, and there are
/// at least [`MIN_COLUMNS`] headers. Cells are single strings; inline
/// provenance markers inside a cell are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct TableData {
    /// Header cells
    pub headers: Vec<String>,

    /// Data rows, each `headers.len()` long
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Build a table, reconciling each row against the header count.
    ///
    /// Short rows are padded with empty cells, long rows are truncated.
    /// Returns `None` when there are fewer than [`MIN_COLUMNS`] headers.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Option<Self> {
        if headers.len() < MIN_COLUMNS {
            return None;
        }

        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Some(Self { headers, rows })
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the shape invariant holds.
    pub fn is_well_formed(&self) -> bool {
        self.headers.len() >= MIN_COLUMNS
            && self.rows.iter().all(|r| r.len() == self.headers.len())
    }

    /// Render as pipe-delimited rows (header, formatting row, data).
    pub fn to_pipe_rows(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(format!("| {} |", self.headers.join(" | ")));
        lines.push(format!(
            "| {} |",
            vec!["---"; self.headers.len()].join(" | ")
        ));
        for row in &self.rows {
            lines.push(format!("| {} |", row.join(" | ")));
        }
        lines.join("\n")
    }
}

/// Unchecked wire form used during deserialization.
#[derive(Deserialize)]
struct RawTable {
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl TryFrom<RawTable> for TableData {
    type Error = String;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        let count = raw.headers.len();
        TableData::new(raw.headers, raw.rows)
            .ok_or_else(|| format!("table needs at least {} headers, got {}", MIN_COLUMNS, count))
    }
}
