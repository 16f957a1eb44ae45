//! Raw fundamentals table model.
//!
//! Cells are kept as raw strings exactly as rendered by the listing page
//! (pt-BR numeric formatting). Normalization happens in `normalize`.

use std::collections::HashMap;

/// One raw row: a ticker plus its string-valued cells keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub ticker: String,
    pub cells: HashMap<String, String>,
}

impl RawRow {
    pub fn cell(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// Raw two-dimensional table keyed by ticker row and named columns.
///
/// Row order is the page's row order and is preserved through
/// normalization; it is the documented tie-break for equal rank-sum
/// scores downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}
