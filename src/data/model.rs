use std::fmt;

use crate::error::AnalyzerError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell.
///
/// The missing tokens `""`, `" "`, `"nan"` and `"NaN"` are normalized to
/// [`CellValue::Missing`] when a cell is parsed, so a `Number` is never NaN
/// and those literals never survive as `Text`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

// -- Manual Eq/Hash so full rows can be fingerprinted in a HashMap --

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Number(v) => v.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Missing => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Missing => Ok(()),
        }
    }
}

impl CellValue {
    /// Parse a raw CSV token into a typed cell, normalizing missing tokens.
    pub fn parse(token: &str) -> CellValue {
        match token {
            "" | " " | "nan" | "NaN" => return CellValue::Missing,
            _ => {}
        }
        if let Ok(v) = token.parse::<f64>() {
            // Rust's float parser accepts more NaN spellings ("NAN", "-nan", …)
            // than the missing-token list; those stay text, as pandas keeps them.
            if !v.is_nan() {
                return CellValue::Number(v);
            }
        }
        CellValue::Text(token.to_string())
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded table: ordered unique column names and ordered rows.
///
/// Every row holds exactly `columns.len()` cells. Cleaning and row removal
/// build a fresh `Dataset` rather than mutating in place; row identity is
/// positional, so removing row *i* shifts all later rows down by one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Build a dataset, validating the structural invariants: column names
    /// must be unique and every row must match the header width.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, AnalyzerError> {
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(AnalyzerError::Load(format!("duplicate column name {name:?}")));
            }
        }
        for (row_no, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(AnalyzerError::Load(format!(
                    "row {row_no} has {} cells, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Dataset { columns, rows })
    }

    /// Ordered column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (the header is not a row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`, or `None` when either index is out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Return a new dataset without the given row; later rows shift down.
    ///
    /// An out-of-range index is a defensive no-op returning the input
    /// unchanged, logged at `warn` level.
    pub fn remove_row(&self, index: usize) -> Dataset {
        if index >= self.rows.len() {
            log::warn!(
                "remove_row({index}) ignored: dataset has {} rows",
                self.rows.len()
            );
            return self.clone();
        }
        let mut rows = self.rows.clone();
        rows.remove(index);
        Dataset {
            columns: self.columns.clone(),
            rows,
        }
    }
}
