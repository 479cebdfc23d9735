use std::collections::HashMap;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Issue detection: missing cells and duplicate rows
// ---------------------------------------------------------------------------

/// Derived per-row issue flags over a dataset.
///
/// Not persisted anywhere; callers recompute it after every dataset
/// mutation. Two runs over an unchanged dataset yield identical reports.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IssueReport {
    /// `true` where the row has at least one missing cell.
    pub missing_rows: Vec<bool>,
    /// `true` where the full row equals at least one *other* row. Every
    /// member of an equal group is flagged, the first occurrence included.
    pub duplicate_rows: Vec<bool>,
    /// Total count of missing cells across the whole table.
    pub missing_cell_total: usize,
    /// Rows beyond the first of each equal group (`keep=first` semantics).
    pub surplus_duplicates: usize,
}

impl IssueReport {
    pub fn is_missing(&self, row: usize) -> bool {
        self.missing_rows.get(row).copied().unwrap_or(false)
    }

    pub fn is_duplicate(&self, row: usize) -> bool {
        self.duplicate_rows.get(row).copied().unwrap_or(false)
    }

    pub fn has_issues(&self) -> bool {
        self.missing_cell_total > 0 || self.surplus_duplicates > 0
    }
}

/// Scan a dataset for missing cells and duplicate rows.
///
/// Duplicate detection hashes each full row once, so the pass is
/// O(rows × columns) overall.
pub fn detect(dataset: &Dataset) -> IssueReport {
    let mut occurrences: HashMap<&[CellValue], usize> =
        HashMap::with_capacity(dataset.rows.len());
    for row in &dataset.rows {
        *occurrences.entry(row.as_slice()).or_insert(0) += 1;
    }

    let mut missing_cell_total = 0;
    let mut missing_rows = Vec::with_capacity(dataset.rows.len());
    let mut duplicate_rows = Vec::with_capacity(dataset.rows.len());
    for row in &dataset.rows {
        let missing = row.iter().filter(|c| c.is_missing()).count();
        missing_cell_total += missing;
        missing_rows.push(missing > 0);
        duplicate_rows.push(occurrences[row.as_slice()] > 1);
    }

    IssueReport {
        missing_rows,
        duplicate_rows,
        missing_cell_total,
        surplus_duplicates: dataset.rows.len() - occurrences.len(),
    }
}
