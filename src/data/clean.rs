use std::collections::HashSet;

use super::detect;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Cleaning transform
// ---------------------------------------------------------------------------

/// Build a cleaned copy of the dataset.
///
/// With `drop_missing`, every row containing a missing cell is removed
/// first; with `drop_duplicates`, only the first occurrence of each equal
/// row group is kept. Surviving rows keep their relative order and are
/// renumbered from zero. Cleaning an already-clean dataset returns an
/// equal dataset, so the transform is idempotent.
pub fn clean(dataset: &Dataset, drop_missing: bool, drop_duplicates: bool) -> Dataset {
    let mut rows: Vec<Vec<CellValue>> = dataset
        .rows
        .iter()
        .filter(|row| !(drop_missing && row.iter().any(CellValue::is_missing)))
        .cloned()
        .collect();

    if drop_duplicates {
        let mut seen: HashSet<Vec<CellValue>> = HashSet::with_capacity(rows.len());
        rows.retain(|row| seen.insert(row.clone()));
    }

    Dataset {
        columns: dataset.columns.clone(),
        rows,
    }
}

/// Human-readable cleaning summary.
///
/// Reports the total missing-cell count and the number of surplus duplicate
/// rows (rows beyond the first of each equal group), one finding per line,
/// or a fixed message when the dataset is already clean. The wording is
/// relied upon by the front-end, so it stays stable.
pub fn suggest(dataset: &Dataset) -> String {
    let report = detect::detect(dataset);

    let mut messages = Vec::new();
    if report.missing_cell_total > 0 {
        messages.push(format!("Found {} missing values.", report.missing_cell_total));
    }
    if report.surplus_duplicates > 0 {
        messages.push(format!("Found {} duplicate rows.", report.surplus_duplicates));
    }

    if messages.is_empty() {
        "No cleaning needed.".to_string()
    } else {
        messages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue::{Missing, Number, Text};

    fn messy_dataset() -> Dataset {
        Dataset::from_parts(
            vec!["X".into(), "Y".into()],
            vec![
                vec![Number(1.0), Text("a".into())],
                vec![Number(1.0), Text("a".into())],
                vec![Number(2.0), Text("b".into())],
                vec![Missing, Text("c".into())],
            ],
        )
        .unwrap()
    }

    #[test]
    fn drop_missing_leaves_no_missing_cells() {
        let cleaned = clean(&messy_dataset(), true, false);
        assert_eq!(cleaned.row_count(), 3);
        assert!(cleaned
            .rows
            .iter()
            .all(|row| !row.iter().any(CellValue::is_missing)));
    }

    #[test]
    fn drop_duplicates_keeps_first_occurrence() {
        let cleaned = clean(&messy_dataset(), false, true);
        assert_eq!(cleaned.row_count(), 3);
        assert_eq!(cleaned.cell(0, 0), Some(&Number(1.0)));
        assert_eq!(cleaned.cell(1, 0), Some(&Number(2.0)));
        assert_eq!(cleaned.cell(2, 0), Some(&Missing));
        assert_eq!(detect::detect(&cleaned).surplus_duplicates, 0);
    }

    #[test]
    fn both_flags_match_the_reference_scenario() {
        let cleaned = clean(&messy_dataset(), true, true);
        assert_eq!(cleaned.row_count(), 2);
        assert_eq!(cleaned.cell(0, 0), Some(&Number(1.0)));
        assert_eq!(cleaned.cell(0, 1), Some(&Text("a".into())));
        assert_eq!(cleaned.cell(1, 0), Some(&Number(2.0)));
        assert_eq!(cleaned.cell(1, 1), Some(&Text("b".into())));
    }

    #[test]
    fn clean_is_idempotent() {
        let once = clean(&messy_dataset(), true, true);
        let twice = clean(&once, true, true);
        assert_eq!(once, twice);
    }

    #[test]
    fn no_flags_returns_an_equal_dataset() {
        let ds = messy_dataset();
        assert_eq!(clean(&ds, false, false), ds);
    }

    #[test]
    fn suggest_reports_both_counts() {
        // One missing cell; one row beyond the first of its equal group.
        let msg = suggest(&messy_dataset());
        assert_eq!(msg, "Found 1 missing values.\nFound 1 duplicate rows.");
    }

    #[test]
    fn suggest_on_clean_data() {
        let cleaned = clean(&messy_dataset(), true, true);
        assert_eq!(suggest(&cleaned), "No cleaning needed.");
    }
}
