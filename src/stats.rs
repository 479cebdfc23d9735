use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{CellValue, Dataset};
use crate::error::AnalyzerError;

// ---------------------------------------------------------------------------
// Descriptive statistics over numeric columns
// ---------------------------------------------------------------------------

/// Five-number descriptive summary of one numeric column.
///
/// Missing cells are ignored by all five statistics. `std` is the sample
/// standard deviation (N-1 denominator) and is NaN when fewer than two
/// values are present; an all-missing column yields NaN throughout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute descriptive statistics for every numeric column.
///
/// A column counts as numeric when every non-missing cell is a number;
/// columns with any text cell are excluded from the result entirely rather
/// than reported as an error. Fails with [`AnalyzerError::Empty`] when the
/// dataset has no rows.
pub fn compute(dataset: &Dataset) -> Result<BTreeMap<String, ColumnStats>, AnalyzerError> {
    if dataset.is_empty() {
        return Err(AnalyzerError::Empty);
    }

    let mut result = BTreeMap::new();
    'columns: for (col_idx, name) in dataset.columns().iter().enumerate() {
        let mut values = Vec::with_capacity(dataset.row_count());
        for row in &dataset.rows {
            match &row[col_idx] {
                CellValue::Number(v) => values.push(*v),
                CellValue::Missing => {}
                CellValue::Text(_) => continue 'columns,
            }
        }
        result.insert(name.clone(), summarize(&values));
    }
    Ok(result)
}

fn summarize(values: &[f64]) -> ColumnStats {
    let n = values.len();
    if n == 0 {
        return ColumnStats {
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let mean = values.iter().sum::<f64>() / n as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };

    let std = if n < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    };

    ColumnStats {
        mean,
        median,
        std,
        min: sorted[0],
        max: sorted[n - 1],
    }
}
