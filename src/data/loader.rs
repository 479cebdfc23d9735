use std::path::Path;

use crate::error::AnalyzerError;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Load a dataset from a CSV file: first row is the header, UTF-8 text.
///
/// Each cell is typed independently ([`CellValue::parse`]), normalizing the
/// missing tokens `""`, `" "`, `"nan"` and `"NaN"`. A file with a header but
/// no data rows is a valid, empty dataset; a malformed file (ragged rows,
/// duplicate column names, unreadable path) fails with
/// [`AnalyzerError::Load`] and leaves the caller's state untouched.
pub fn load_csv(path: &Path) -> Result<Dataset, AnalyzerError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| AnalyzerError::Load(format!("opening CSV: {e}")))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalyzerError::Load(format!("reading CSV header: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AnalyzerError::Load(format!("CSV row {row_no}: {e}")))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    let dataset = Dataset::from_parts(headers, rows)?;
    log::info!(
        "Loaded {} rows with columns {:?}",
        dataset.row_count(),
        dataset.columns()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_typed_cells_and_normalizes_missing() {
        let file = write_csv("X,Y\n1,a\nnan,b\n2.5,NaN\n");
        let ds = load_csv(file.path()).unwrap();

        assert_eq!(ds.columns(), ["X", "Y"]);
        assert_eq!(ds.row_count(), 3);
        assert_eq!(ds.cell(0, 0), Some(&CellValue::Number(1.0)));
        assert_eq!(ds.cell(0, 1), Some(&CellValue::Text("a".into())));
        assert_eq!(ds.cell(1, 0), Some(&CellValue::Missing));
        assert_eq!(ds.cell(2, 0), Some(&CellValue::Number(2.5)));
        assert_eq!(ds.cell(2, 1), Some(&CellValue::Missing));
    }

    #[test]
    fn header_only_file_is_a_valid_empty_dataset() {
        let file = write_csv("A,B,C\n");
        let ds = load_csv(file.path()).unwrap();
        assert_eq!(ds.columns(), ["A", "B", "C"]);
        assert!(ds.is_empty());
    }

    #[test]
    fn ragged_rows_fail_to_load() {
        let file = write_csv("A,B\n1,2\n3\n");
        assert!(matches!(
            load_csv(file.path()),
            Err(AnalyzerError::Load(_))
        ));
    }

    #[test]
    fn missing_file_fails_to_load() {
        let result = load_csv(Path::new("/nonexistent/data.csv"));
        assert!(matches!(result, Err(AnalyzerError::Load(_))));
    }

    #[test]
    fn duplicate_header_names_fail_to_load() {
        let file = write_csv("A,A\n1,2\n");
        assert!(matches!(
            load_csv(file.path()),
            Err(AnalyzerError::Load(_))
        ));
    }
}
