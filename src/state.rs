use std::collections::BTreeMap;
use std::path::Path;

use crate::data::clean;
use crate::data::detect::{self, IssueReport};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::AnalyzerError;
use crate::regress::{self, FitResult, ModelKind};
use crate::roles::{ColumnRole, RoleRegistry};
use crate::stats::{self, ColumnStats};

// ---------------------------------------------------------------------------
// Session: the command surface the presentation layer talks to
// ---------------------------------------------------------------------------

/// Everything the table-display collaborator needs to paint one cell:
/// the text, the column's role (bold+green Independent, italic+dark-red
/// Dependent) and the issue flags (yellow missing, light-red duplicate row).
#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    pub role: ColumnRole,
    pub missing: bool,
    pub duplicate_row: bool,
}

/// The engine state threaded through every user action: the current
/// dataset, its role registry and the cached issue report.
///
/// All commands are synchronous and run to completion on the calling
/// thread; mutating commands replace the dataset and re-run detection, so
/// the presentation layer can query [`Session::cell_view`] on every redraw
/// without recomputing anything itself. Failures are plain return values
/// and never touch the current dataset.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Dataset>,
    roles: RoleRegistry,
    issues: IssueReport,
}

impl Session {
    /// Load a CSV file, replacing any current dataset and resetting all
    /// column roles to Unused. On failure the previous state is kept.
    pub fn open(&mut self, path: &Path) -> Result<(), AnalyzerError> {
        let dataset = loader::load_csv(path)?;
        self.roles = RoleRegistry::new(dataset.columns());
        self.issues = detect::detect(&dataset);
        self.dataset = Some(dataset);
        Ok(())
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn issues(&self) -> &IssueReport {
        &self.issues
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    /// Advance the role of a column one step in the Unused → Independent →
    /// Dependent cycle and return the new role.
    pub fn toggle_column_role(&mut self, column: &str) -> ColumnRole {
        self.roles.toggle(column)
    }

    /// Drop missing-value rows and surplus duplicates, then re-detect.
    /// Column roles survive cleaning since the column set is unchanged.
    pub fn clean_now(&mut self) -> Result<(), AnalyzerError> {
        let dataset = self.dataset.as_ref().ok_or(AnalyzerError::Empty)?;
        let cleaned = clean::clean(dataset, true, true);
        self.issues = detect::detect(&cleaned);
        self.dataset = Some(cleaned);
        Ok(())
    }

    /// Remove one row by index; later rows shift down and issues are
    /// recomputed. An out-of-range index leaves the rows unchanged.
    pub fn remove_row(&mut self, index: usize) -> Result<(), AnalyzerError> {
        let dataset = self.dataset.as_ref().ok_or(AnalyzerError::Empty)?;
        let remaining = dataset.remove_row(index);
        self.issues = detect::detect(&remaining);
        self.dataset = Some(remaining);
        Ok(())
    }

    /// Cleaning summary for the current dataset.
    pub fn suggest_cleaning(&self) -> Result<String, AnalyzerError> {
        let dataset = self.dataset.as_ref().ok_or(AnalyzerError::Empty)?;
        Ok(clean::suggest(dataset))
    }

    /// Descriptive statistics for every numeric column.
    pub fn compute_statistics(&self) -> Result<BTreeMap<String, ColumnStats>, AnalyzerError> {
        let dataset = self.dataset.as_ref().ok_or(AnalyzerError::Empty)?;
        stats::compute(dataset)
    }

    /// Fit the selected model against the role-derived variable sets.
    pub fn run_regression(&self, model: ModelKind) -> Result<FitResult, AnalyzerError> {
        let dataset = self.dataset.as_ref().ok_or(AnalyzerError::Empty)?;
        let (independent, dependent) = self.roles.variable_sets();
        regress::fit(dataset, &independent, &dependent, model)
    }

    /// Rendering contract: the display payload for one cell, or `None`
    /// when no dataset is loaded or the indices are out of range.
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        let dataset = self.dataset.as_ref()?;
        let value = dataset.cell(row, col)?;
        Some(CellView {
            text: value.to_string(),
            role: self.roles.role(&dataset.columns()[col]),
            missing: value.is_missing(),
            duplicate_row: self.issues.is_duplicate(row),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn messy_session() -> (Session, NamedTempFile) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"X,Y\n1,a\n1,a\n2,b\nnan,c\n").unwrap();
        file.flush().unwrap();

        let mut session = Session::default();
        session.open(file.path()).unwrap();
        (session, file)
    }

    #[test]
    fn open_initializes_roles_and_issues() {
        let (session, _file) = messy_session();
        assert_eq!(session.dataset().unwrap().row_count(), 4);
        assert_eq!(session.roles().role("X"), ColumnRole::Unused);
        assert!(session.issues().has_issues());
    }

    #[test]
    fn failed_open_keeps_the_previous_dataset() {
        let (mut session, _file) = messy_session();
        let err = session.open(Path::new("/nonexistent/data.csv"));
        assert!(matches!(err, Err(AnalyzerError::Load(_))));
        assert_eq!(session.dataset().unwrap().row_count(), 4);
    }

    #[test]
    fn clean_now_refreshes_issues_and_keeps_roles() {
        let (mut session, _file) = messy_session();
        session.toggle_column_role("X");

        session.clean_now().unwrap();
        assert_eq!(session.dataset().unwrap().row_count(), 2);
        assert!(!session.issues().has_issues());
        assert_eq!(session.roles().role("X"), ColumnRole::Independent);
        assert_eq!(session.suggest_cleaning().unwrap(), "No cleaning needed.");
    }

    #[test]
    fn remove_row_recomputes_duplicates() {
        let (mut session, _file) = messy_session();
        assert!(session.issues().is_duplicate(0));

        session.remove_row(1).unwrap();
        assert_eq!(session.dataset().unwrap().row_count(), 3);
        // The surviving copy is no longer part of an equal group.
        assert!(!session.issues().is_duplicate(0));
    }

    #[test]
    fn cell_view_carries_text_role_and_flags() {
        let (mut session, _file) = messy_session();
        session.toggle_column_role("X");

        let view = session.cell_view(0, 0).unwrap();
        assert_eq!(view.text, "1");
        assert_eq!(view.role, ColumnRole::Independent);
        assert!(!view.missing);
        assert!(view.duplicate_row);

        let missing = session.cell_view(3, 0).unwrap();
        assert_eq!(missing.text, "");
        assert!(missing.missing);
        assert!(!missing.duplicate_row);

        assert!(session.cell_view(9, 0).is_none());
    }

    #[test]
    fn commands_without_a_dataset_report_empty() {
        let mut session = Session::default();
        assert!(matches!(session.clean_now(), Err(AnalyzerError::Empty)));
        assert!(matches!(session.remove_row(0), Err(AnalyzerError::Empty)));
        assert!(matches!(
            session.compute_statistics(),
            Err(AnalyzerError::Empty)
        ));
        assert!(matches!(
            session.run_regression(ModelKind::Linear),
            Err(AnalyzerError::Empty)
        ));
        assert!(session.cell_view(0, 0).is_none());
    }
}
