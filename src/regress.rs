use std::str::FromStr;

use linfa::prelude::*;
use linfa_elasticnet::ElasticNet;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use crate::data::model::{CellValue, Dataset};
use crate::error::AnalyzerError;

// ---------------------------------------------------------------------------
// Regression: fit role-derived variables with a delegated solver
// ---------------------------------------------------------------------------

/// Which fitting algorithm to delegate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Ordinary least squares.
    Linear,
    /// L2-penalized linear regression.
    Ridge,
    /// L1-penalized linear regression.
    Lasso,
}

impl FromStr for ModelKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(ModelKind::Linear),
            "ridge" => Ok(ModelKind::Ridge),
            "lasso" => Ok(ModelKind::Lasso),
            other => Err(AnalyzerError::Validation(format!(
                "unknown model kind {other:?} (expected linear, ridge or lasso)"
            ))),
        }
    }
}

/// Fit summary: R² plus the fitted hyperplane.
///
/// `coefficients` has one entry per independent variable, in the order the
/// variables were passed. Fit and score use the same rows; the tool is
/// diagnostic, not predictive, so there is no train/test split.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    pub r2: f64,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Penalty applied by the Ridge and Lasso solvers, mirroring the default
/// the original tool inherited from its modelling library.
const PENALTY: f64 = 1.0;

/// Fit `model` with the `independent` columns as the design matrix and the
/// first `dependent` column as the target.
///
/// Extra dependent columns are ignored. Rows with a missing cell in any
/// selected column are excluded from the fit. Fails with
/// [`AnalyzerError::Validation`] when either variable list is empty, a
/// selected column is unknown or non-numeric, or no complete rows remain;
/// solver failures surface as [`AnalyzerError::Fit`].
pub fn fit(
    dataset: &Dataset,
    independent: &[String],
    dependent: &[String],
    model: ModelKind,
) -> Result<FitResult, AnalyzerError> {
    if independent.is_empty() || dependent.is_empty() {
        return Err(AnalyzerError::Validation(
            "both independent and dependent variables must be assigned".into(),
        ));
    }

    let feature_indices: Vec<usize> = independent
        .iter()
        .map(|name| resolve_numeric_column(dataset, name))
        .collect::<Result<_, _>>()?;
    // Only the first dependent column is fitted.
    let target_index = resolve_numeric_column(dataset, &dependent[0])?;

    // Assemble the design matrix and target vector, skipping incomplete rows.
    let mut features = Vec::new();
    let mut targets = Vec::new();
    'rows: for row in &dataset.rows {
        let mut row_features = Vec::with_capacity(feature_indices.len());
        for &idx in &feature_indices {
            match row[idx].as_f64() {
                Some(v) => row_features.push(v),
                None => continue 'rows,
            }
        }
        match row[target_index].as_f64() {
            Some(v) => {
                features.extend_from_slice(&row_features);
                targets.push(v);
            }
            None => {}
        }
    }

    if targets.is_empty() {
        return Err(AnalyzerError::Validation(
            "no complete rows left to fit after excluding missing values".into(),
        ));
    }

    let records = Array2::from_shape_vec((targets.len(), feature_indices.len()), features)
        .map_err(|e| AnalyzerError::Fit(e.to_string()))?;
    let targets = Array1::from_vec(targets);

    let (coefficients, intercept, r2) = match model {
        ModelKind::Linear => {
            let data = linfa::Dataset::new(records, targets);
            let fitted = LinearRegression::new()
                .fit(&data)
                .map_err(|e| AnalyzerError::Fit(e.to_string()))?;
            let prediction = fitted.predict(&data);
            let r2 = prediction
                .r2(&data)
                .map_err(|e| AnalyzerError::Fit(e.to_string()))?;
            (fitted.params().to_vec(), fitted.intercept(), r2)
        }
        ModelKind::Ridge | ModelKind::Lasso => {
            // The coordinate-descent solver leaves the features uncentered
            // and reports the target mean as the intercept, which wrecks the
            // fit whenever a feature column has a non-zero mean. Center the
            // design matrix ourselves and fold the column means back into
            // the intercept afterwards.
            let means = records
                .mean_axis(Axis(0))
                .ok_or_else(|| AnalyzerError::Fit("empty design matrix".into()))?;
            let centered = &records - &means.clone().insert_axis(Axis(0));
            let data = linfa::Dataset::new(centered, targets);

            let params = if model == ModelKind::Ridge {
                ElasticNet::<f64>::ridge()
            } else {
                ElasticNet::<f64>::lasso()
            };
            let fitted = params
                .penalty(PENALTY)
                .fit(&data)
                .map_err(|e| AnalyzerError::Fit(e.to_string()))?;
            // Predictions over the centered matrix already include the mean
            // shift, so R² needs no correction.
            let prediction = fitted.predict(&data);
            let r2 = prediction
                .r2(&data)
                .map_err(|e| AnalyzerError::Fit(e.to_string()))?;

            let intercept = fitted.intercept() - fitted.hyperplane().dot(&means);
            (fitted.hyperplane().to_vec(), intercept, r2)
        }
    };

    Ok(FitResult {
        r2,
        coefficients,
        intercept,
    })
}

/// Resolve a selected column, requiring it to exist and hold no text cells.
fn resolve_numeric_column(dataset: &Dataset, name: &str) -> Result<usize, AnalyzerError> {
    let idx = dataset.column_index(name).ok_or_else(|| {
        AnalyzerError::Validation(format!("unknown column {name:?}"))
    })?;
    let non_numeric = dataset
        .rows
        .iter()
        .any(|row| matches!(row[idx], CellValue::Text(_)));
    if non_numeric {
        return Err(AnalyzerError::Validation(format!(
            "column {name:?} contains non-numeric values"
        )));
    }
    Ok(idx)
}
