use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use tablecheck::regress::ModelKind;
use tablecheck::state::Session;

/// Terminal front-end standing in for the desktop collaborator: loads a
/// CSV, prints the issue summary and statistics, and optionally runs a
/// regression with explicit variable columns.
fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parsed command line: the CSV path plus an optional regression request.
type Invocation = (PathBuf, Option<(ModelKind, Vec<String>, String)>);

fn parse_args(args: &[String]) -> Result<Invocation> {
    match args {
        [path] => Ok((PathBuf::from(path), None)),
        [path, model, x_cols, y_col] => {
            let model: ModelKind = model.parse()?;
            let x_cols: Vec<String> = x_cols.split(',').map(str::to_string).collect();
            if x_cols.iter().any(|c| c == y_col) {
                bail!("column {y_col:?} cannot be both an independent and the dependent variable");
            }
            Ok((PathBuf::from(path), Some((model, x_cols, y_col.clone()))))
        }
        _ => bail!("usage: tablecheck <data.csv> [linear|ridge|lasso <x1,x2,…> <y>]"),
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (path, regression) = parse_args(&args)?;

    let mut session = Session::default();
    session
        .open(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let dataset = session.dataset().context("no dataset after load")?;
    println!(
        "{} rows, {} columns: {:?}",
        dataset.row_count(),
        dataset.columns().len(),
        dataset.columns()
    );
    println!("\n{}", session.suggest_cleaning()?);

    match session.compute_statistics() {
        Ok(stats) => {
            for (column, s) in &stats {
                println!("\n{column} Statistics:");
                println!("  mean: {:.4}", s.mean);
                println!("  median: {:.4}", s.median);
                println!("  std: {:.4}", s.std);
                println!("  min: {:.4}", s.min);
                println!("  max: {:.4}", s.max);
            }
        }
        Err(e) => println!("\nStatistics unavailable: {e}"),
    }

    if let Some((model, x_cols, y_col)) = regression {
        // Drive the same toggle cycle a header click would: one step for
        // Independent, two for Dependent.
        for col in &x_cols {
            session.toggle_column_role(col);
        }
        session.toggle_column_role(&y_col);
        session.toggle_column_role(&y_col);

        let fit = session
            .run_regression(model)
            .context("running regression")?;
        println!("\nR^2 Score: {:.4}", fit.r2);
        println!("Coefficients: {:?}", fit.coefficients);
        println!("Intercept: {}", fit.intercept);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn plain_path_parses_without_regression() {
        let (path, regression) = parse_args(&args(&["data.csv"])).unwrap();
        assert_eq!(path, PathBuf::from("data.csv"));
        assert!(regression.is_none());
    }

    #[test]
    fn regression_arguments_parse() {
        let (_, regression) =
            parse_args(&args(&["data.csv", "ridge", "a,b", "y"])).unwrap();
        let (model, x_cols, y_col) = regression.unwrap();
        assert_eq!(model, ModelKind::Ridge);
        assert_eq!(x_cols, ["a", "b"]);
        assert_eq!(y_col, "y");
    }

    #[test]
    fn overlapping_x_and_y_columns_are_rejected_up_front() {
        let err = parse_args(&args(&["data.csv", "linear", "a,y", "y"])).unwrap_err();
        assert!(err.to_string().contains("both"), "{err}");
    }

    #[test]
    fn wrong_arity_is_a_usage_error() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["data.csv", "linear", "a"])).is_err());
    }
}
