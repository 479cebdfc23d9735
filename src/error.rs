use thiserror::Error;

/// Failure taxonomy of the core engine.
///
/// Every variant is recoverable: the core never terminates the host
/// application, and the presentation layer decides how each failure is
/// displayed.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Unreadable or malformed input; the caller's dataset stays unchanged.
    #[error("failed to load dataset: {0}")]
    Load(String),

    /// An operation that needs data was invoked on an empty or absent dataset.
    #[error("dataset is empty or not loaded")]
    Empty,

    /// A request was made with invalid inputs (e.g. regression without both
    /// variable roles assigned, or over a non-numeric column).
    #[error("{0}")]
    Validation(String),

    /// The delegated regression solver failed.
    #[error("regression failed: {0}")]
    Fit(String),
}
