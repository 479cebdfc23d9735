//! Core engine of a desktop CSV inspection tool.
//!
//! The crate owns everything with repeatable algorithmic behaviour:
//! the in-memory [`data::model::Dataset`], missing/duplicate issue
//! detection, the cleaning transform, the tri-state column-role state
//! machine, descriptive statistics and the delegated regression fit.
//! Presentation (windows, menus, table rendering, plots) is an external
//! collaborator that drives the [`state::Session`] command surface and
//! paints whatever it returns.

pub mod data;
pub mod error;
pub mod regress;
pub mod roles;
pub mod state;
pub mod stats;

pub use error::AnalyzerError;
