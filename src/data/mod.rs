/// Data layer: core types, loading, issue detection and cleaning.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (missing tokens normalized)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  columns + typed rows, single source of truth
///   └──────────┘
///        │
///        ├───────────────┐
///        ▼               ▼
///   ┌──────────┐   ┌──────────┐
///   │  detect   │   │  clean    │  issue flags / drop rows → new Dataset
///   └──────────┘   └──────────┘
/// ```

pub mod clean;
pub mod detect;
pub mod loader;
pub mod model;
