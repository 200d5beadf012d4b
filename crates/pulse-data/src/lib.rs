//! # Pulse Data
//!
//! Tabular data ingestion and sample data for PMO Pulse.
//!
//! This crate connects the analytics library to the outside world:
//!
//! - **Import**: CSV loaders for project records, risk registers, and
//!   monthly performance history, assembled into a
//!   [`pulse_portfolio::PortfolioSnapshot`]
//! - **Sample Data**: a deterministic, seeded portfolio generator for
//!   demos and tests
//!
//! ## Error Handling
//!
//! A malformed row - missing required numeric field, bad date, unknown
//! status - is skipped and reported as a
//! [`pulse_portfolio::DataQualityWarning`] on the import result; it never
//! fails the load. An unreadable file or missing header column is a
//! [`DataError`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use pulse_data::import::load_projects_csv;
//!
//! let import = load_projects_csv("projects.csv")?;
//! println!(
//!     "loaded {} records, {} warnings",
//!     import.records.len(),
//!     import.warnings.len()
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod import;
pub mod sample;

// Re-export error types at crate root
pub use error::{DataError, DataResult};

// Re-export main entry points
pub use import::{
    load_history_csv, load_projects_csv, load_risks_csv, load_snapshot, HistoryImport,
    ProjectImport, RiskImport, SnapshotImport, SnapshotPaths,
};
pub use sample::{generate_sample_snapshot, SampleConfig};
