//! Portfolio-level analytics.
//!
//! This module provides the aggregated figures a dashboard displays:
//! - Portfolio KPIs (average SPI/CPI, period deltas, flagged counts)
//! - Per-project metric panels
//! - Risk-register exposure rollups
//!
//! All functions are pure - they take a snapshot and configuration as input
//! and return computed results, recomputed on every request. No caching,
//! no I/O, no side effects.

mod exposure;
mod kpi;
mod project;

pub use exposure::*;
pub use kpi::*;
pub use project::*;
