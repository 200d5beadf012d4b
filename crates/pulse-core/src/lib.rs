//! # Pulse Core
//!
//! Core types and earned-value math for the PMO Pulse portfolio analytics
//! library.
//!
//! This crate provides the foundational building blocks used throughout
//! PMO Pulse:
//!
//! - **Types**: Domain-specific types like [`ProjectStatus`], [`RiskBucket`],
//!   [`Sector`], [`ReportingPeriod`], and [`GeoPoint`]
//! - **Earned-Value Math**: Standard EVM ratios and projections (SPI, CPI,
//!   schedule/cost variance, EAC, TCPI)
//!
//! ## Design Philosophy
//!
//! - **Undefined, not broken**: every ratio with a zero denominator is
//!   `None`, rendered downstream as `N/A`. No NaN ever escapes this crate.
//! - **Decimal for money, f64 for ratios**: monetary amounts are
//!   `rust_decimal::Decimal`; dimensionless indices are `f64`.
//! - **Explicit over implicit**: validated constructors, no silent clamping
//!   of out-of-range input.
//!
//! ## Example
//!
//! ```rust
//! use pulse_core::evm;
//! use rust_decimal_macros::dec;
//!
//! // One project: planned 100, earned 80, spent 90.
//! let spi = evm::schedule_performance_index(dec!(80), dec!(100));
//! let cpi = evm::cost_performance_index(dec!(80), dec!(90));
//!
//! assert_eq!(spi, Some(0.8));
//! assert_eq!(evm::format_ratio(spi), "0.80");
//! assert_eq!(evm::format_ratio(None), "N/A");
//! assert!(cpi.unwrap() < 0.9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod evm;
pub mod types;


// Re-export error types at crate root
pub use error::{CoreError, CoreResult};

// Re-export main types
pub use types::{GeoPoint, ProjectStatus, ReportingPeriod, RiskBucket, Sector};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pulse_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::evm;
    pub use crate::types::{GeoPoint, ProjectStatus, ReportingPeriod, RiskBucket, Sector};
}
