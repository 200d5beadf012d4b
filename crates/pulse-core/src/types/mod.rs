//! Core reporting types.
//!
//! - [`ProjectStatus`]: reported delivery status of a project
//! - [`RiskBucket`]: derived risk classification
//! - [`Sector`]: portfolio sector taxonomy
//! - [`ReportingPeriod`]: calendar year-month used for performance history
//! - [`GeoPoint`]: optional project site location

mod geo;
mod period;
mod sector;
mod status;

pub use geo::GeoPoint;
pub use period::ReportingPeriod;
pub use sector::Sector;
pub use status::{ProjectStatus, RiskBucket};
