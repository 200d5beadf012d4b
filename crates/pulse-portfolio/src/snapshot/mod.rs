//! Portfolio snapshot and builder.

mod builder;
#[allow(clippy::module_inception)]
mod snapshot;

pub use builder::SnapshotBuilder;
pub use snapshot::PortfolioSnapshot;
