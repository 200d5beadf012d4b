//! # Pulse Portfolio
//!
//! Portfolio KPI aggregation and risk analytics for PMO Pulse.
//!
//! This crate turns a [`PortfolioSnapshot`] - project records, a risk
//! register, and monthly performance history for one reporting date - into
//! the derived figures a dashboard displays.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every analytic is a stateless function of a
//!   snapshot plus an [`AnalyticsConfig`]; results are recomputed on each
//!   request, never cached
//! - **Undefined, not broken**: a KPI whose denominator is zero is `None`
//!   (rendered `N/A`), and an empty snapshot yields all-undefined KPIs -
//!   neither is an error
//! - **Warnings as data**: records excluded from an aggregate surface as
//!   [`DataQualityWarning`]s on the result, not as failures
//!
//! ## Features
//!
//! - **Aggregate KPIs**: average SPI/CPI, period deltas, flagged counts,
//!   budget utilization, total risk exposure
//! - **Classification**: threshold-based risk buckets with the reported
//!   status as a floor; budget-weighted distributions by bucket, sector,
//!   and status
//! - **Attention List**: flagged projects ranked by combined severity
//! - **Forecasting**: earned-value completion projections, recency-weighted
//!   index trends, z-score anomaly flags
//! - **Insights**: rule-based textual findings at portfolio and project
//!   level
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pulse_portfolio::prelude::*;
//!
//! // Build a snapshot
//! let snapshot = PortfolioSnapshot::builder(reporting_date)
//!     .name("Capital Programs")
//!     .add_record(record)
//!     .add_risk(risk)
//!     .add_history("P001", history)
//!     .build()?;
//!
//! // Calculate analytics
//! let config = AnalyticsConfig::default();
//! let kpis = PortfolioKpis::calculate(&snapshot, &config);
//! let attention = projects_needing_attention(&snapshot, &config);
//! let by_bucket = bucket_by_risk(&snapshot, &config);
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Aggregate KPIs, per-project panels, risk exposure
//! - [`attention`] - Projects needing management attention
//! - [`bucketing`] - Classification and budget-weighted distributions
//! - [`forecast`] - Completion forecasts, trends, anomaly detection
//! - [`insights`] - Rule-based textual findings
//! - [`snapshot`] - Snapshot and builder types
//! - [`types`] - Core types (records, risks, history, config, warnings)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod analytics;
pub mod attention;
pub mod bucketing;
pub mod error;
pub mod forecast;
pub mod insights;
pub mod snapshot;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    AnalyticsConfig, DataQualityWarning, PerformancePoint, ProjectRecord, ProjectRecordBuilder,
    RiskCategory, RiskEntry, RiskStatus, RiskThresholds, WarningKind,
};

// Re-export snapshot types
pub use snapshot::{PortfolioSnapshot, SnapshotBuilder};

// Re-export analytics types and functions
pub use analytics::{
    calculate_portfolio_kpis, calculate_risk_exposure, KpiEntry, PortfolioKpis, ProjectMetrics,
    RankedRisk, RiskExposure,
};

// Re-export bucketing types and functions
pub use bucketing::{
    bucket_by_risk, bucket_by_sector, bucket_by_status, classify, classify_record, BucketMetrics,
    RiskDistribution, SectorDistribution, StatusDistribution,
};

// Re-export attention types and functions
pub use attention::{projects_needing_attention, AttentionEntry};

// Re-export forecast types and functions
pub use forecast::{detect_anomalies, AnomalyFlag, CompletionForecast, PerformanceForecast};

// Re-export insight types and functions
pub use insights::{portfolio_insights, project_insights, Insight, InsightSeverity};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use pulse_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core types
    pub use crate::types::{
        AnalyticsConfig, DataQualityWarning, PerformancePoint, ProjectRecord,
        ProjectRecordBuilder, RiskCategory, RiskEntry, RiskStatus, RiskThresholds, WarningKind,
    };

    // Snapshot
    pub use crate::snapshot::{PortfolioSnapshot, SnapshotBuilder};

    // Analytics
    pub use crate::analytics::{
        calculate_portfolio_kpis, calculate_risk_exposure, KpiEntry, PortfolioKpis,
        ProjectMetrics, RiskExposure,
    };

    // Bucketing
    pub use crate::bucketing::{
        bucket_by_risk, bucket_by_sector, bucket_by_status, classify_record, BucketMetrics,
        RiskDistribution, SectorDistribution, StatusDistribution,
    };

    // Attention
    pub use crate::attention::{projects_needing_attention, AttentionEntry};

    // Forecasting
    pub use crate::forecast::{
        detect_anomalies, AnomalyFlag, CompletionForecast, PerformanceForecast,
    };

    // Insights
    pub use crate::insights::{portfolio_insights, project_insights, Insight, InsightSeverity};

    // Re-export commonly used types from dependencies
    pub use chrono::NaiveDate;
    pub use pulse_core::{
        GeoPoint, ProjectStatus, ReportingPeriod, RiskBucket, Sector,
    };
    pub use rust_decimal::Decimal;
}
