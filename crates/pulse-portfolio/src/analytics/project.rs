//! Per-project metric panels.

use crate::bucketing::classify;
use crate::types::{AnalyticsConfig, PerformancePoint, ProjectRecord};
use crate::PortfolioSnapshot;
use chrono::NaiveDate;
use pulse_core::{ProjectStatus, RiskBucket};
use serde::{Deserialize, Serialize};

/// Metrics for a single project, as shown on its dashboard panel.
///
/// Indices prefer the latest observed history point and fall back to the
/// record's own earned-value figures, so a project without history still
/// gets a panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// The project described.
    pub project_id: String,

    /// Project name.
    pub name: String,

    /// Reported status.
    pub status: ProjectStatus,

    /// Schedule performance index.
    pub spi: Option<f64>,

    /// Cost performance index.
    pub cpi: Option<f64>,

    /// SPI change versus the previous observed period.
    pub spi_change: Option<f64>,

    /// CPI change versus the previous observed period.
    pub cpi_change: Option<f64>,

    /// Actual cost as a percentage of budget at completion.
    pub percent_spent: Option<f64>,

    /// Elapsed calendar time as a percentage of planned duration.
    pub schedule_progress_pct: Option<f64>,

    /// Calendar days remaining until the planned end date.
    pub days_remaining: i64,

    /// Derived risk classification.
    pub bucket: RiskBucket,
}

impl ProjectMetrics {
    /// Calculates the metrics panel for one record.
    #[must_use]
    pub fn calculate(
        record: &ProjectRecord,
        history: &[PerformancePoint],
        as_of: NaiveDate,
        config: &AnalyticsConfig,
    ) -> Self {
        // Latest observation wins; the record's own figures fill the gaps.
        let (spi, cpi) = match history.last() {
            Some(last) => (Some(last.spi), Some(last.cpi)),
            None => (record.spi(), record.cpi()),
        };

        let (spi_change, cpi_change) = if history.len() >= 2 {
            let prev = &history[history.len() - 2];
            let last = &history[history.len() - 1];
            (Some(last.spi - prev.spi), Some(last.cpi - prev.cpi))
        } else {
            (None, None)
        };

        Self {
            project_id: record.id.clone(),
            name: record.name.clone(),
            status: record.status,
            spi,
            cpi,
            spi_change,
            cpi_change,
            percent_spent: record.percent_spent(),
            schedule_progress_pct: record.schedule_progress_pct(as_of),
            days_remaining: record.days_remaining(as_of),
            bucket: classify(spi, cpi, record.status, &config.thresholds),
        }
    }

    /// Calculates panels for every record in a snapshot.
    #[must_use]
    pub fn calculate_all(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Vec<Self> {
        snapshot
            .records
            .iter()
            .map(|record| {
                Self::calculate(
                    record,
                    snapshot.history_for(&record.id),
                    snapshot.reporting_date,
                    config,
                )
            })
            .collect()
    }
}
