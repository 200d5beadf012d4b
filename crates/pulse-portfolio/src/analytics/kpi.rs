//! Aggregate portfolio KPIs.
//!
//! The portfolio metrics aggregator: one pure function from a snapshot and
//! a configuration to the summary figures shown at the top of a dashboard.

use crate::bucketing::classify_record;
use crate::types::{AnalyticsConfig, DataQualityWarning, WarningKind};
use crate::PortfolioSnapshot;
use chrono::NaiveDate;
use pulse_core::{evm, RiskBucket};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate KPIs for one portfolio snapshot.
///
/// Undefined averages (empty snapshot, or no record with a defined index)
/// are `None` and render as `N/A`; they are never an error. Records whose
/// denominators are zero are excluded from the affected average and
/// reported in [`PortfolioKpis::warnings`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioKpis {
    /// Portfolio name.
    pub portfolio_name: String,

    /// The reporting date the KPIs describe.
    pub reporting_date: NaiveDate,

    /// Number of project records in the snapshot.
    pub project_count: usize,

    /// Projects still in delivery.
    pub active_projects: usize,

    /// Projects delivered and closed.
    pub completed_projects: usize,

    /// Mean SPI over records with a defined index.
    pub avg_spi: Option<f64>,

    /// Mean CPI over records with a defined index.
    pub avg_cpi: Option<f64>,

    /// Change in mean observed SPI versus the previous reporting period.
    pub spi_change: Option<f64>,

    /// Change in mean observed CPI versus the previous reporting period.
    pub cpi_change: Option<f64>,

    /// Projects classified at risk.
    pub at_risk_projects: usize,

    /// Projects classified critical.
    pub critical_projects: usize,

    /// Total budget at completion.
    pub total_budget: Decimal,

    /// Total actual cost to date.
    pub total_actual_cost: Decimal,

    /// Total earned value to date.
    pub total_earned_value: Decimal,

    /// Actual cost as a percentage of total budget.
    pub budget_utilization_pct: Option<f64>,

    /// Total expected risk exposure across the register.
    pub total_risk_exposure: Decimal,

    /// Records excluded from an average, and referential findings.
    pub warnings: Vec<DataQualityWarning>,
}

impl PortfolioKpis {
    /// Calculates the aggregate KPIs for a snapshot.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let kpis = PortfolioKpis::calculate(&snapshot, &config);
    /// for entry in kpis.entries() {
    ///     println!("{entry}");
    /// }
    /// ```
    #[must_use]
    pub fn calculate(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Self {
        let mut warnings = snapshot.quality_warnings();

        let avg_spi = mean_index(snapshot, &mut warnings, IndexKind::Spi);
        let avg_cpi = mean_index(snapshot, &mut warnings, IndexKind::Cpi);
        let (spi_change, cpi_change) = period_changes(snapshot);

        let mut at_risk_projects = 0;
        let mut critical_projects = 0;
        for record in &snapshot.records {
            match classify_record(record, &config.thresholds) {
                RiskBucket::AtRisk => at_risk_projects += 1,
                RiskBucket::Critical => critical_projects += 1,
                RiskBucket::OnTrack => {}
            }
        }

        let total_budget = snapshot.total_budget();
        let total_actual_cost = snapshot.total_actual_cost();

        Self {
            portfolio_name: snapshot.name.clone(),
            reporting_date: snapshot.reporting_date,
            project_count: snapshot.record_count(),
            active_projects: snapshot.records.iter().filter(|r| r.is_active()).count(),
            completed_projects: snapshot.records.iter().filter(|r| !r.is_active()).count(),
            avg_spi,
            avg_cpi,
            spi_change,
            cpi_change,
            at_risk_projects,
            critical_projects,
            total_budget,
            total_actual_cost,
            total_earned_value: snapshot.total_earned_value(),
            budget_utilization_pct: evm::percent_of_budget(total_actual_cost, total_budget),
            total_risk_exposure: snapshot.total_risk_exposure(),
            warnings,
        }
    }

    /// Number of flagged projects (at risk + critical).
    #[must_use]
    pub fn flagged_projects(&self) -> usize {
        self.at_risk_projects + self.critical_projects
    }

    /// Returns whether both headline averages are defined.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.avg_spi.is_some() && self.avg_cpi.is_some()
    }

    /// The KPI name-to-value mapping consumed by the rendering layer.
    ///
    /// Values are `None` where undefined; [`KpiEntry`]'s `Display` renders
    /// those as `N/A`.
    #[must_use]
    pub fn entries(&self) -> Vec<KpiEntry> {
        vec![
            KpiEntry::new("avg_spi", self.avg_spi),
            KpiEntry::new("avg_cpi", self.avg_cpi),
            KpiEntry::new("spi_change", self.spi_change),
            KpiEntry::new("cpi_change", self.cpi_change),
            KpiEntry::new("active_projects", Some(self.active_projects as f64)),
            KpiEntry::new("at_risk_projects", Some(self.at_risk_projects as f64)),
            KpiEntry::new("critical_projects", Some(self.critical_projects as f64)),
            KpiEntry::new("budget_utilization_pct", self.budget_utilization_pct),
        ]
    }
}

/// One named KPI value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiEntry {
    /// KPI name.
    pub name: &'static str,

    /// Value, or `None` when undefined.
    pub value: Option<f64>,
}

impl KpiEntry {
    /// Creates a new entry.
    #[must_use]
    pub fn new(name: &'static str, value: Option<f64>) -> Self {
        Self { name, value }
    }
}

impl fmt::Display for KpiEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, evm::format_ratio(self.value))
    }
}

/// Convenience function to calculate portfolio KPIs.
#[must_use]
pub fn calculate_portfolio_kpis(
    snapshot: &PortfolioSnapshot,
    config: &AnalyticsConfig,
) -> PortfolioKpis {
    PortfolioKpis::calculate(snapshot, config)
}

enum IndexKind {
    Spi,
    Cpi,
}

/// Mean of the defined per-record indices, excluding and warning on
/// active records whose denominator is zero.
fn mean_index(
    snapshot: &PortfolioSnapshot,
    warnings: &mut Vec<DataQualityWarning>,
    kind: IndexKind,
) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for record in &snapshot.records {
        let (value, field, label) = match kind {
            IndexKind::Spi => (record.spi(), "planned_cost", "SPI"),
            IndexKind::Cpi => (record.cpi(), "actual_cost", "CPI"),
        };

        match value {
            Some(v) => {
                sum += v;
                count += 1;
            }
            None if record.is_active() => {
                warnings.push(DataQualityWarning::for_project(
                    &record.id,
                    WarningKind::ZeroDenominator,
                    field,
                    format!("{label} undefined: {field} is zero"),
                ));
            }
            None => {}
        }
    }

    if count > 0 {
        Some(sum / count as f64)
    } else {
        None
    }
}

/// Mean observed SPI/CPI change versus the previous reporting period.
///
/// Compares the mean of each project's latest history point with the mean
/// of each project's second-latest point. Projects with fewer than two
/// points contribute only to the current mean.
fn period_changes(snapshot: &PortfolioSnapshot) -> (Option<f64>, Option<f64>) {
    let mut latest_spi = Vec::new();
    let mut latest_cpi = Vec::new();
    let mut previous_spi = Vec::new();
    let mut previous_cpi = Vec::new();

    for record in &snapshot.records {
        let points = snapshot.history_for(&record.id);
        if let Some(last) = points.last() {
            latest_spi.push(last.spi);
            latest_cpi.push(last.cpi);
        }
        if points.len() >= 2 {
            let prev = &points[points.len() - 2];
            previous_spi.push(prev.spi);
            previous_cpi.push(prev.cpi);
        }
    }

    let spi_change = match (mean(&latest_spi), mean(&previous_spi)) {
        (Some(latest), Some(previous)) => Some(latest - previous),
        _ => None,
    };
    let cpi_change = match (mean(&latest_cpi), mean(&previous_cpi)) {
        (Some(latest), Some(previous)) => Some(latest - previous),
        _ => None,
    };

    (spi_change, cpi_change)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
