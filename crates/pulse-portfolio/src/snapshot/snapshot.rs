//! Snapshot struct and core methods.

use crate::types::{DataQualityWarning, PerformancePoint, ProjectRecord, RiskEntry, WarningKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All portfolio data for one reporting date.
///
/// A snapshot exclusively owns its records, risk register, and performance
/// history; every analytic is a pure function of a snapshot plus a
/// configuration. An empty snapshot is valid input - aggregates over it are
/// undefined (`N/A`), never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    /// Portfolio name.
    pub name: String,

    /// The reporting date this snapshot describes.
    pub reporting_date: NaiveDate,

    /// Project records, in ingestion order.
    pub records: Vec<ProjectRecord>,

    /// Risk-register entries across all projects.
    pub risks: Vec<RiskEntry>,

    /// Monthly performance history by project ID, sorted by period.
    pub history: HashMap<String, Vec<PerformancePoint>>,
}

impl PortfolioSnapshot {
    /// Creates a new snapshot builder.
    #[must_use]
    pub fn builder(reporting_date: NaiveDate) -> super::SnapshotBuilder {
        super::SnapshotBuilder::new(reporting_date)
    }

    /// Returns the number of project records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the snapshot has no project records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by project ID.
    #[must_use]
    pub fn record(&self, project_id: &str) -> Option<&ProjectRecord> {
        self.records.iter().find(|r| r.id == project_id)
    }

    /// Returns the records still in delivery.
    #[must_use]
    pub fn active_records(&self) -> Vec<&ProjectRecord> {
        self.records.iter().filter(|r| r.is_active()).collect()
    }

    /// Returns the risk-register entries for one project.
    #[must_use]
    pub fn risks_for(&self, project_id: &str) -> Vec<&RiskEntry> {
        self.risks
            .iter()
            .filter(|r| r.project_id == project_id)
            .collect()
    }

    /// Returns the performance history for one project, oldest first.
    #[must_use]
    pub fn history_for(&self, project_id: &str) -> &[PerformancePoint] {
        self.history
            .get(project_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total budget at completion across all records.
    #[must_use]
    pub fn total_budget(&self) -> Decimal {
        self.records.iter().map(|r| r.budget).sum()
    }

    /// Total planned value of work scheduled to date.
    #[must_use]
    pub fn total_planned_cost(&self) -> Decimal {
        self.records.iter().map(|r| r.planned_cost).sum()
    }

    /// Total actual cost to date.
    #[must_use]
    pub fn total_actual_cost(&self) -> Decimal {
        self.records.iter().map(|r| r.actual_cost).sum()
    }

    /// Total earned value to date.
    #[must_use]
    pub fn total_earned_value(&self) -> Decimal {
        self.records.iter().map(|r| r.earned_value).sum()
    }

    /// Total expected risk exposure across the register.
    #[must_use]
    pub fn total_risk_exposure(&self) -> Decimal {
        self.risks.iter().map(RiskEntry::exposure).sum()
    }

    /// Referential data-quality findings for this snapshot.
    ///
    /// Flags risks and history rows that reference projects missing from
    /// the record set, and duplicated risk IDs. These are warnings, not
    /// errors: the rows stay in the snapshot and are simply ignored or
    /// double-counted as-is by per-project analytics.
    #[must_use]
    pub fn quality_warnings(&self) -> Vec<DataQualityWarning> {
        let known: std::collections::HashSet<&str> =
            self.records.iter().map(|r| r.id.as_str()).collect();

        let mut warnings = Vec::new();

        let mut seen_risk_ids = std::collections::HashSet::new();
        for risk in &self.risks {
            if !known.contains(risk.project_id.as_str()) {
                warnings.push(DataQualityWarning::for_project(
                    &risk.project_id,
                    WarningKind::UnknownProject,
                    "project_id",
                    format!("risk '{}' references an unknown project", risk.id),
                ));
            }
            if !seen_risk_ids.insert(risk.id.as_str()) {
                warnings.push(DataQualityWarning::for_project(
                    &risk.project_id,
                    WarningKind::DuplicateId,
                    "risk_id",
                    format!("risk ID '{}' appears more than once", risk.id),
                ));
            }
        }

        for project_id in self.history.keys() {
            if !known.contains(project_id.as_str()) {
                warnings.push(DataQualityWarning::for_project(
                    project_id,
                    WarningKind::UnknownProject,
                    "project_id",
                    "performance history references an unknown project",
                ));
            }
        }

        warnings
    }
}
