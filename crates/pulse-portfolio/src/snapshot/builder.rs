//! Snapshot builder for fluent construction.

use crate::types::{PerformancePoint, ProjectRecord, RiskEntry};
use crate::{PortfolioError, PortfolioResult, PortfolioSnapshot};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

/// Builder for constructing a [`PortfolioSnapshot`].
///
/// # Example
///
/// ```rust,ignore
/// use pulse_portfolio::prelude::*;
///
/// let snapshot = PortfolioSnapshot::builder(reporting_date)
///     .name("Capital Programs")
///     .add_record(record1)
///     .add_record(record2)
///     .add_risk(risk)
///     .add_history("P001", history_points)
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    name: Option<String>,
    reporting_date: NaiveDate,
    records: Vec<ProjectRecord>,
    risks: Vec<RiskEntry>,
    history: HashMap<String, Vec<PerformancePoint>>,
}

impl SnapshotBuilder {
    /// Creates a new builder for the given reporting date.
    #[must_use]
    pub fn new(reporting_date: NaiveDate) -> Self {
        Self {
            name: None,
            reporting_date,
            records: Vec::new(),
            risks: Vec::new(),
            history: HashMap::new(),
        }
    }

    /// Sets the portfolio name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a project record.
    #[must_use]
    pub fn add_record(mut self, record: ProjectRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Adds multiple project records.
    #[must_use]
    pub fn add_records(mut self, records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        self.records.extend(records);
        self
    }

    /// Adds a risk-register entry.
    #[must_use]
    pub fn add_risk(mut self, risk: RiskEntry) -> Self {
        self.risks.push(risk);
        self
    }

    /// Adds multiple risk-register entries.
    #[must_use]
    pub fn add_risks(mut self, risks: impl IntoIterator<Item = RiskEntry>) -> Self {
        self.risks.extend(risks);
        self
    }

    /// Adds performance history for a project.
    ///
    /// Points for the same project accumulate across calls and are sorted
    /// by period at build time.
    #[must_use]
    pub fn add_history(
        mut self,
        project_id: impl Into<String>,
        points: impl IntoIterator<Item = PerformancePoint>,
    ) -> Self {
        self.history
            .entry(project_id.into())
            .or_default()
            .extend(points);
        self
    }

    /// Builds the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::DuplicateProject` if two records share an
    /// ID. An empty snapshot is valid.
    pub fn build(self) -> PortfolioResult<PortfolioSnapshot> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.records.len());
        for record in &self.records {
            if !seen.insert(record.id.as_str()) {
                return Err(PortfolioError::DuplicateProject {
                    id: record.id.clone(),
                });
            }
        }

        let mut history = self.history;
        for points in history.values_mut() {
            points.sort_by_key(|p| p.period);
        }

        Ok(PortfolioSnapshot {
            name: self.name.unwrap_or_else(|| "Portfolio".to_string()),
            reporting_date: self.reporting_date,
            records: self.records,
            risks: self.risks,
            history,
        })
    }
}
