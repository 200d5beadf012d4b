//! Project record with per-period earned-value figures.

use crate::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use pulse_core::{evm, GeoPoint, ProjectStatus, Sector};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single project's figures for one reporting period.
///
/// Immutable once ingested: a record belongs to exactly one
/// [`crate::PortfolioSnapshot`], and analytics recompute from it on each
/// request rather than mutating it.
///
/// Monetary fields follow earned-value conventions: `budget` is the budget
/// at completion (BAC), `planned_cost` the planned value of work scheduled
/// to date (PV), `actual_cost` the cost of work performed (AC), and
/// `earned_value` the budgeted cost of work performed (EV).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Unique identifier for this project.
    pub id: String,

    /// Project name.
    pub name: String,

    /// Portfolio sector.
    pub sector: Sector,

    /// Reported delivery status.
    pub status: ProjectStatus,

    /// Budget at completion (BAC).
    pub budget: Decimal,

    /// Planned value of work scheduled to date (PV).
    pub planned_cost: Decimal,

    /// Actual cost of work performed to date (AC).
    pub actual_cost: Decimal,

    /// Earned value of work performed to date (EV).
    pub earned_value: Decimal,

    /// Planned start date.
    pub start_date: NaiveDate,

    /// Planned end date.
    pub planned_end_date: NaiveDate,

    /// Planned schedule duration in days.
    pub planned_duration_days: i64,

    /// Elapsed delivery duration in days, as reported.
    pub elapsed_days: i64,

    /// Number of risks recorded against this project.
    pub risk_count: u32,

    /// Project manager, if known.
    pub manager: Option<String>,

    /// Site geolocation, if known.
    pub location: Option<GeoPoint>,
}

impl ProjectRecord {
    /// Creates a new record builder.
    #[must_use]
    pub fn builder() -> ProjectRecordBuilder {
        ProjectRecordBuilder::new()
    }

    /// Schedule performance index (EV / PV).
    ///
    /// Undefined when no work was planned to date.
    #[must_use]
    pub fn spi(&self) -> Option<f64> {
        evm::schedule_performance_index(self.earned_value, self.planned_cost)
    }

    /// Cost performance index (EV / AC).
    ///
    /// Undefined when nothing has been spent.
    #[must_use]
    pub fn cpi(&self) -> Option<f64> {
        evm::cost_performance_index(self.earned_value, self.actual_cost)
    }

    /// Schedule variance (EV - PV).
    #[must_use]
    pub fn schedule_variance(&self) -> Decimal {
        evm::schedule_variance(self.earned_value, self.planned_cost)
    }

    /// Cost variance (EV - AC).
    #[must_use]
    pub fn cost_variance(&self) -> Decimal {
        evm::cost_variance(self.earned_value, self.actual_cost)
    }

    /// Actual cost as a percentage of the budget at completion.
    #[must_use]
    pub fn percent_spent(&self) -> Option<f64> {
        evm::percent_of_budget(self.actual_cost, self.budget)
    }

    /// Forecast cost at completion (EAC).
    #[must_use]
    pub fn estimate_at_completion(&self) -> Option<Decimal> {
        evm::estimate_at_completion(self.budget, self.earned_value, self.actual_cost)
    }

    /// Elapsed calendar time as a percentage of the planned duration,
    /// capped at the planned end date.
    #[must_use]
    pub fn schedule_progress_pct(&self, as_of: NaiveDate) -> Option<f64> {
        if self.planned_duration_days <= 0 {
            return None;
        }
        let effective = as_of.min(self.planned_end_date).max(self.start_date);
        let days_passed = (effective - self.start_date).num_days();
        Some(days_passed as f64 / self.planned_duration_days as f64 * 100.0)
    }

    /// Calendar days remaining until the planned end date (zero if past).
    #[must_use]
    pub fn days_remaining(&self, as_of: NaiveDate) -> i64 {
        (self.planned_end_date - as_of).num_days().max(0)
    }

    /// Returns true if the project is still in delivery.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Builder for constructing a [`ProjectRecord`].
#[derive(Debug, Clone)]
pub struct ProjectRecordBuilder {
    id: Option<String>,
    name: Option<String>,
    sector: Sector,
    status: ProjectStatus,
    budget: Option<Decimal>,
    planned_cost: Decimal,
    actual_cost: Decimal,
    earned_value: Decimal,
    start_date: Option<NaiveDate>,
    planned_end_date: Option<NaiveDate>,
    planned_duration_days: Option<i64>,
    elapsed_days: Option<i64>,
    risk_count: u32,
    manager: Option<String>,
    location: Option<GeoPoint>,
}

impl Default for ProjectRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectRecordBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            name: None,
            sector: Sector::default(),
            status: ProjectStatus::OnTrack,
            budget: None,
            planned_cost: Decimal::ZERO,
            actual_cost: Decimal::ZERO,
            earned_value: Decimal::ZERO,
            start_date: None,
            planned_end_date: None,
            planned_duration_days: None,
            elapsed_days: None,
            risk_count: 0,
            manager: None,
            location: None,
        }
    }

    /// Sets the project ID.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the project name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn sector(mut self, sector: Sector) -> Self {
        self.sector = sector;
        self
    }

    /// Sets the reported status.
    #[must_use]
    pub fn status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the budget at completion.
    #[must_use]
    pub fn budget(mut self, budget: Decimal) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Sets the planned value of work scheduled to date.
    #[must_use]
    pub fn planned_cost(mut self, planned_cost: Decimal) -> Self {
        self.planned_cost = planned_cost;
        self
    }

    /// Sets the actual cost to date.
    #[must_use]
    pub fn actual_cost(mut self, actual_cost: Decimal) -> Self {
        self.actual_cost = actual_cost;
        self
    }

    /// Sets the earned value to date.
    #[must_use]
    pub fn earned_value(mut self, earned_value: Decimal) -> Self {
        self.earned_value = earned_value;
        self
    }

    /// Sets the planned start date.
    #[must_use]
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the planned end date.
    #[must_use]
    pub fn planned_end_date(mut self, date: NaiveDate) -> Self {
        self.planned_end_date = Some(date);
        self
    }

    /// Sets the planned duration in days (defaults to the date span).
    #[must_use]
    pub fn planned_duration_days(mut self, days: i64) -> Self {
        self.planned_duration_days = Some(days);
        self
    }

    /// Sets the reported elapsed duration in days.
    #[must_use]
    pub fn elapsed_days(mut self, days: i64) -> Self {
        self.elapsed_days = Some(days);
        self
    }

    /// Sets the recorded risk count.
    #[must_use]
    pub fn risk_count(mut self, count: u32) -> Self {
        self.risk_count = count;
        self
    }

    /// Sets the project manager.
    #[must_use]
    pub fn manager(mut self, manager: impl Into<String>) -> Self {
        self.manager = Some(manager.into());
        self
    }

    /// Sets the site geolocation.
    #[must_use]
    pub fn location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    /// Builds the record.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing, a monetary field is
    /// negative, or the planned dates are inconsistent.
    pub fn build(self) -> PortfolioResult<ProjectRecord> {
        let id = self.id.ok_or_else(|| PortfolioError::missing_field("id"))?;

        let name = self
            .name
            .ok_or_else(|| PortfolioError::missing_field("name"))?;

        let budget = self
            .budget
            .ok_or_else(|| PortfolioError::missing_field("budget"))?;

        let start_date = self
            .start_date
            .ok_or_else(|| PortfolioError::missing_field("start_date"))?;

        let planned_end_date = self
            .planned_end_date
            .ok_or_else(|| PortfolioError::missing_field("planned_end_date"))?;

        if budget < Decimal::ZERO {
            return Err(PortfolioError::invalid_record(
                &id,
                "budget cannot be negative",
            ));
        }

        for (field, value) in [
            ("planned_cost", self.planned_cost),
            ("actual_cost", self.actual_cost),
            ("earned_value", self.earned_value),
        ] {
            if value < Decimal::ZERO {
                return Err(PortfolioError::invalid_record(
                    &id,
                    format!("{field} cannot be negative"),
                ));
            }
        }

        if planned_end_date <= start_date {
            return Err(PortfolioError::invalid_record(
                &id,
                "planned_end_date must be after start_date",
            ));
        }

        let planned_duration_days = self
            .planned_duration_days
            .unwrap_or_else(|| (planned_end_date - start_date).num_days());

        if planned_duration_days <= 0 {
            return Err(PortfolioError::invalid_record(
                &id,
                "planned_duration_days must be positive",
            ));
        }

        let elapsed_days = self.elapsed_days.unwrap_or(0);
        if elapsed_days < 0 {
            return Err(PortfolioError::invalid_record(
                &id,
                "elapsed_days cannot be negative",
            ));
        }

        Ok(ProjectRecord {
            id,
            name,
            sector: self.sector,
            status: self.status,
            budget,
            planned_cost: self.planned_cost,
            actual_cost: self.actual_cost,
            earned_value: self.earned_value,
            start_date,
            planned_end_date,
            planned_duration_days,
            elapsed_days,
            risk_count: self.risk_count,
            manager: self.manager,
            location: self.location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_record() -> ProjectRecord {
        ProjectRecord::builder()
            .id("P001")
            .name("Harbor Expansion")
            .sector(Sector::Infrastructure)
            .budget(dec!(1_000_000))
            .planned_cost(dec!(100))
            .actual_cost(dec!(90))
            .earned_value(dec!(80))
            .start_date(date(2025, 1, 1))
            .planned_end_date(date(2025, 12, 31))
            .elapsed_days(120)
            .build()
            .unwrap()
    }

    #[test]
    fn test_indices() {
        let record = create_test_record();

        assert_relative_eq!(record.spi().unwrap(), 0.8, epsilon = 1e-12);
        assert_relative_eq!(record.cpi().unwrap(), 0.8889, epsilon = 1e-4);
        assert_eq!(record.schedule_variance(), dec!(-20));
        assert_eq!(record.cost_variance(), dec!(-10));
    }

    #[test]
    fn test_undefined_indices() {
        let record = ProjectRecord::builder()
            .id("P002")
            .name("Not Started")
            .budget(dec!(500_000))
            .start_date(date(2025, 6, 1))
            .planned_end_date(date(2026, 6, 1))
            .build()
            .unwrap();

        // No planned or spent work yet: both indices are undefined.
        assert_eq!(record.spi(), None);
        assert_eq!(record.cpi(), None);
    }

    #[test]
    fn test_schedule_progress() {
        let record = create_test_record();

        // 364-day plan, 90 days in.
        let progress = record.schedule_progress_pct(date(2025, 4, 1)).unwrap();
        assert_relative_eq!(progress, 90.0 / 364.0 * 100.0, epsilon = 1e-9);

        // Past the planned end, progress caps at 100%.
        let progress = record.schedule_progress_pct(date(2026, 3, 1)).unwrap();
        assert_relative_eq!(progress, 100.0, epsilon = 1e-9);

        // Before the start it floors at zero.
        let progress = record.schedule_progress_pct(date(2024, 12, 1)).unwrap();
        assert_relative_eq!(progress, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_days_remaining() {
        let record = create_test_record();
        assert_eq!(record.days_remaining(date(2025, 12, 30)), 1);
        assert_eq!(record.days_remaining(date(2026, 2, 1)), 0);
    }

    #[test]
    fn test_duration_defaults_to_date_span() {
        let record = create_test_record();
        assert_eq!(record.planned_duration_days, 364);
    }

    #[test]
    fn test_builder_validation() {
        // Missing budget
        let result = ProjectRecord::builder()
            .id("P003")
            .name("No Budget")
            .start_date(date(2025, 1, 1))
            .planned_end_date(date(2025, 6, 1))
            .build();
        assert!(result.is_err());

        // Negative earned value
        let result = ProjectRecord::builder()
            .id("P003")
            .name("Bad EV")
            .budget(dec!(100))
            .earned_value(dec!(-1))
            .start_date(date(2025, 1, 1))
            .planned_end_date(date(2025, 6, 1))
            .build();
        assert!(result.is_err());

        // End before start
        let result = ProjectRecord::builder()
            .id("P003")
            .name("Bad Dates")
            .budget(dec!(100))
            .start_date(date(2025, 6, 1))
            .planned_end_date(date(2025, 1, 1))
            .build();
        assert!(result.is_err());
    }
}
