//! Earned-value completion forecasting.

use crate::types::ProjectRecord;
use chrono::{Duration, NaiveDate};
use pulse_core::evm;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Forecast completion date and cost for one project.
///
/// The remaining schedule is scaled by the observed SPI and the remaining
/// budget by the observed CPI. Undefined indices fall back to on-plan
/// (schedule) or leave the cost forecast undefined, so a record without
/// spend still gets a date projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionForecast {
    /// The project forecast.
    pub project_id: String,

    /// Work progress as a percentage of planned value (0-100).
    pub progress_pct: f64,

    /// Forecast completion date.
    pub forecast_completion: NaiveDate,

    /// Forecast slip against the planned end date, in days.
    pub schedule_variance_days: i64,

    /// Forecast cost at completion (EAC).
    pub estimate_at_completion: Option<Decimal>,

    /// Forecast overrun against budget (EAC - BAC).
    pub cost_variance: Option<Decimal>,

    /// Confidence in the schedule forecast (0-100).
    pub schedule_confidence: u8,

    /// Confidence in the cost forecast (0-100).
    pub cost_confidence: u8,

    /// Combined confidence (0-100).
    pub overall_confidence: u8,
}

impl CompletionForecast {
    /// Builds the forecast for one record as of the given date.
    #[must_use]
    pub fn for_record(record: &ProjectRecord, as_of: NaiveDate) -> Self {
        let spi = record.spi();
        let cpi = record.cpi();

        let progress_pct = work_progress_pct(record, as_of);

        let planned_duration = record.planned_duration_days;
        let elapsed = record.elapsed_days.min(planned_duration.max(0));
        let remaining = (planned_duration - elapsed).max(0);

        // Remaining duration stretches by the inverse of schedule
        // efficiency; an undefined SPI projects on-plan.
        let spi_used = spi.unwrap_or(1.0);
        let adjusted_remaining = if spi_used > 0.0 {
            (remaining as f64 / spi_used).round() as i64
        } else {
            remaining * 2
        };
        let adjusted_remaining = adjusted_remaining.max(0);

        let forecast_completion =
            record.start_date + Duration::days(elapsed + adjusted_remaining);
        let schedule_variance_days = adjusted_remaining - remaining;

        let estimate_at_completion =
            evm::estimate_at_completion(record.budget, record.earned_value, record.actual_cost);
        let cost_variance = estimate_at_completion.map(|eac| eac - record.budget);

        let schedule_confidence = evm::index_confidence(spi_used);
        let cost_confidence = evm::index_confidence(cpi.unwrap_or(1.0));
        let overall_confidence =
            ((schedule_confidence as u16 + cost_confidence as u16) / 2) as u8;

        Self {
            project_id: record.id.clone(),
            progress_pct,
            forecast_completion,
            schedule_variance_days,
            estimate_at_completion,
            cost_variance,
            schedule_confidence,
            cost_confidence,
            overall_confidence,
        }
    }

    /// Returns true if the forecast slips past the planned end date.
    #[must_use]
    pub fn is_late(&self) -> bool {
        self.schedule_variance_days > 0
    }

    /// Returns true if the forecast cost exceeds the budget.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.cost_variance.is_some_and(|v| v > Decimal::ZERO)
    }
}

/// Earned work as a percentage of planned value, capped at 100.
///
/// Falls back to calendar progress when no work was planned to date.
fn work_progress_pct(record: &ProjectRecord, as_of: NaiveDate) -> f64 {
    if record.planned_cost > Decimal::ZERO {
        let fraction = (record.earned_value / record.planned_cost)
            .to_f64()
            .unwrap_or(0.0);
        (fraction * 100.0).min(100.0)
    } else {
        record
            .schedule_progress_pct(as_of)
            .unwrap_or(0.0)
            .min(100.0)
    }
}
