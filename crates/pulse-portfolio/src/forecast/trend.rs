//! Performance index trend forecasting.

use crate::types::PerformancePoint;
use pulse_core::ReportingPeriod;
use serde::{Deserialize, Serialize};

/// Regression factor applied per projected month.
const REGRESSION_STEP: f64 = 0.2;

/// Projected SPI/CPI trend for one project.
///
/// Built from observed monthly history: a recency-weighted average (recent
/// months weigh up to three times the oldest) projected forward with a
/// gradual regression to the on-plan value of 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceForecast {
    /// Recency-weighted average of observed SPI.
    pub avg_spi: f64,

    /// Recency-weighted average of observed CPI.
    pub avg_cpi: f64,

    /// Projected periods, oldest first.
    pub periods: Vec<ReportingPeriod>,

    /// Projected SPI per period.
    pub spi: Vec<f64>,

    /// Projected CPI per period.
    pub cpi: Vec<f64>,
}

impl PerformanceForecast {
    /// Builds a forecast from observed history.
    ///
    /// Points must be sorted by period, as a snapshot stores them. Returns
    /// `None` for empty history - a forecast without observations is
    /// undefined, not an error.
    #[must_use]
    pub fn from_history(points: &[PerformancePoint], horizon: u32) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let weights = recency_weights(points.len());
        let avg_spi = weighted_average(points.iter().map(|p| p.spi), &weights);
        let avg_cpi = weighted_average(points.iter().map(|p| p.cpi), &weights);

        let last_period = points[points.len() - 1].period;
        let mut periods = Vec::with_capacity(horizon as usize);
        let mut spi = Vec::with_capacity(horizon as usize);
        let mut cpi = Vec::with_capacity(horizon as usize);

        for step in 1..=horizon {
            let factor = (REGRESSION_STEP * step as f64).min(1.0);
            periods.push(last_period.add_months(step));
            spi.push(avg_spi * (1.0 - factor) + factor);
            cpi.push(avg_cpi * (1.0 - factor) + factor);
        }

        Some(Self {
            avg_spi,
            avg_cpi,
            periods,
            spi,
            cpi,
        })
    }
}

/// Linear weights from 1 at the oldest point to 3 at the newest,
/// normalized to sum to 1.
fn recency_weights(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![1.0];
    }

    let raw: Vec<f64> = (0..n)
        .map(|i| 1.0 + 2.0 * i as f64 / (n - 1) as f64)
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| w / total).collect()
}

fn weighted_average(values: impl Iterator<Item = f64>, weights: &[f64]) -> f64 {
    values.zip(weights.iter()).map(|(v, w)| v * w).sum()
}
