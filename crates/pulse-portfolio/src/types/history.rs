//! Monthly observed performance history.

use pulse_core::ReportingPeriod;
use serde::{Deserialize, Serialize};

/// One month's observed SPI/CPI for a project.
///
/// History points come from the source system's monthly reporting; they are
/// observations, not recomputed values. Trend deltas and forecasts read
/// them in period order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// The month observed.
    pub period: ReportingPeriod,

    /// Observed schedule performance index.
    pub spi: f64,

    /// Observed cost performance index.
    pub cpi: f64,
}

impl PerformancePoint {
    /// Creates a new performance point.
    #[must_use]
    pub fn new(period: ReportingPeriod, spi: f64, cpi: f64) -> Self {
        Self { period, spi, cpi }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_sort_chronologically() {
        let mut points = vec![
            PerformancePoint::new("2025-03".parse().unwrap(), 0.9, 1.0),
            PerformancePoint::new("2025-01".parse().unwrap(), 1.0, 1.0),
            PerformancePoint::new("2025-02".parse().unwrap(), 0.95, 1.0),
        ];
        points.sort_by_key(|p| p.period);

        assert_eq!(points[0].period.to_string(), "2025-01");
        assert_eq!(points[2].period.to_string(), "2025-03");
    }
}
