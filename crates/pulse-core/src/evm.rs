//! Earned-value management math.
//!
//! Standard EVM ratios and projections over monetary amounts:
//!
//! - [`schedule_performance_index`] (SPI = EV / PV)
//! - [`cost_performance_index`] (CPI = EV / AC)
//! - [`schedule_variance`] / [`cost_variance`]
//! - [`estimate_at_completion`] (EAC), [`estimate_to_complete`] (ETC),
//!   [`variance_at_completion`] (VAC)
//! - [`to_complete_performance_index`] (TCPI)
//!
//! Every ratio with a zero or negative denominator is undefined and returns
//! `None`; callers render that as `N/A`. Nothing here errors or produces NaN.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Schedule performance index: earned value over planned value.
///
/// Undefined (`None`) when planned value is not positive.
#[must_use]
pub fn schedule_performance_index(earned_value: Decimal, planned_value: Decimal) -> Option<f64> {
    ratio(earned_value, planned_value)
}

/// Cost performance index: earned value over actual cost.
///
/// Undefined (`None`) when actual cost is not positive.
#[must_use]
pub fn cost_performance_index(earned_value: Decimal, actual_cost: Decimal) -> Option<f64> {
    ratio(earned_value, actual_cost)
}

/// Schedule variance: earned value minus planned value.
///
/// Negative when the project is behind schedule.
#[must_use]
pub fn schedule_variance(earned_value: Decimal, planned_value: Decimal) -> Decimal {
    earned_value - planned_value
}

/// Cost variance: earned value minus actual cost.
///
/// Negative when the project is over cost.
#[must_use]
pub fn cost_variance(earned_value: Decimal, actual_cost: Decimal) -> Decimal {
    earned_value - actual_cost
}

/// An amount as a percentage of a budget (0-100 scale).
///
/// Undefined (`None`) when the budget is not positive.
#[must_use]
pub fn percent_of_budget(amount: Decimal, budget: Decimal) -> Option<f64> {
    if budget <= Decimal::ZERO {
        return None;
    }
    (amount / budget * Decimal::ONE_HUNDRED).to_f64()
}

/// Estimate at completion: AC + (BAC - EV) / CPI.
///
/// The remaining work is assumed to continue at the observed cost
/// efficiency. Undefined when CPI is undefined or not positive.
#[must_use]
pub fn estimate_at_completion(
    budget: Decimal,
    earned_value: Decimal,
    actual_cost: Decimal,
) -> Option<Decimal> {
    if actual_cost <= Decimal::ZERO || earned_value <= Decimal::ZERO {
        return None;
    }
    // (BAC - EV) / CPI, expanded to a single division.
    Some(actual_cost + (budget - earned_value) * actual_cost / earned_value)
}

/// Estimate to complete: EAC - AC.
#[must_use]
pub fn estimate_to_complete(estimate_at_completion: Decimal, actual_cost: Decimal) -> Decimal {
    estimate_at_completion - actual_cost
}

/// Variance at completion: BAC - EAC.
///
/// Negative when the forecast cost exceeds the budget.
#[must_use]
pub fn variance_at_completion(budget: Decimal, estimate_at_completion: Decimal) -> Decimal {
    budget - estimate_at_completion
}

/// To-complete performance index: (BAC - EV) / (BAC - AC).
///
/// The cost efficiency required on remaining work to finish on budget.
/// Undefined when actual cost has reached or exceeded the budget.
#[must_use]
pub fn to_complete_performance_index(
    budget: Decimal,
    earned_value: Decimal,
    actual_cost: Decimal,
) -> Option<f64> {
    let remaining_budget = budget - actual_cost;
    if remaining_budget <= Decimal::ZERO {
        return None;
    }
    ((budget - earned_value) / remaining_budget).to_f64()
}

/// Confidence score (0-100) for a single performance index.
///
/// `100 * (1 - 0.5 * |1 - index|)`, floored at zero: an index of 1.0 is
/// full confidence, and confidence decays with distance from plan.
#[must_use]
pub fn index_confidence(index: f64) -> u8 {
    let confidence = 100.0 * (1.0 - 0.5 * (1.0 - index).abs());
    confidence.clamp(0.0, 100.0) as u8
}

/// Combined completion confidence from SPI and CPI.
///
/// The mean of the two index confidences; `None` when neither index is
/// defined, otherwise the missing index is treated as on-plan (1.0).
#[must_use]
pub fn completion_confidence(spi: Option<f64>, cpi: Option<f64>) -> Option<u8> {
    if spi.is_none() && cpi.is_none() {
        return None;
    }
    let spi_conf = index_confidence(spi.unwrap_or(1.0)) as u16;
    let cpi_conf = index_confidence(cpi.unwrap_or(1.0)) as u16;
    Some(((spi_conf + cpi_conf) / 2) as u8)
}

/// Renders a ratio with two decimals, or `N/A` when undefined.
#[must_use]
pub fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "N/A".to_string(),
    }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Option<f64> {
    if denominator <= Decimal::ZERO {
        return None;
    }
    (numerator / denominator).to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_spi_cpi_basic() {
        let spi = schedule_performance_index(dec!(80), dec!(100)).unwrap();
        let cpi = cost_performance_index(dec!(80), dec!(90)).unwrap();

        assert_relative_eq!(spi, 0.8, epsilon = 1e-12);
        assert_relative_eq!(cpi, 0.888_888_888_888_888_9, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_denominator_is_undefined() {
        assert_eq!(schedule_performance_index(dec!(80), Decimal::ZERO), None);
        assert_eq!(cost_performance_index(dec!(80), Decimal::ZERO), None);
        assert_eq!(percent_of_budget(dec!(50), Decimal::ZERO), None);
        assert_eq!(schedule_performance_index(dec!(80), dec!(-10)), None);
    }

    #[test]
    fn test_variances() {
        assert_eq!(schedule_variance(dec!(80), dec!(100)), dec!(-20));
        assert_eq!(cost_variance(dec!(80), dec!(90)), dec!(-10));
        assert_eq!(cost_variance(dec!(110), dec!(90)), dec!(20));
    }

    #[test]
    fn test_estimate_at_completion() {
        // BAC 1000, EV 400, AC 500 -> CPI 0.8
        // EAC = 500 + (1000 - 400) / 0.8 = 1250
        let eac = estimate_at_completion(dec!(1000), dec!(400), dec!(500)).unwrap();
        assert_eq!(eac, dec!(1250));

        assert_eq!(estimate_to_complete(eac, dec!(500)), dec!(750));
        assert_eq!(variance_at_completion(dec!(1000), eac), dec!(-250));
    }

    #[test]
    fn test_eac_undefined_without_progress() {
        assert_eq!(
            estimate_at_completion(dec!(1000), Decimal::ZERO, dec!(500)),
            None
        );
        assert_eq!(
            estimate_at_completion(dec!(1000), dec!(400), Decimal::ZERO),
            None
        );
    }

    #[test]
    fn test_tcpi() {
        // BAC 1000, EV 400, AC 500 -> (600) / (500) = 1.2
        let tcpi = to_complete_performance_index(dec!(1000), dec!(400), dec!(500)).unwrap();
        assert_relative_eq!(tcpi, 1.2, epsilon = 1e-12);

        // Spent past budget: required efficiency is undefined.
        assert_eq!(
            to_complete_performance_index(dec!(1000), dec!(400), dec!(1000)),
            None
        );
    }

    #[test]
    fn test_index_confidence() {
        assert_eq!(index_confidence(1.0), 100);
        assert_eq!(index_confidence(0.8), 90);
        assert_eq!(index_confidence(1.2), 90);
        assert_eq!(index_confidence(0.0), 50);
        // Far off plan floors at zero rather than going negative.
        assert_eq!(index_confidence(-2.0), 0);
    }

    #[test]
    fn test_completion_confidence() {
        assert_eq!(completion_confidence(Some(1.0), Some(1.0)), Some(100));
        assert_eq!(completion_confidence(Some(0.8), Some(1.0)), Some(95));
        assert_eq!(completion_confidence(None, None), None);
        // Missing index treated as on-plan.
        assert_eq!(completion_confidence(Some(0.8), None), Some(95));
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(0.8)), "0.80");
        assert_eq!(format_ratio(Some(1.234)), "1.23");
        assert_eq!(format_ratio(None), "N/A");
    }
}
