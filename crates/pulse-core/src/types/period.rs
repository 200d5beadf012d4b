//! Calendar reporting period (year-month).

use crate::error::{CoreError, CoreResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month used as the key of performance history.
///
/// Parsed and displayed as `YYYY-MM`. Ordering is chronological, so
/// history can be sorted by period directly.
///
/// # Example
///
/// ```rust
/// use pulse_core::types::ReportingPeriod;
///
/// let period: ReportingPeriod = "2025-06".parse().unwrap();
/// assert_eq!(period.next().to_string(), "2025-07");
/// assert_eq!(period.prev().to_string(), "2025-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportingPeriod {
    /// Calendar year.
    year: i32,
    /// Calendar month (1-12).
    month: u32,
}

impl ReportingPeriod {
    /// Creates a new period from year and month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPeriod` if the month is outside 1-12.
    pub fn new(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::invalid_period(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Creates the period containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the calendar month (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of the period.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month is validated at construction")
    }

    /// Returns the following period.
    #[must_use]
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns the preceding period.
    #[must_use]
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Returns the period `months` ahead of this one.
    #[must_use]
    pub fn add_months(&self, months: u32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + months as i32;
        Self {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }
}

impl FromStr for ReportingPeriod {
    type Err = CoreError;

    /// Parses a `YYYY-MM` string.
    fn from_str(s: &str) -> CoreResult<Self> {
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| CoreError::invalid_period(s))?;

        let year: i32 = year_str
            .parse()
            .map_err(|_| CoreError::invalid_period(s))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| CoreError::invalid_period(s))?;

        Self::new(year, month)
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let period: ReportingPeriod = "2025-06".parse().unwrap();
        assert_eq!(period.year(), 2025);
        assert_eq!(period.month(), 6);
        assert_eq!(period.to_string(), "2025-06");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!("2025-13".parse::<ReportingPeriod>().is_err());
        assert!("2025-00".parse::<ReportingPeriod>().is_err());
        assert!("202506".parse::<ReportingPeriod>().is_err());
        assert!("2025-xx".parse::<ReportingPeriod>().is_err());
    }

    #[test]
    fn test_year_boundary() {
        let dec: ReportingPeriod = "2024-12".parse().unwrap();
        assert_eq!(dec.next().to_string(), "2025-01");

        let jan: ReportingPeriod = "2025-01".parse().unwrap();
        assert_eq!(jan.prev().to_string(), "2024-12");
    }

    #[test]
    fn test_add_months() {
        let period = ReportingPeriod::new(2025, 11).unwrap();
        assert_eq!(period.add_months(3).to_string(), "2026-02");
        assert_eq!(period.add_months(0), period);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a: ReportingPeriod = "2024-12".parse().unwrap();
        let b: ReportingPeriod = "2025-01".parse().unwrap();
        let c: ReportingPeriod = "2025-02".parse().unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        let period = ReportingPeriod::from_date(date);
        assert_eq!(period.to_string(), "2025-03");
        assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn test_serde_roundtrip() {
        let period = ReportingPeriod::new(2025, 6).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        let parsed: ReportingPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }
}
