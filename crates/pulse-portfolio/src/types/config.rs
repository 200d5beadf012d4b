//! Configuration for portfolio analytics computation.

use crate::{PortfolioError, PortfolioResult};
use serde::{Deserialize, Serialize};

/// Thresholds for risk-bucket classification.
///
/// A project with a defined index below its threshold is at risk; below
/// `threshold - critical_margin` it is critical. Classification is monotone
/// in these thresholds: raising a threshold can only flag more projects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// SPI below this value flags a project as at risk.
    pub spi_at_risk: f64,

    /// CPI below this value flags a project as at risk.
    pub cpi_at_risk: f64,

    /// Margin below the at-risk threshold at which a project is critical.
    pub critical_margin: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            spi_at_risk: 0.90,
            cpi_at_risk: 0.90,
            critical_margin: 0.10,
        }
    }
}

impl RiskThresholds {
    /// Creates thresholds with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the SPI at-risk threshold.
    #[must_use]
    pub fn with_spi_at_risk(mut self, threshold: f64) -> Self {
        self.spi_at_risk = threshold;
        self
    }

    /// Sets the CPI at-risk threshold.
    #[must_use]
    pub fn with_cpi_at_risk(mut self, threshold: f64) -> Self {
        self.cpi_at_risk = threshold;
        self
    }

    /// Sets the critical margin.
    #[must_use]
    pub fn with_critical_margin(mut self, margin: f64) -> Self {
        self.critical_margin = margin;
        self
    }

    /// SPI below this value classifies a project as critical.
    #[must_use]
    pub fn spi_critical(&self) -> f64 {
        self.spi_at_risk - self.critical_margin
    }

    /// CPI below this value classifies a project as critical.
    #[must_use]
    pub fn cpi_critical(&self) -> f64 {
        self.cpi_at_risk - self.critical_margin
    }

    /// Validates the thresholds.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidThresholds` if any value is not
    /// finite, a threshold is not positive, or the margin is negative or
    /// at least as large as a threshold.
    pub fn validate(&self) -> PortfolioResult<()> {
        for (name, value) in [
            ("spi_at_risk", self.spi_at_risk),
            ("cpi_at_risk", self.cpi_at_risk),
            ("critical_margin", self.critical_margin),
        ] {
            if !value.is_finite() {
                return Err(PortfolioError::invalid_thresholds(format!(
                    "{name} must be finite"
                )));
            }
        }

        if self.spi_at_risk <= 0.0 || self.cpi_at_risk <= 0.0 {
            return Err(PortfolioError::invalid_thresholds(
                "thresholds must be positive",
            ));
        }
        if self.critical_margin < 0.0 {
            return Err(PortfolioError::invalid_thresholds(
                "critical_margin cannot be negative",
            ));
        }
        if self.critical_margin >= self.spi_at_risk.min(self.cpi_at_risk) {
            return Err(PortfolioError::invalid_thresholds(
                "critical_margin must be smaller than both thresholds",
            ));
        }

        Ok(())
    }
}

/// Configuration for portfolio analytics computation.
///
/// Controls classification thresholds, list limits, and forecast
/// parameters. All analytics are recomputed per request from the snapshot
/// and this configuration; nothing is cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Classification thresholds.
    pub thresholds: RiskThresholds,

    /// Maximum entries returned by the attention list.
    pub attention_limit: usize,

    /// Maximum entries returned as top risks.
    pub top_risk_limit: usize,

    /// Months projected by the performance forecast.
    pub forecast_horizon: u32,

    /// Mean absolute z-score above which a project is flagged anomalous.
    pub anomaly_z_threshold: f64,

    /// Risk score at or above which a register entry is high risk.
    pub high_risk_score: f64,

    /// Risk exposure above this percentage of portfolio budget is flagged.
    pub exposure_budget_limit_pct: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            attention_limit: 10,
            top_risk_limit: 5,
            forecast_horizon: 3,
            anomaly_z_threshold: 2.5,
            high_risk_score: 0.6,
            exposure_budget_limit_pct: 15.0,
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the classification thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Sets the attention list limit.
    #[must_use]
    pub fn with_attention_limit(mut self, limit: usize) -> Self {
        self.attention_limit = limit;
        self
    }

    /// Sets the top risk limit.
    #[must_use]
    pub fn with_top_risk_limit(mut self, limit: usize) -> Self {
        self.top_risk_limit = limit;
        self
    }

    /// Sets the forecast horizon in months.
    #[must_use]
    pub fn with_forecast_horizon(mut self, months: u32) -> Self {
        self.forecast_horizon = months;
        self
    }

    /// Sets the anomaly z-score threshold.
    #[must_use]
    pub fn with_anomaly_z_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_z_threshold = threshold;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PortfolioError::InvalidThresholds` if the thresholds are
    /// invalid or the anomaly threshold is not positive.
    pub fn validate(&self) -> PortfolioResult<()> {
        self.thresholds.validate()?;

        if !self.anomaly_z_threshold.is_finite() || self.anomaly_z_threshold <= 0.0 {
            return Err(PortfolioError::invalid_thresholds(
                "anomaly_z_threshold must be positive",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.thresholds.spi_at_risk, 0.90);
        assert_eq!(config.thresholds.cpi_at_risk, 0.90);
        assert_eq!(config.forecast_horizon, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_critical_cutoffs() {
        let thresholds = RiskThresholds::default();
        assert!((thresholds.spi_critical() - 0.80).abs() < 1e-12);
        assert!((thresholds.cpi_critical() - 0.80).abs() < 1e-12);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AnalyticsConfig::new()
            .with_thresholds(
                RiskThresholds::new()
                    .with_spi_at_risk(0.95)
                    .with_critical_margin(0.05),
            )
            .with_attention_limit(25)
            .with_forecast_horizon(6);

        assert_eq!(config.thresholds.spi_at_risk, 0.95);
        assert_eq!(config.attention_limit, 25);
        assert_eq!(config.forecast_horizon, 6);
    }

    #[test]
    fn test_validation_rejects_bad_thresholds() {
        assert!(RiskThresholds::new()
            .with_spi_at_risk(0.0)
            .validate()
            .is_err());
        assert!(RiskThresholds::new()
            .with_critical_margin(-0.1)
            .validate()
            .is_err());
        assert!(RiskThresholds::new()
            .with_critical_margin(0.95)
            .validate()
            .is_err());
        assert!(RiskThresholds::new()
            .with_cpi_at_risk(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AnalyticsConfig::new().with_attention_limit(7);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AnalyticsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
