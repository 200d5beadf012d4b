//! Rule-based textual insights.
//!
//! Turns computed figures into the short findings a dashboard lists next to
//! its charts. Purely deterministic rules over KPIs, per-project metrics,
//! and risk exposure - no model inference.

use crate::analytics::{PortfolioKpis, ProjectMetrics, RiskExposure};
use crate::types::AnalyticsConfig;
use pulse_core::evm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InsightSeverity {
    /// Informational; no action implied.
    Info,
    /// Worth management attention.
    Warning,
    /// Requires intervention.
    Critical,
}

impl InsightSeverity {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// One textual finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// Finding severity.
    pub severity: InsightSeverity,

    /// Human-readable statement.
    pub message: String,
}

impl Insight {
    fn info(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Info,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Warning,
            message: message.into(),
        }
    }

    fn critical(message: impl Into<String>) -> Self {
        Self {
            severity: InsightSeverity::Critical,
            message: message.into(),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity.name(), self.message)
    }
}

/// Generates portfolio-level insights.
///
/// Always returns at least one insight; a clean portfolio gets an explicit
/// no-findings statement.
#[must_use]
pub fn portfolio_insights(
    kpis: &PortfolioKpis,
    metrics: &[ProjectMetrics],
    exposure: &RiskExposure,
    config: &AnalyticsConfig,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let flagged = kpis.flagged_projects();
    if flagged > 0 && kpis.project_count > 0 {
        let share = flagged as f64 / kpis.project_count as f64 * 100.0;
        insights.push(Insight::warning(format!(
            "{flagged} projects ({share:.1}%) are at risk or critical and may require intervention."
        )));
    }

    if let Some(avg_spi) = kpis.avg_spi {
        if avg_spi < config.thresholds.spi_at_risk {
            insights.push(Insight::warning(format!(
                "Portfolio is generally behind schedule (SPI = {avg_spi:.2}). \
                 Resource allocation should be reviewed."
            )));
        } else if avg_spi > 1.05 {
            insights.push(Insight::info(format!(
                "Portfolio is ahead of schedule (SPI = {avg_spi:.2}), \
                 indicating effective schedule management."
            )));
        }
    }

    if let Some(avg_cpi) = kpis.avg_cpi {
        if avg_cpi < config.thresholds.cpi_at_risk {
            insights.push(Insight::warning(format!(
                "Portfolio is over budget (CPI = {avg_cpi:.2}). \
                 Cost control measures should be reinforced."
            )));
        } else if avg_cpi > 1.05 {
            insights.push(Insight::info(format!(
                "Portfolio is under budget (CPI = {avg_cpi:.2}), \
                 demonstrating effective cost management."
            )));
        }
    }

    let critical_spi = config.thresholds.spi_critical();
    let critical_count = metrics
        .iter()
        .filter(|m| m.spi.is_some_and(|v| v < critical_spi))
        .count();
    if critical_count > 0 {
        insights.push(Insight::critical(format!(
            "{critical_count} projects have critical schedule performance \
             (SPI < {critical_spi:.2}) requiring immediate attention."
        )));
    }

    if let Some(pct) = exposure.exposure_pct_of_budget {
        if exposure.exceeds_limit(config) {
            insights.push(Insight::warning(format!(
                "Risk exposure is {pct:.1}% of portfolio budget - above the \
                 recommended limit of {:.0}%.",
                config.exposure_budget_limit_pct
            )));
        } else if exposure.total_exposure > rust_decimal::Decimal::ZERO {
            insights.push(Insight::info(format!(
                "Financial exposure from identified risks is {pct:.1}% of portfolio budget."
            )));
        }
    }

    if insights.is_empty() {
        insights.push(Insight::info(
            "No significant patterns or issues identified in the current project data.",
        ));
    }

    insights
}

/// Generates insights for a single project.
#[must_use]
pub fn project_insights(metrics: &ProjectMetrics, config: &AnalyticsConfig) -> Vec<Insight> {
    let mut insights = Vec::new();
    let thresholds = &config.thresholds;

    if let Some(spi) = metrics.spi {
        if spi < thresholds.spi_critical() {
            insights.push(Insight::critical(format!(
                "Project is significantly behind schedule (SPI = {spi:.2}), \
                 which may impact delivery milestones."
            )));
        } else if spi < thresholds.spi_at_risk {
            insights.push(Insight::warning(format!(
                "Project is slightly behind schedule (SPI = {spi:.2}). \
                 Close monitoring recommended."
            )));
        } else if spi > 1.1 {
            insights.push(Insight::info(format!(
                "Project is ahead of schedule (SPI = {spi:.2}), \
                 potentially allowing for early delivery."
            )));
        }
    }

    if let Some(cpi) = metrics.cpi {
        if cpi < thresholds.cpi_critical() {
            insights.push(Insight::critical(format!(
                "Project is significantly over budget (CPI = {cpi:.2}). \
                 Budget controls should be reviewed."
            )));
        } else if cpi < thresholds.cpi_at_risk {
            insights.push(Insight::warning(format!(
                "Project is slightly over budget (CPI = {cpi:.2}). \
                 Cost management attention required."
            )));
        } else if cpi > 1.1 {
            insights.push(Insight::info(format!(
                "Project is under budget (CPI = {cpi:.2}), \
                 showing strong cost management."
            )));
        }
    }

    if let (Some(spi), Some(cpi)) = (metrics.spi, metrics.cpi) {
        if spi < thresholds.spi_at_risk && cpi < thresholds.cpi_at_risk {
            insights.push(Insight::critical(
                "Project is at high risk due to both schedule delays and cost overruns.",
            ));
        } else if spi > 1.05 && cpi > 1.05 {
            insights.push(Insight::info(
                "Project is performing exceptionally well in both schedule and cost dimensions.",
            ));
        }
    }

    if metrics.spi.is_none() || metrics.cpi.is_none() {
        insights.push(Insight::info(format!(
            "Performance indices are incomplete (SPI: {}, CPI: {}).",
            evm::format_ratio(metrics.spi),
            evm::format_ratio(metrics.cpi),
        )));
    }

    if insights.is_empty() {
        insights.push(Insight::info(
            "No significant patterns detected in the project data.",
        ));
    }

    insights
}
