//! Risk-register entries.

use crate::{PortfolioError, PortfolioResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a registered risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RiskCategory {
    /// Shortage of key personnel or equipment.
    ResourceAvailability,
    /// Client or stakeholder scope changes.
    ScopeChanges,
    /// Technical or integration challenges.
    TechnicalIssues,
    /// Regulatory, market, or weather factors.
    ExternalFactors,
    /// Funding or budget restrictions.
    BudgetConstraints,
    /// Deliverable quality shortfalls.
    QualityIssues,
    /// Stakeholder misalignment.
    CommunicationIssues,
    /// Other or unclassified.
    #[default]
    Other,
}

impl RiskCategory {
    /// Returns all categories in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::ResourceAvailability,
            Self::ScopeChanges,
            Self::TechnicalIssues,
            Self::ExternalFactors,
            Self::BudgetConstraints,
            Self::QualityIssues,
            Self::CommunicationIssues,
            Self::Other,
        ]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ResourceAvailability => "Resource Availability",
            Self::ScopeChanges => "Scope Changes",
            Self::TechnicalIssues => "Technical Issues",
            Self::ExternalFactors => "External Factors",
            Self::BudgetConstraints => "Budget Constraints",
            Self::QualityIssues => "Quality Issues",
            Self::CommunicationIssues => "Communication Issues",
            Self::Other => "Other",
        }
    }
}

impl FromStr for RiskCategory {
    type Err = std::convert::Infallible;

    /// Parses a category name; anything unrecognized becomes `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        Ok(match normalized.as_str() {
            "resourceavailability" | "resources" => Self::ResourceAvailability,
            "scopechanges" | "scope" => Self::ScopeChanges,
            "technicalissues" | "technical" => Self::TechnicalIssues,
            "externalfactors" | "external" => Self::ExternalFactors,
            "budgetconstraints" | "budget" => Self::BudgetConstraints,
            "qualityissues" | "quality" => Self::QualityIssues,
            "communicationissues" | "communication" => Self::CommunicationIssues,
            _ => Self::Other,
        })
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Workflow status of a registered risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    /// Identified and unaddressed.
    Active,
    /// Mitigation in progress.
    Mitigating,
    /// Being watched, no action underway.
    Monitoring,
    /// Resolved or retired.
    Closed,
}

impl RiskStatus {
    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Mitigating => "Mitigating",
            Self::Monitoring => "Monitoring",
            Self::Closed => "Closed",
        }
    }

    /// Returns true unless the risk has been closed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl FromStr for RiskStatus {
    type Err = PortfolioError;

    fn from_str(s: &str) -> PortfolioResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "mitigating" => Ok(Self::Mitigating),
            "monitoring" => Ok(Self::Monitoring),
            "closed" => Ok(Self::Closed),
            _ => Err(PortfolioError::invalid_risk(
                s,
                "unknown risk status",
            )),
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a project's risk register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskEntry {
    /// Unique identifier for this risk.
    pub id: String,

    /// The project this risk is registered against.
    pub project_id: String,

    /// Short risk name.
    pub name: String,

    /// Risk category.
    pub category: RiskCategory,

    /// Probability of occurrence (0-1).
    pub probability: f64,

    /// Cost impact if the risk materializes.
    pub impact_cost: Decimal,

    /// Workflow status.
    pub status: RiskStatus,
}

impl RiskEntry {
    /// Creates a new risk entry with validated probability and impact.
    ///
    /// # Errors
    ///
    /// Returns an error if the probability is outside 0-1 or the impact
    /// cost is negative.
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        name: impl Into<String>,
        category: RiskCategory,
        probability: f64,
        impact_cost: Decimal,
    ) -> PortfolioResult<Self> {
        let id = id.into();

        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(PortfolioError::invalid_risk(
                &id,
                format!("probability must be within 0-1, got {probability}"),
            ));
        }
        if impact_cost < Decimal::ZERO {
            return Err(PortfolioError::invalid_risk(
                &id,
                "impact_cost cannot be negative",
            ));
        }

        Ok(Self {
            id,
            project_id: project_id.into(),
            name: name.into(),
            category,
            probability,
            impact_cost,
            status: RiskStatus::Active,
        })
    }

    /// Sets the workflow status.
    #[must_use]
    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = status;
        self
    }

    /// Expected cost exposure: probability × impact.
    #[must_use]
    pub fn exposure(&self) -> Decimal {
        let probability = Decimal::from_f64_retain(self.probability).unwrap_or(Decimal::ZERO);
        self.impact_cost * probability
    }

    /// Normalized risk score (0-1) against the owning project's budget:
    /// `min(1, probability × impact-fraction × 20)`.
    ///
    /// Undefined when the budget is unknown or not positive.
    #[must_use]
    pub fn score(&self, project_budget: Decimal) -> Option<f64> {
        if project_budget <= Decimal::ZERO {
            return None;
        }
        let impact_fraction = (self.impact_cost / project_budget).to_f64()?;
        Some((self.probability * impact_fraction * 20.0).min(1.0))
    }
}
