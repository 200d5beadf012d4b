//! Project status and derived risk classification.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Reported delivery status of a project.
///
/// This is the status as recorded in the source system for the reporting
/// period. It is an input; the classification *derived* from performance
/// indices is [`RiskBucket`].
///
/// # Examples
///
/// ```
/// use pulse_core::types::ProjectStatus;
///
/// let status: ProjectStatus = "At Risk".parse().unwrap();
/// assert_eq!(status, ProjectStatus::AtRisk);
/// assert!(status.is_active());
/// assert!(status.is_troubled());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Delivering to plan.
    OnTrack,
    /// Behind plan; intervention may be needed.
    AtRisk,
    /// Severely behind plan; intervention required.
    Critical,
    /// Delivered and closed.
    Complete,
}

impl ProjectStatus {
    /// Returns all statuses in a standard order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::OnTrack, Self::AtRisk, Self::Critical, Self::Complete]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
            Self::Complete => "Complete",
        }
    }

    /// Returns a short code for the status.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::OnTrack => "OT",
            Self::AtRisk => "AR",
            Self::Critical => "CR",
            Self::Complete => "DONE",
        }
    }

    /// Returns true if the project is still in delivery.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Complete)
    }

    /// Returns true if the reported status itself signals trouble.
    #[must_use]
    pub fn is_troubled(&self) -> bool {
        matches!(self, Self::AtRisk | Self::Critical)
    }

    /// Returns the risk bucket implied by the reported status alone.
    ///
    /// Used as a floor for classification and as the fallback when no
    /// performance index is defined.
    #[must_use]
    pub fn implied_bucket(&self) -> RiskBucket {
        match self {
            Self::OnTrack | Self::Complete => RiskBucket::OnTrack,
            Self::AtRisk => RiskBucket::AtRisk,
            Self::Critical => RiskBucket::Critical,
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    /// Parses a status name or code, ignoring case, spaces, hyphens, and
    /// underscores ("On Track", "on-track", "AT_RISK", "done", ...).
    fn from_str(s: &str) -> CoreResult<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "ontrack" | "ot" => Ok(Self::OnTrack),
            "atrisk" | "ar" => Ok(Self::AtRisk),
            "critical" | "cr" => Ok(Self::Critical),
            "complete" | "completed" | "done" => Ok(Self::Complete),
            _ => Err(CoreError::invalid_status(s)),
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived risk classification of a project.
///
/// Computed from performance indices against configurable thresholds, with
/// the reported status acting as a floor. Ordered from healthiest to most
/// severe, so `max` combines evidence from several rules.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RiskBucket {
    /// No threshold breached.
    #[default]
    OnTrack,
    /// At least one index below its threshold.
    AtRisk,
    /// At least one index below the critical cutoff.
    Critical,
}

impl RiskBucket {
    /// Returns all buckets from healthiest to most severe.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::OnTrack, Self::AtRisk, Self::Critical]
    }

    /// Returns a human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::OnTrack => "On Track",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }

    /// Returns true if this bucket is flagged (anything but on-track).
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        !matches!(self, Self::OnTrack)
    }

    /// Returns the more severe of the two buckets.
    #[must_use]
    pub fn at_least(self, floor: Self) -> Self {
        self.max(floor)
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "On Track".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::OnTrack
        );
        assert_eq!(
            "at-risk".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::AtRisk
        );
        assert_eq!(
            "CRITICAL".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::Critical
        );
        assert_eq!(
            "completed".parse::<ProjectStatus>().unwrap(),
            ProjectStatus::Complete
        );
        assert!("Paused".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(ProjectStatus::OnTrack.is_active());
        assert!(!ProjectStatus::Complete.is_active());
        assert!(ProjectStatus::AtRisk.is_troubled());
        assert!(ProjectStatus::Critical.is_troubled());
        assert!(!ProjectStatus::OnTrack.is_troubled());
    }

    #[test]
    fn test_status_roundtrip_through_name() {
        for status in ProjectStatus::all() {
            let parsed: ProjectStatus = status.name().parse().unwrap();
            assert_eq!(parsed, *status);
        }
    }

    #[test]
    fn test_bucket_ordering() {
        assert!(RiskBucket::OnTrack < RiskBucket::AtRisk);
        assert!(RiskBucket::AtRisk < RiskBucket::Critical);
    }

    #[test]
    fn test_bucket_at_least() {
        assert_eq!(
            RiskBucket::OnTrack.at_least(RiskBucket::AtRisk),
            RiskBucket::AtRisk
        );
        assert_eq!(
            RiskBucket::Critical.at_least(RiskBucket::AtRisk),
            RiskBucket::Critical
        );
    }

    #[test]
    fn test_implied_bucket() {
        assert_eq!(
            ProjectStatus::Complete.implied_bucket(),
            RiskBucket::OnTrack
        );
        assert_eq!(
            ProjectStatus::Critical.implied_bucket(),
            RiskBucket::Critical
        );
    }
}
