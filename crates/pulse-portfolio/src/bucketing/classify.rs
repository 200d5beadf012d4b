//! Threshold-based risk classification.

use crate::types::{ProjectRecord, RiskThresholds};
use pulse_core::{ProjectStatus, RiskBucket};

/// Classifies a project from its performance indices and reported status.
///
/// Rules, applied in severity order:
///
/// - Completed projects are on track.
/// - A defined index below its critical cutoff (threshold minus margin)
///   classifies the project critical.
/// - A defined index below its threshold classifies it at least at risk.
/// - The reported status acts as a floor: a project reported critical is
///   never classified below critical, regardless of indices.
/// - With both indices undefined, the reported status maps directly.
///
/// Classification is monotone in the thresholds: for thresholds `t1 <= t2`
/// the set of flagged projects under `t1` is a subset of the set under
/// `t2`.
#[must_use]
pub fn classify(
    spi: Option<f64>,
    cpi: Option<f64>,
    status: ProjectStatus,
    thresholds: &RiskThresholds,
) -> RiskBucket {
    if status == ProjectStatus::Complete {
        return RiskBucket::OnTrack;
    }

    let mut bucket = status.implied_bucket();

    for (index, at_risk, critical) in [
        (spi, thresholds.spi_at_risk, thresholds.spi_critical()),
        (cpi, thresholds.cpi_at_risk, thresholds.cpi_critical()),
    ] {
        if let Some(value) = index {
            if value < critical {
                bucket = bucket.at_least(RiskBucket::Critical);
            } else if value < at_risk {
                bucket = bucket.at_least(RiskBucket::AtRisk);
            }
        }
    }

    bucket
}

/// Classifies a record from its own earned-value figures.
#[must_use]
pub fn classify_record(record: &ProjectRecord, thresholds: &RiskThresholds) -> RiskBucket {
    classify(record.spi(), record.cpi(), record.status, thresholds)
}
