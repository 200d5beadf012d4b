//! Statistical anomaly detection across the portfolio.

use crate::analytics::ProjectMetrics;
use serde::{Deserialize, Serialize};

/// Minimum projects required for meaningful standardization.
const MIN_PROJECTS: usize = 3;

/// Anomaly assessment for one project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyFlag {
    /// The project assessed.
    pub project_id: String,

    /// Mean absolute z-score across the metric features.
    pub score: f64,

    /// True when the score exceeds the configured threshold.
    pub is_anomaly: bool,
}

/// Flags projects whose metrics sit far from the portfolio norm.
///
/// Standardizes each feature (SPI, CPI, percent spent, schedule progress)
/// across the portfolio and scores each project by its mean absolute
/// z-score; an undefined feature contributes zero, the same as sitting on
/// the mean. Returns an empty list when fewer than three projects are
/// available - there is no norm to deviate from.
#[must_use]
pub fn detect_anomalies(metrics: &[ProjectMetrics], z_threshold: f64) -> Vec<AnomalyFlag> {
    if metrics.len() < MIN_PROJECTS {
        return Vec::new();
    }

    let features: Vec<Vec<Option<f64>>> = metrics
        .iter()
        .map(|m| {
            vec![
                m.spi,
                m.cpi,
                m.percent_spent,
                m.schedule_progress_pct,
            ]
        })
        .collect();

    let feature_count = features[0].len();
    let mut stats = Vec::with_capacity(feature_count);
    for feature in 0..feature_count {
        let values: Vec<f64> = features.iter().filter_map(|row| row[feature]).collect();
        stats.push(mean_and_std(&values));
    }

    metrics
        .iter()
        .zip(&features)
        .map(|(m, row)| {
            let mut z_sum = 0.0;
            for (feature, value) in row.iter().enumerate() {
                if let (Some(v), Some((mean, std))) = (value, stats[feature]) {
                    if std > 0.0 {
                        z_sum += ((v - mean) / std).abs();
                    }
                }
            }
            let score = z_sum / feature_count as f64;

            AnomalyFlag {
                project_id: m.project_id.clone(),
                score,
                is_anomaly: score > z_threshold,
            }
        })
        .collect()
}

/// Mean and population standard deviation, `None` for empty input.
fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}
