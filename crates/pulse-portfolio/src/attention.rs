//! Projects needing management attention.

use crate::analytics::ProjectMetrics;
use crate::types::AnalyticsConfig;
use crate::PortfolioSnapshot;
use pulse_core::{ProjectStatus, RiskBucket};
use serde::{Deserialize, Serialize};

/// One row of the attention list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttentionEntry {
    /// The flagged project.
    pub project_id: String,

    /// Project name.
    pub name: String,

    /// Reported status.
    pub status: ProjectStatus,

    /// Schedule performance index.
    pub spi: Option<f64>,

    /// Cost performance index.
    pub cpi: Option<f64>,

    /// Derived risk classification.
    pub bucket: RiskBucket,

    /// Combined severity score; higher means more urgent.
    pub attention_score: f64,
}

/// Returns the projects needing attention, most urgent first.
///
/// A project is listed when a defined index is below its threshold or its
/// reported status signals trouble. The score combines both indices
/// equally, `0.5 * (1 - SPI) + 0.5 * (1 - CPI)`, with an undefined index
/// contributing the neutral 1.0. The list is truncated to the configured
/// limit.
#[must_use]
pub fn projects_needing_attention(
    snapshot: &PortfolioSnapshot,
    config: &AnalyticsConfig,
) -> Vec<AttentionEntry> {
    let metrics = ProjectMetrics::calculate_all(snapshot, config);

    let mut entries: Vec<AttentionEntry> = metrics
        .into_iter()
        .filter(|m| needs_attention(m, config))
        .map(|m| {
            let spi = m.spi.unwrap_or(1.0);
            let cpi = m.cpi.unwrap_or(1.0);
            AttentionEntry {
                project_id: m.project_id,
                name: m.name,
                status: m.status,
                spi: m.spi,
                cpi: m.cpi,
                bucket: m.bucket,
                attention_score: 0.5 * (1.0 - spi) + 0.5 * (1.0 - cpi),
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.attention_score
            .partial_cmp(&a.attention_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(config.attention_limit);
    entries
}

fn needs_attention(metrics: &ProjectMetrics, config: &AnalyticsConfig) -> bool {
    if !metrics.status.is_active() {
        return false;
    }

    let spi_flagged = metrics
        .spi
        .is_some_and(|v| v < config.thresholds.spi_at_risk);
    let cpi_flagged = metrics
        .cpi
        .is_some_and(|v| v < config.thresholds.cpi_at_risk);

    spi_flagged || cpi_flagged || metrics.status.is_troubled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProjectRecord;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, spi: f64, cpi: f64, status: ProjectStatus) -> ProjectRecord {
        // planned 100 fixes SPI = EV/100; AC chosen to hit the CPI.
        let ev = spi * 100.0;
        let ac = if cpi > 0.0 { ev / cpi } else { 0.0 };
        ProjectRecord::builder()
            .id(id)
            .name(format!("Project {id}"))
            .status(status)
            .budget(dec!(1_000_000))
            .planned_cost(dec!(100))
            .earned_value(Decimal::from_f64_retain(ev).unwrap())
            .actual_cost(Decimal::from_f64_retain(ac).unwrap())
            .start_date(date(2025, 1, 1))
            .planned_end_date(date(2025, 12, 31))
            .build()
            .unwrap()
    }

    fn snapshot(records: Vec<ProjectRecord>) -> PortfolioSnapshot {
        PortfolioSnapshot::builder(date(2025, 6, 30))
            .add_records(records)
            .build()
            .unwrap()
    }

    #[test]
    fn test_flags_below_threshold() {
        let entries = projects_needing_attention(
            &snapshot(vec![
                record("GOOD", 1.0, 1.0, ProjectStatus::OnTrack),
                record("SLOW", 0.85, 1.0, ProjectStatus::OnTrack),
                record("COSTLY", 1.0, 0.85, ProjectStatus::OnTrack),
            ]),
            &AnalyticsConfig::default(),
        );

        let ids: Vec<&str> = entries.iter().map(|e| e.project_id.as_str()).collect();
        assert!(ids.contains(&"SLOW"));
        assert!(ids.contains(&"COSTLY"));
        assert!(!ids.contains(&"GOOD"));
    }

    #[test]
    fn test_troubled_status_flags_despite_good_indices() {
        let entries = projects_needing_attention(
            &snapshot(vec![record("REPORTED", 1.0, 1.0, ProjectStatus::AtRisk)]),
            &AnalyticsConfig::default(),
        );

        assert_eq!(entries.len(), 1);
        // Healthy indices give a non-positive score; it is still listed.
        assert!(entries[0].attention_score <= 0.0);
    }

    #[test]
    fn test_sorted_most_urgent_first() {
        let entries = projects_needing_attention(
            &snapshot(vec![
                record("MILD", 0.88, 0.95, ProjectStatus::OnTrack),
                record("SEVERE", 0.60, 0.70, ProjectStatus::OnTrack),
                record("MODERATE", 0.80, 0.85, ProjectStatus::OnTrack),
            ]),
            &AnalyticsConfig::default(),
        );

        let ids: Vec<&str> = entries.iter().map(|e| e.project_id.as_str()).collect();
        assert_eq!(ids, vec!["SEVERE", "MODERATE", "MILD"]);
        assert!(entries[0].attention_score > entries[1].attention_score);
    }

    #[test]
    fn test_limit_respected() {
        let records: Vec<ProjectRecord> = (0..20)
            .map(|i| record(&format!("P{i:02}"), 0.5, 0.5, ProjectStatus::OnTrack))
            .collect();

        let config = AnalyticsConfig::default().with_attention_limit(5);
        let entries = projects_needing_attention(&snapshot(records), &config);
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_completed_projects_never_listed() {
        let entries = projects_needing_attention(
            &snapshot(vec![record("DONE", 0.5, 0.5, ProjectStatus::Complete)]),
            &AnalyticsConfig::default(),
        );
        assert!(entries.is_empty());
    }
}
