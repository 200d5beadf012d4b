//! Risk-register exposure rollups.

use crate::types::{AnalyticsConfig, RiskCategory, RiskEntry};
use crate::PortfolioSnapshot;
use pulse_core::evm;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A register entry ranked by its normalized score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedRisk {
    /// The register entry.
    pub risk: RiskEntry,

    /// Normalized score (0-1) against the owning project's budget.
    pub score: f64,
}

/// Aggregated risk-register figures for a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskExposure {
    /// Total expected exposure (probability × impact) across the register.
    pub total_exposure: Decimal,

    /// Exposure as a percentage of total portfolio budget.
    pub exposure_pct_of_budget: Option<f64>,

    /// Expected exposure by risk category.
    pub by_category: HashMap<RiskCategory, Decimal>,

    /// Register entries not yet closed.
    pub open_risks: usize,

    /// Open entries whose score reaches the configured high-risk cutoff.
    pub high_risks: usize,

    /// Mean score over entries with a scoreable project budget.
    pub average_score: Option<f64>,

    /// Highest-scoring entries, most severe first.
    pub top_risks: Vec<RankedRisk>,
}

impl RiskExposure {
    /// Calculates the register rollup for a snapshot.
    ///
    /// Entries referencing projects missing from the snapshot contribute to
    /// exposure totals but cannot be scored (no budget to normalize by).
    #[must_use]
    pub fn calculate(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> Self {
        let total_exposure = snapshot.total_risk_exposure();
        let total_budget = snapshot.total_budget();

        let mut by_category: HashMap<RiskCategory, Decimal> = HashMap::new();
        let mut open_risks = 0;
        let mut high_risks = 0;
        let mut scores = Vec::new();
        let mut ranked = Vec::new();

        for risk in &snapshot.risks {
            *by_category.entry(risk.category).or_default() += risk.exposure();

            if risk.status.is_open() {
                open_risks += 1;
            }

            let budget = snapshot
                .record(&risk.project_id)
                .map(|r| r.budget)
                .unwrap_or(Decimal::ZERO);

            if let Some(score) = risk.score(budget) {
                scores.push(score);
                if risk.status.is_open() && score >= config.high_risk_score {
                    high_risks += 1;
                }
                ranked.push(RankedRisk {
                    risk: risk.clone(),
                    score,
                });
            }
        }

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(config.top_risk_limit);

        let average_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            total_exposure,
            exposure_pct_of_budget: evm::percent_of_budget(total_exposure, total_budget),
            by_category,
            open_risks,
            high_risks,
            average_score,
            top_risks: ranked,
        }
    }

    /// Returns true if exposure exceeds the configured budget limit.
    #[must_use]
    pub fn exceeds_limit(&self, config: &AnalyticsConfig) -> bool {
        self.exposure_pct_of_budget
            .is_some_and(|pct| pct > config.exposure_budget_limit_pct)
    }
}

/// Convenience function to calculate the register rollup.
#[must_use]
pub fn calculate_risk_exposure(
    snapshot: &PortfolioSnapshot,
    config: &AnalyticsConfig,
) -> RiskExposure {
    RiskExposure::calculate(snapshot, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProjectRecord, RiskStatus};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, budget: Decimal) -> ProjectRecord {
        ProjectRecord::builder()
            .id(id)
            .name(format!("Project {id}"))
            .budget(budget)
            .start_date(date(2025, 1, 1))
            .planned_end_date(date(2025, 12, 31))
            .build()
            .unwrap()
    }

    fn risk(id: &str, project: &str, category: RiskCategory, prob: f64, impact: Decimal) -> RiskEntry {
        RiskEntry::new(id, project, format!("Risk {id}"), category, prob, impact).unwrap()
    }

    fn create_test_snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot::builder(date(2025, 6, 30))
            .add_record(record("P001", dec!(1_000_000)))
            .add_risks(vec![
                // exposure 40k, score 0.4 * 0.1 * 20 = 0.8
                risk(
                    "R001",
                    "P001",
                    RiskCategory::ExternalFactors,
                    0.4,
                    dec!(100_000),
                ),
                // exposure 5k, score 0.5 * 0.01 * 20 = 0.1
                risk(
                    "R002",
                    "P001",
                    RiskCategory::TechnicalIssues,
                    0.5,
                    dec!(10_000),
                ),
                // closed: still counts toward exposure, not open/high
                risk(
                    "R003",
                    "P001",
                    RiskCategory::ExternalFactors,
                    0.9,
                    dec!(50_000),
                )
                .with_status(RiskStatus::Closed),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_totals() {
        let snapshot = create_test_snapshot();
        let exposure = RiskExposure::calculate(&snapshot, &AnalyticsConfig::default());

        // 40k + 5k + 45k
        assert_eq!(exposure.total_exposure, dec!(90_000));
        assert_eq!(exposure.open_risks, 2);
        // R001 (0.8) and R003 (0.9) reach 0.6, but R003 is closed.
        assert_eq!(exposure.high_risks, 1);
        assert!((exposure.exposure_pct_of_budget.unwrap() - 9.0).abs() < 1e-9);
        assert!(!exposure.exceeds_limit(&AnalyticsConfig::default()));
    }

    #[test]
    fn test_by_category() {
        let snapshot = create_test_snapshot();
        let exposure = RiskExposure::calculate(&snapshot, &AnalyticsConfig::default());

        assert_eq!(
            exposure.by_category[&RiskCategory::ExternalFactors],
            dec!(85_000)
        );
        assert_eq!(
            exposure.by_category[&RiskCategory::TechnicalIssues],
            dec!(5_000)
        );
    }

    #[test]
    fn test_top_risks_sorted() {
        let snapshot = create_test_snapshot();
        let exposure = RiskExposure::calculate(&snapshot, &AnalyticsConfig::default());

        assert_eq!(exposure.top_risks.len(), 3);
        assert_eq!(exposure.top_risks[0].risk.id, "R003");
        assert!(exposure.top_risks[0].score >= exposure.top_risks[1].score);
        assert_eq!(exposure.top_risks[2].risk.id, "R002");
    }

    #[test]
    fn test_limit_flag() {
        let snapshot = PortfolioSnapshot::builder(date(2025, 6, 30))
            .add_record(record("P001", dec!(100_000)))
            .add_risk(risk(
                "R001",
                "P001",
                RiskCategory::BudgetConstraints,
                0.8,
                dec!(50_000),
            ))
            .build()
            .unwrap();

        // Exposure 40k on a 100k budget: 40% > 15% limit.
        let exposure = RiskExposure::calculate(&snapshot, &AnalyticsConfig::default());
        assert!(exposure.exceeds_limit(&AnalyticsConfig::default()));
    }

    #[test]
    fn test_empty_register() {
        let snapshot = PortfolioSnapshot::builder(date(2025, 6, 30))
            .add_record(record("P001", dec!(1_000_000)))
            .build()
            .unwrap();

        let exposure = RiskExposure::calculate(&snapshot, &AnalyticsConfig::default());
        assert_eq!(exposure.total_exposure, Decimal::ZERO);
        assert_eq!(exposure.average_score, None);
        assert!(exposure.top_risks.is_empty());
    }
}
