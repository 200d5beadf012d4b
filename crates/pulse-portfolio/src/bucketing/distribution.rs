//! Budget-weighted portfolio distributions.

use super::classify_record;
use crate::types::{AnalyticsConfig, ProjectRecord};
use crate::PortfolioSnapshot;
use pulse_core::{ProjectStatus, RiskBucket, Sector};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregated metrics for a bucket of projects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BucketMetrics {
    /// Number of projects in this bucket.
    pub count: usize,

    /// Total budget at completion in this bucket.
    pub total_budget: Decimal,

    /// Budget share as a percentage of the portfolio total (0-100).
    pub weight_pct: f64,

    /// Budget-weighted average SPI (if any member has one).
    pub avg_spi: Option<f64>,

    /// Budget-weighted average CPI (if any member has one).
    pub avg_cpi: Option<f64>,

    /// Total expected risk exposure registered against this bucket.
    pub total_exposure: Decimal,
}

impl BucketMetrics {
    /// Creates new empty metrics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Distribution of projects by derived risk bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskDistribution {
    /// Metrics by bucket.
    pub by_bucket: HashMap<RiskBucket, BucketMetrics>,

    /// Total portfolio budget.
    pub total_budget: Decimal,
}

impl RiskDistribution {
    /// Returns metrics for a specific bucket.
    #[must_use]
    pub fn get(&self, bucket: RiskBucket) -> Option<&BucketMetrics> {
        self.by_bucket.get(&bucket)
    }

    /// Returns the budget weight of flagged projects (at risk + critical).
    #[must_use]
    pub fn flagged_weight(&self) -> f64 {
        [RiskBucket::AtRisk, RiskBucket::Critical]
            .iter()
            .filter_map(|b| self.by_bucket.get(b))
            .map(|m| m.weight_pct)
            .sum()
    }

    /// Returns the number of flagged projects.
    #[must_use]
    pub fn flagged_count(&self) -> usize {
        [RiskBucket::AtRisk, RiskBucket::Critical]
            .iter()
            .filter_map(|b| self.by_bucket.get(b))
            .map(|m| m.count)
            .sum()
    }

    /// Returns all buckets with metrics, healthiest first.
    #[must_use]
    pub fn sorted_by_severity(&self) -> Vec<(RiskBucket, &BucketMetrics)> {
        let mut result: Vec<_> = self.by_bucket.iter().map(|(b, m)| (*b, m)).collect();
        result.sort_by_key(|(b, _)| *b);
        result
    }
}

/// Distribution of projects by sector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectorDistribution {
    /// Metrics by sector.
    pub by_sector: HashMap<Sector, BucketMetrics>,

    /// Total portfolio budget.
    pub total_budget: Decimal,
}

impl SectorDistribution {
    /// Returns metrics for a specific sector.
    #[must_use]
    pub fn get(&self, sector: Sector) -> Option<&BucketMetrics> {
        self.by_sector.get(&sector)
    }

    /// Returns all sectors with their metrics, sorted by weight descending.
    #[must_use]
    pub fn sorted_by_weight(&self) -> Vec<(Sector, &BucketMetrics)> {
        let mut result: Vec<_> = self.by_sector.iter().map(|(s, m)| (*s, m)).collect();
        result.sort_by(|a, b| {
            b.1.weight_pct
                .partial_cmp(&a.1.weight_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        result
    }
}

/// Distribution of projects by reported status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusDistribution {
    /// Metrics by reported status.
    pub by_status: HashMap<ProjectStatus, BucketMetrics>,

    /// Total portfolio budget.
    pub total_budget: Decimal,
}

impl StatusDistribution {
    /// Returns metrics for a specific status.
    #[must_use]
    pub fn get(&self, status: ProjectStatus) -> Option<&BucketMetrics> {
        self.by_status.get(&status)
    }

    /// Returns the budget weight of projects whose reported status signals
    /// trouble.
    #[must_use]
    pub fn troubled_weight(&self) -> f64 {
        self.by_status
            .iter()
            .filter(|(s, _)| s.is_troubled())
            .map(|(_, m)| m.weight_pct)
            .sum()
    }
}

/// Buckets projects by derived risk classification.
#[must_use]
pub fn bucket_by_risk(snapshot: &PortfolioSnapshot, config: &AnalyticsConfig) -> RiskDistribution {
    let groups = group_records(snapshot, |r| classify_record(r, &config.thresholds));
    let total_budget = snapshot.total_budget();

    RiskDistribution {
        by_bucket: aggregate_groups(snapshot, groups, total_budget),
        total_budget,
    }
}

/// Buckets projects by sector.
#[must_use]
pub fn bucket_by_sector(
    snapshot: &PortfolioSnapshot,
    _config: &AnalyticsConfig,
) -> SectorDistribution {
    let groups = group_records(snapshot, |r| r.sector);
    let total_budget = snapshot.total_budget();

    SectorDistribution {
        by_sector: aggregate_groups(snapshot, groups, total_budget),
        total_budget,
    }
}

/// Buckets projects by reported status.
#[must_use]
pub fn bucket_by_status(
    snapshot: &PortfolioSnapshot,
    _config: &AnalyticsConfig,
) -> StatusDistribution {
    let groups = group_records(snapshot, |r| r.status);
    let total_budget = snapshot.total_budget();

    StatusDistribution {
        by_status: aggregate_groups(snapshot, groups, total_budget),
        total_budget,
    }
}

/// Groups record indices by a key function.
fn group_records<K, F>(snapshot: &PortfolioSnapshot, key: F) -> HashMap<K, Vec<usize>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&ProjectRecord) -> K,
{
    let mut grouped: HashMap<K, Vec<usize>> = HashMap::new();
    for (i, record) in snapshot.records.iter().enumerate() {
        grouped.entry(key(record)).or_default().push(i);
    }
    grouped
}

/// Aggregates metrics for each group of record indices.
fn aggregate_groups<K>(
    snapshot: &PortfolioSnapshot,
    groups: HashMap<K, Vec<usize>>,
    total_budget: Decimal,
) -> HashMap<K, BucketMetrics>
where
    K: std::hash::Hash + Eq,
{
    groups
        .into_iter()
        .map(|(key, indices)| {
            let members: Vec<&ProjectRecord> =
                indices.iter().map(|&i| &snapshot.records[i]).collect();
            (key, aggregate_bucket_metrics(snapshot, &members, total_budget))
        })
        .collect()
}

/// Aggregates metrics for a bucket of records.
pub(crate) fn aggregate_bucket_metrics(
    snapshot: &PortfolioSnapshot,
    records: &[&ProjectRecord],
    total_budget: Decimal,
) -> BucketMetrics {
    if records.is_empty() {
        return BucketMetrics::default();
    }

    let count = records.len();
    let bucket_budget: Decimal = records.iter().map(|r| r.budget).sum();

    let weight_pct = if total_budget.is_zero() {
        0.0
    } else {
        (bucket_budget / total_budget * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    };

    let (avg_spi, avg_cpi) = budget_weighted_indices(records);

    let member_ids: std::collections::HashSet<&str> =
        records.iter().map(|r| r.id.as_str()).collect();
    let total_exposure = snapshot
        .risks
        .iter()
        .filter(|risk| member_ids.contains(risk.project_id.as_str()))
        .map(|risk| risk.exposure())
        .sum();

    BucketMetrics {
        count,
        total_budget: bucket_budget,
        weight_pct,
        avg_spi,
        avg_cpi,
        total_exposure,
    }
}

/// Budget-weighted average SPI and CPI over records with defined indices.
fn budget_weighted_indices(records: &[&ProjectRecord]) -> (Option<f64>, Option<f64>) {
    let mut spi_sum = 0.0;
    let mut spi_weight = 0.0;
    let mut cpi_sum = 0.0;
    let mut cpi_weight = 0.0;

    for record in records {
        let weight = record.budget.to_f64().unwrap_or(0.0);

        if let Some(spi) = record.spi() {
            spi_sum += spi * weight;
            spi_weight += weight;
        }

        if let Some(cpi) = record.cpi() {
            cpi_sum += cpi * weight;
            cpi_weight += weight;
        }
    }

    let avg_spi = if spi_weight > 0.0 {
        Some(spi_sum / spi_weight)
    } else {
        None
    };
    let avg_cpi = if cpi_weight > 0.0 {
        Some(cpi_sum / cpi_weight)
    } else {
        None
    };

    (avg_spi, avg_cpi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, sector: Sector, budget: Decimal, spi: f64) -> ProjectRecord {
        // planned 100; EV scaled to hit the requested SPI; AC equal to EV
        // keeps CPI at 1.0.
        let ev = Decimal::from_f64_retain(spi * 100.0).unwrap();
        ProjectRecord::builder()
            .id(id)
            .name(format!("Project {id}"))
            .sector(sector)
            .budget(budget)
            .planned_cost(dec!(100))
            .actual_cost(ev)
            .earned_value(ev)
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
    fn test_empty_snapshot() {
        let dist = bucket_by_risk(&snapshot(vec![]), &AnalyticsConfig::default());
        assert!(dist.by_bucket.is_empty());
        assert!(dist.total_budget.is_zero());
        assert_eq!(dist.flagged_count(), 0);
    }

    #[test]
    fn test_risk_distribution() {
        let config = AnalyticsConfig::default();
        let dist = bucket_by_risk(
            &snapshot(vec![
                record("P1", Sector::Water, dec!(100), 1.0),
                record("P2", Sector::Water, dec!(100), 0.85),
                record("P3", Sector::Water, dec!(100), 0.70),
            ]),
            &config,
        );

        assert_eq!(dist.get(RiskBucket::OnTrack).unwrap().count, 1);
        assert_eq!(dist.get(RiskBucket::AtRisk).unwrap().count, 1);
        assert_eq!(dist.get(RiskBucket::Critical).unwrap().count, 1);
        assert_eq!(dist.flagged_count(), 2);
        assert!((dist.flagged_weight() - 66.67).abs() < 0.1);
    }

    #[test]
    fn test_sector_distribution_weights_sum_to_100() {
        let config = AnalyticsConfig::default();
        let dist = bucket_by_sector(
            &snapshot(vec![
                record("P1", Sector::Water, dec!(200), 1.0),
                record("P2", Sector::Buildings, dec!(100), 1.0),
                record("P3", Sector::Buildings, dec!(100), 1.0),
            ]),
            &config,
        );

        let total: f64 = dist.by_sector.values().map(|m| m.weight_pct).sum();
        assert!((total - 100.0).abs() < 0.01);

        let sorted = dist.sorted_by_weight();
        assert_eq!(sorted[0].0, Sector::Water);
    }

    #[test]
    fn test_bucket_metrics_aggregation() {
        let config = AnalyticsConfig::default();
        let dist = bucket_by_status(
            &snapshot(vec![
                record("P1", Sector::Water, dec!(100), 1.0),
                record("P2", Sector::Water, dec!(300), 0.96),
            ]),
            &config,
        );

        let on_track = dist.get(pulse_core::ProjectStatus::OnTrack).unwrap();
        assert_eq!(on_track.count, 2);
        assert_eq!(on_track.total_budget, dec!(400));

        // Budget-weighted: (1.0*100 + 0.96*300) / 400 = 0.97
        let avg_spi = on_track.avg_spi.unwrap();
        assert!((avg_spi - 0.97).abs() < 1e-9);
    }
}
