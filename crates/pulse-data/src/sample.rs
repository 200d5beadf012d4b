//! Deterministic sample portfolio generation.
//!
//! Produces a realistic mixed portfolio for demos and tests: troubled
//! projects skew slow and expensive, risk registers grow with reported
//! trouble, and monthly history trends into the final indices. Fully
//! deterministic - the same seed always yields the same snapshot.

use crate::DataResult;
use chrono::{Duration, NaiveDate};
use pulse_core::{GeoPoint, ProjectStatus, ReportingPeriod, Sector};
use pulse_portfolio::{
    PerformancePoint, PortfolioSnapshot, ProjectRecord, RiskCategory, RiskEntry, RiskStatus,
};
use rust_decimal::Decimal;

const SECTORS: [Sector; 6] = [
    Sector::Infrastructure,
    Sector::Buildings,
    Sector::Water,
    Sector::Environment,
    Sector::EnergyTransition,
    Sector::DigitalTransformation,
];

const MANAGERS: [&str; 6] = [
    "Alice Nguyen",
    "Ben Okafor",
    "Carla Mendes",
    "Derek Holt",
    "Esther Kim",
    "Farid Aziz",
];

/// Base coordinates per sector; sites scatter around these hubs.
const SECTOR_HUBS: [(f64, f64); 6] = [
    (40.7128, -74.0060),
    (34.0522, -118.2437),
    (29.7604, -95.3698),
    (47.6062, -122.3321),
    (41.8781, -87.6298),
    (37.7749, -122.4194),
];

/// Configuration for sample snapshot generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Number of projects to generate.
    pub projects: usize,

    /// Base number of risks per project (scaled by status).
    pub risks_per_project: usize,

    /// Months of performance history per project.
    pub history_months: u32,

    /// Seed for the deterministic generator.
    pub seed: u64,

    /// Reporting date of the generated snapshot.
    pub as_of: NaiveDate,
}

impl SampleConfig {
    /// Creates a config with the standard demo portfolio size.
    #[must_use]
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            projects: 40,
            risks_per_project: 7,
            history_months: 12,
            seed: 42,
            as_of,
        }
    }

    /// Sets the project count.
    #[must_use]
    pub fn with_projects(mut self, projects: usize) -> Self {
        self.projects = projects;
        self
    }

    /// Sets the base risks per project.
    #[must_use]
    pub fn with_risks_per_project(mut self, risks: usize) -> Self {
        self.risks_per_project = risks;
        self
    }

    /// Sets the months of history.
    #[must_use]
    pub fn with_history_months(mut self, months: u32) -> Self {
        self.history_months = months;
        self
    }

    /// Sets the generator seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Generates a sample snapshot.
///
/// # Errors
///
/// Returns an error only if generated data fails domain validation, which
/// indicates a bug in the generator itself.
pub fn generate_sample_snapshot(config: &SampleConfig) -> DataResult<PortfolioSnapshot> {
    let mut builder = PortfolioSnapshot::builder(config.as_of).name("Sample Portfolio");

    for i in 0..config.projects {
        let hash = mix(config.seed, i as u64);

        let sector_index = (hash % 6) as usize;
        let sector = SECTORS[sector_index];
        let status = pick_status(hash >> 32);

        let budget_units = 500_000 + hash % 29_500_000;
        let budget = Decimal::from(budget_units);

        let duration = 180 + ((hash >> 4) % 1020) as i64;
        let started_days_ago = 30 + ((hash >> 8) % 900) as i64;
        let start_date = config.as_of - Duration::days(started_days_ago);
        let planned_end_date = start_date + Duration::days(duration);

        let elapsed = match status {
            ProjectStatus::Complete => duration,
            _ => started_days_ago.min(duration),
        };

        let (spi_milli, cpi_milli) = index_bands(status, hash);

        // PV tracks calendar progress; EV and AC follow the indices.
        let planned_cost = match status {
            ProjectStatus::Complete => budget,
            _ => budget * Decimal::from(elapsed) / Decimal::from(duration),
        };
        let earned_value = planned_cost * Decimal::from(spi_milli) / Decimal::from(1000);
        let actual_cost = earned_value * Decimal::from(1000) / Decimal::from(cpi_milli);

        let (hub_lat, hub_lon) = SECTOR_HUBS[sector_index];
        let latitude = hub_lat + scatter(hash >> 16);
        let longitude = hub_lon + scatter(hash >> 24);
        let location = GeoPoint::new(latitude, longitude)
            .map_err(pulse_portfolio::PortfolioError::from)?
            .with_label(format!("{} Site {}", sector.name(), i + 1));

        let risk_entries = generate_risks(config, i, status, budget);
        let risk_count = risk_entries.len() as u32;

        let record = ProjectRecord::builder()
            .id(format!("P{:03}", i + 1))
            .name(format!("{} Program {}", sector.name(), i + 1))
            .sector(sector)
            .status(status)
            .budget(budget)
            .planned_cost(planned_cost)
            .actual_cost(actual_cost)
            .earned_value(earned_value)
            .start_date(start_date)
            .planned_end_date(planned_end_date)
            .planned_duration_days(duration)
            .elapsed_days(elapsed)
            .risk_count(risk_count)
            .manager(MANAGERS[(hash >> 40) as usize % MANAGERS.len()])
            .location(location)
            .build()?;

        let history = generate_history(config, hash, start_date, spi_milli, cpi_milli);

        builder = builder
            .add_record(record)
            .add_risks(risk_entries)
            .add_history(format!("P{:03}", i + 1), history);
    }

    Ok(builder.build()?)
}

/// Splitmix-style deterministic hash.
fn mix(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x
}

/// Status mix: 45% on track, 20% at risk, 15% critical, 20% complete.
fn pick_status(bits: u64) -> ProjectStatus {
    match bits % 20 {
        0..=8 => ProjectStatus::OnTrack,
        9..=12 => ProjectStatus::AtRisk,
        13..=15 => ProjectStatus::Critical,
        _ => ProjectStatus::Complete,
    }
}

/// SPI/CPI bands (in thousandths) conditioned on reported status.
fn index_bands(status: ProjectStatus, hash: u64) -> (u64, u64) {
    let spi_jitter = (hash >> 12) % 100;
    let cpi_jitter = (hash >> 20) % 100;

    match status {
        ProjectStatus::OnTrack => (960 + spi_jitter, 950 + cpi_jitter),
        ProjectStatus::AtRisk => (820 + spi_jitter, 840 + cpi_jitter),
        ProjectStatus::Critical => (660 + spi_jitter, 700 + cpi_jitter),
        ProjectStatus::Complete => (950 + spi_jitter, 940 + cpi_jitter),
    }
}

/// Scatter of roughly +/- 1.5 degrees around a hub.
fn scatter(bits: u64) -> f64 {
    (bits % 3000) as f64 / 1000.0 - 1.5
}

fn generate_risks(
    config: &SampleConfig,
    project_index: usize,
    status: ProjectStatus,
    budget: Decimal,
) -> Vec<RiskEntry> {
    // Troubled projects carry fuller registers.
    let scaled = match status {
        ProjectStatus::OnTrack => config.risks_per_project * 7 / 10,
        ProjectStatus::AtRisk => config.risks_per_project * 3 / 2,
        ProjectStatus::Critical => config.risks_per_project * 2,
        ProjectStatus::Complete => config.risks_per_project / 2,
    }
    .max(1);

    let categories = RiskCategory::all();
    let mut risks = Vec::with_capacity(scaled);

    for j in 0..scaled {
        let hash = mix(config.seed.wrapping_add(0x5eed), (project_index * 256 + j) as u64);

        let probability = match status {
            ProjectStatus::OnTrack => 0.10 + (hash % 20) as f64 / 100.0,
            ProjectStatus::AtRisk => 0.30 + (hash % 30) as f64 / 100.0,
            ProjectStatus::Critical => 0.40 + (hash % 30) as f64 / 100.0,
            ProjectStatus::Complete => 0.10 + (hash % 10) as f64 / 100.0,
        };

        // Impact between 1% and 10% of the project budget.
        let impact_cost = budget * Decimal::from(10 + (hash >> 8) % 90) / Decimal::from(1000);

        let category = categories[(hash >> 16) as usize % categories.len()];
        let risk_status = match (hash >> 24) % 10 {
            0..=2 => RiskStatus::Active,
            3..=6 => RiskStatus::Mitigating,
            7..=8 => RiskStatus::Monitoring,
            _ => RiskStatus::Closed,
        };

        // Bands above stay inside 0-1, so construction cannot fail.
        if let Ok(entry) = RiskEntry::new(
            format!("R{:03}-{j}", project_index + 1),
            format!("P{:03}", project_index + 1),
            format!("{} risk {}", category.name(), j + 1),
            category,
            probability,
            impact_cost,
        ) {
            risks.push(entry.with_status(risk_status));
        }
    }

    risks
}

fn generate_history(
    config: &SampleConfig,
    project_hash: u64,
    start_date: NaiveDate,
    spi_milli: u64,
    cpi_milli: u64,
) -> Vec<PerformancePoint> {
    let current = ReportingPeriod::from_date(config.as_of);
    let started = ReportingPeriod::from_date(start_date);

    let mut points = Vec::new();

    for months_back in (0..config.history_months).rev() {
        let mut period = current;
        for _ in 0..months_back {
            period = period.prev();
        }

        if period < started {
            continue;
        }

        // Older months sit slightly below the final indices, with a little
        // per-month wobble.
        let wobble = |shift: u32| ((mix(project_hash, (months_back + shift) as u64) % 41) as f64
            - 20.0)
            / 1000.0;
        let drift = months_back as f64 * 0.003;

        let spi = (spi_milli as f64 / 1000.0 - drift + wobble(0)).clamp(0.5, 1.5);
        let cpi = (cpi_milli as f64 / 1000.0 - drift + wobble(7)).clamp(0.5, 1.5);

        points.push(PerformancePoint::new(period, spi, cpi));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_portfolio::prelude::{bucket_by_risk, AnalyticsConfig, PortfolioKpis};

    fn config() -> SampleConfig {
        SampleConfig::new(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
    }

    #[test]
    fn test_generates_requested_size() {
        let snapshot = generate_sample_snapshot(&config()).unwrap();

        assert_eq!(snapshot.record_count(), 40);
        assert!(!snapshot.risks.is_empty());
        assert!(!snapshot.history.is_empty());
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        let a = generate_sample_snapshot(&config()).unwrap();
        let b = generate_sample_snapshot(&config()).unwrap();

        assert_eq!(a.record_count(), b.record_count());
        for (ra, rb) in a.records.iter().zip(&b.records) {
            assert_eq!(ra.id, rb.id);
            assert_eq!(ra.budget, rb.budget);
            assert_eq!(ra.earned_value, rb.earned_value);
            assert_eq!(ra.status, rb.status);
        }
        assert_eq!(a.risks.len(), b.risks.len());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate_sample_snapshot(&config()).unwrap();
        let b = generate_sample_snapshot(&config().with_seed(7)).unwrap();

        let budgets_a: Vec<_> = a.records.iter().map(|r| r.budget).collect();
        let budgets_b: Vec<_> = b.records.iter().map(|r| r.budget).collect();
        assert_ne!(budgets_a, budgets_b);
    }

    #[test]
    fn test_statuses_are_mixed() {
        let snapshot = generate_sample_snapshot(&config()).unwrap();

        let distinct: std::collections::HashSet<_> =
            snapshot.records.iter().map(|r| r.status).collect();
        assert!(distinct.len() >= 3, "expected a mixed portfolio");
    }

    #[test]
    fn test_troubled_projects_have_weak_indices() {
        let snapshot = generate_sample_snapshot(&config().with_projects(80)).unwrap();

        for record in &snapshot.records {
            if record.status == ProjectStatus::Critical {
                let spi = record.spi().unwrap();
                assert!(spi < 0.9, "critical project {} has SPI {spi}", record.id);
            }
        }
    }

    #[test]
    fn test_history_starts_after_project_start() {
        let snapshot = generate_sample_snapshot(&config()).unwrap();

        for record in &snapshot.records {
            let started = ReportingPeriod::from_date(record.start_date);
            for point in snapshot.history_for(&record.id) {
                assert!(point.period >= started);
            }
        }
    }

    #[test]
    fn test_generated_snapshot_feeds_analytics() {
        let snapshot = generate_sample_snapshot(&config()).unwrap();
        let analytics_config = AnalyticsConfig::default();

        let kpis = PortfolioKpis::calculate(&snapshot, &analytics_config);
        assert!(kpis.avg_spi.is_some());
        assert!(kpis.avg_cpi.is_some());
        assert!(kpis.total_budget > Decimal::ZERO);

        let dist = bucket_by_risk(&snapshot, &analytics_config);
        let covered: usize = dist.by_bucket.values().map(|m| m.count).sum();
        assert_eq!(covered, snapshot.record_count());
    }

    #[test]
    fn test_locations_scatter_around_sector_hubs() {
        let snapshot = generate_sample_snapshot(&config()).unwrap();

        for record in &snapshot.records {
            let location = record.location.as_ref().unwrap();
            assert!(location.latitude.abs() <= 90.0);
            assert!(location.longitude.abs() <= 180.0);
            assert!(location.label.as_deref().unwrap().contains("Site"));
        }
    }
}
