//! Benchmarks for the pulse-portfolio analytics.
//!
//! Run with: cargo bench -p pulse-portfolio

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pulse_portfolio::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517c_c1b7_2722_0a95);
    x ^= x >> 32;
    x
}

fn create_snapshot(projects: usize) -> PortfolioSnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let statuses = [
        ProjectStatus::OnTrack,
        ProjectStatus::AtRisk,
        ProjectStatus::Critical,
        ProjectStatus::Complete,
    ];

    let mut builder = PortfolioSnapshot::builder(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap())
        .name("Benchmark Portfolio");

    for i in 0..projects {
        let hash = simple_hash(42, i as u64);
        let planned = Decimal::from(100_000 + (hash % 900_000) as i64);
        let earned = planned * Decimal::from(500 + (hash >> 8) % 1000) / Decimal::from(1000);
        let actual = planned * Decimal::from(500 + (hash >> 16) % 1000) / Decimal::from(1000);
        let duration = 180 + (hash % 1020) as i64;

        let record = ProjectRecord::builder()
            .id(format!("P{i:05}"))
            .name(format!("Project {i}"))
            .status(statuses[(hash >> 24) as usize % statuses.len()])
            .budget(Decimal::from(1_000_000 + (hash % 29_000_000) as i64))
            .planned_cost(planned)
            .actual_cost(actual)
            .earned_value(earned)
            .start_date(start)
            .planned_end_date(start + chrono::Duration::days(duration))
            .elapsed_days((hash % duration as u64) as i64)
            .build()
            .expect("generated record is valid");

        builder = builder.add_record(record);

        if hash % 4 == 0 {
            builder = builder.add_risk(
                RiskEntry::new(
                    format!("R{i:05}"),
                    format!("P{i:05}"),
                    format!("Risk {i}"),
                    RiskCategory::TechnicalIssues,
                    0.1 + (hash % 60) as f64 / 100.0,
                    Decimal::from(10_000 + (hash % 500_000) as i64),
                )
                .expect("generated risk is valid"),
            );
        }
    }

    builder.build().expect("generated snapshot is valid")
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_portfolio_kpis(c: &mut Criterion) {
    let config = AnalyticsConfig::default();
    let mut group = c.benchmark_group("portfolio_kpis");

    for size in [40, 200, 1000] {
        let snapshot = create_snapshot(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snap| {
            b.iter(|| PortfolioKpis::calculate(black_box(snap), black_box(&config)));
        });
    }

    group.finish();
}

fn bench_classification(c: &mut Criterion) {
    let config = AnalyticsConfig::default();
    let snapshot = create_snapshot(200);

    c.bench_function("bucket_by_risk_200", |b| {
        b.iter(|| bucket_by_risk(black_box(&snapshot), black_box(&config)));
    });
}

fn bench_attention_list(c: &mut Criterion) {
    let config = AnalyticsConfig::default();
    let snapshot = create_snapshot(200);

    c.bench_function("attention_list_200", |b| {
        b.iter(|| projects_needing_attention(black_box(&snapshot), black_box(&config)));
    });
}

criterion_group!(
    benches,
    bench_portfolio_kpis,
    bench_classification,
    bench_attention_list
);
criterion_main!(benches);
