//! Criterion benchmarks for snapshot comparison.
//!
//! Measures best-value selection plus recommendation synthesis across
//! comparison sizes to catch regressions in the per-metric pairwise scan.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package vicinity-core
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use vicinity_core::{MetricRegistry, MetricSnapshot, NeighborhoodSnapshot, compare_snapshots};

/// Neighborhood counts to benchmark.
const COMPARISON_SIZES: &[u32] = &[2, 10, 50];

/// Every directional metric in the standard catalogue plus one neutral one.
const METRICS: &[&str] = &[
    "median_home_price",
    "price_per_sqft",
    "price_growth",
    "avg_days_on_market",
    "safety_score",
    "school_rating",
    "walk_score",
    "commute_time",
    "median_age",
];

/// Deterministic snapshots whose values drift with the neighborhood index.
#[expect(
    clippy::float_arithmetic,
    clippy::integer_division_remainder_used,
    reason = "fixture values are derived from a wrapped index"
)]
fn build_snapshots(count: u32) -> Vec<NeighborhoodSnapshot> {
    (0..count)
        .map(|index| {
            let step = f64::from(index % 17);
            NeighborhoodSnapshot::new(
                format!("Neighborhood {index}"),
                format!("n-{index}"),
                MetricSnapshot::from_iter([
                    ("median_home_price", 300_000.0 + step * 12_500.0),
                    ("price_per_sqft", 250.0 + step * 9.0),
                    ("price_growth", 2.0 + step * 0.5),
                    ("avg_days_on_market", 20.0 + step),
                    ("safety_score", 95.0 - step * 3.0),
                    ("school_rating", 5.0 + step * 0.25),
                    ("walk_score", 40.0 + step * 3.0),
                    ("commute_time", 15.0 + step * 2.0),
                    ("median_age", 30.0 + step),
                ]),
            )
        })
        .collect()
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare_snapshots");

    for &size in COMPARISON_SIZES {
        let snapshots = build_snapshots(size);
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("neighborhoods", size), &size, |b, _| {
            b.iter(|| {
                let selection = MetricRegistry::standard().select(METRICS.iter().copied());
                black_box(compare_snapshots(
                    "bench".into(),
                    selection,
                    snapshots.clone(),
                    Vec::new(),
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compare);
criterion_main!(benches);
