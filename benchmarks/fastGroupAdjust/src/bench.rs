//! Group adjustment benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability (linear growth at 1x, 2x and 4x record counts)
//! - Group cardinality (from a handful of groups to one group per record)
//! - Number of groupings
//! - Missing-heavy series
//! - The 6M-record reference workload
//!
//! For serial execution, use `FASTGROUPADJUST_BACKEND=serial cargo bench`.
//! For parallel execution, use `FASTGROUPADJUST_BACKEND=parallel cargo bench`.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fastGroupAdjust::prelude::*;
use rand::prelude::*;
use rand_distr::{Bernoulli, Normal};
use std::env;
use std::hint::black_box;

// ============================================================================
// Helper Functions
// ============================================================================

fn get_config() -> (bool, &'static str) {
    match env::var("FASTGROUPADJUST_BACKEND").ok().as_deref() {
        Some("cpu_serial") | Some("serial") => (false, "serial"),
        Some("cpu") | Some("parallel") | _ => (true, "parallel"),
    }
}

fn run(vals: &[f64], groupings: &[Vec<u32>], weights: &[f64], parallel: bool) -> Vec<f64> {
    GroupAdjust::new()
        .weights(weights)
        .adapter(Batch)
        .parallel(parallel)
        .build()
        .unwrap()
        .adjust(vals, groupings)
        .unwrap()
        .into_adjusted()
}

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate Gaussian values with a fraction of missing entries.
fn generate_values(size: usize, missing_rate: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Normal::new(50.0, 10.0).unwrap();
    let missing_dist = Bernoulli::new(missing_rate).unwrap();

    (0..size)
        .map(|_| {
            if missing_dist.sample(&mut rng) {
                f64::NAN
            } else {
                value_dist.sample(&mut rng)
            }
        })
        .collect()
}

/// Generate a grouping with `n_groups` uniformly drawn labels.
fn generate_grouping(size: usize, n_groups: u32, seed: u64) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size).map(|_| rng.random_range(0..n_groups)).collect()
}

/// Generate a country/state/city style hierarchy of groupings.
fn generate_hierarchy(size: usize, seed: u64) -> Vec<Vec<u32>> {
    vec![
        generate_grouping(size, 10, seed),
        generate_grouping(size, 500, seed + 1),
        generate_grouping(size, 20_000, seed + 2),
    ]
}

/// Repeat the six-record pattern `repeats` times (6 * repeats records).
fn generate_reference_workload(repeats: usize) -> (Vec<f64>, Vec<Vec<u32>>) {
    let pattern = [1.0, f64::NAN, 3.0, 5.0, 8.0, 7.0];
    let g1: [u32; 6] = [1, 1, 1, 1, 1, 1];
    let g2: [u32; 6] = [1, 1, 1, 1, 2, 2];
    let g3: [u32; 6] = [1, 2, 2, 3, 4, 5];

    let vals = pattern.repeat(repeats);
    let groupings = vec![g1.repeat(repeats), g2.repeat(repeats), g3.repeat(repeats)];
    (vals, groupings)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("scalability_{}", mode_name));
    group.sample_size(20);

    // Doubling sizes: time should roughly double with each step.
    for size in [250_000, 500_000, 1_000_000] {
        group.throughput(Throughput::Elements(size as u64));

        let vals = generate_values(size, 0.05, 42);
        let groupings = generate_hierarchy(size, 7);

        group.bench_with_input(BenchmarkId::new("batch", size), &size, |b, _| {
            b.iter(|| {
                run(
                    black_box(&vals),
                    black_box(&groupings),
                    &[0.2, 0.3, 0.5],
                    use_parallel,
                )
            })
        });
    }
    group.finish();
}

fn bench_cardinality(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("cardinality_{}", mode_name));
    group.sample_size(20);

    let size = 500_000;
    let vals = generate_values(size, 0.05, 42);

    for n_groups in [10u32, 1_000, 100_000, size as u32] {
        let groupings = vec![generate_grouping(size, n_groups, 3)];

        group.bench_with_input(
            BenchmarkId::new("batch", n_groups),
            &n_groups,
            |b, _| {
                b.iter(|| run(black_box(&vals), black_box(&groupings), &[1.0], use_parallel))
            },
        );
    }
    group.finish();
}

fn bench_groupings(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("groupings_{}", mode_name));
    group.sample_size(20);

    let size = 500_000;
    let vals = generate_values(size, 0.05, 42);

    for k in [1usize, 2, 4, 8] {
        let groupings: Vec<Vec<u32>> = (0..k)
            .map(|i| generate_grouping(size, 1_000, 100 + i as u64))
            .collect();
        let weights = vec![1.0 / k as f64; k];

        group.bench_with_input(BenchmarkId::new("batch", k), &k, |b, _| {
            b.iter(|| run(black_box(&vals), black_box(&groupings), &weights, use_parallel))
        });
    }
    group.finish();
}

fn bench_missing(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("missing_{}", mode_name));
    group.sample_size(20);

    let size = 500_000;
    let groupings = generate_hierarchy(size, 11);

    for rate in [0.0, 0.5, 0.95] {
        let vals = generate_values(size, rate, 42);

        group.bench_with_input(BenchmarkId::new("batch", rate), &rate, |b, _| {
            b.iter(|| {
                run(
                    black_box(&vals),
                    black_box(&groupings),
                    &[0.2, 0.3, 0.5],
                    use_parallel,
                )
            })
        });
    }
    group.finish();
}

fn bench_reference(c: &mut Criterion) {
    let (use_parallel, mode_name) = get_config();
    let mut group = c.benchmark_group(format!("reference_{}", mode_name));
    group.sample_size(10);

    let (vals, groupings) = generate_reference_workload(1_000_000);
    group.throughput(Throughput::Elements(vals.len() as u64));

    group.bench_function("batch_6m", |b| {
        b.iter(|| {
            run(
                black_box(&vals),
                black_box(&groupings),
                &[0.2, 0.3, 0.5],
                use_parallel,
            )
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scalability,
    bench_cardinality,
    bench_groupings,
    bench_missing,
    bench_reference,
);

criterion_main!(benches);
