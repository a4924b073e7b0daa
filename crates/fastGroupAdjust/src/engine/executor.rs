//! Parallel execution passes for group adjustment.
//!
//! ## Purpose
//!
//! This module provides the parallel mean, combine and demean passes that are
//! injected into the `groupadjust` execution engine. The engine keeps the
//! orchestration (label encoding, per-grouping loop, optional outputs); only
//! the O(N) sweeps over records run on the rayon thread pool.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacements for the sequential passes, with
//!   the same signatures as the `*PassFn` hooks.
//! * **Chunked accumulation**: The mean pass accumulates fixed-size record
//!   chunks into one accumulator each and merges them in chunk order.
//! * **Fallback**: Small inputs, and groupings whose cardinality is high
//!   relative to the number of records, use the sequential pass.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Chunk boundaries depend only on the number of records, so repeated runs
//!   give bit-identical results regardless of thread count.
//! * Results equal the sequential passes up to floating-point summation order.
//!
//! ## Non-goals
//!
//! * This module does not encode labels (handled by `groupadjust::executor`).
//! * This module does not validate input data (handled by `validator`).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from groupadjust crate
use groupadjust::internals::algorithms::combination::UndefinedMeanPolicy;
use groupadjust::internals::algorithms::demean::demean_one;
use groupadjust::internals::algorithms::group_means::mean_pass;
use groupadjust::internals::math::accumulator::GroupAccumulator;

// ============================================================================
// Tuning Constants
// ============================================================================

/// Inputs shorter than this are processed sequentially.
pub const MIN_PARALLEL_LEN: usize = 16_384;

/// Smallest record chunk handed to a worker.
pub const MIN_CHUNK_LEN: usize = 4_096;

/// Upper bound on the number of partial accumulators in the mean pass.
pub const MAX_CHUNKS: usize = 64;

/// Record chunk length used by the mean pass for `n` records.
#[inline]
pub fn chunk_len(n: usize) -> usize {
    n.div_ceil(MAX_CHUNKS).max(MIN_CHUNK_LEN)
}

// ============================================================================
// Parallel Mean Pass
// ============================================================================

/// Accumulate sums and counts for every group of one grouping in parallel.
#[cfg(feature = "cpu")]
pub fn mean_pass_parallel<T>(values: &[T], codes: &[usize], n_groups: usize) -> GroupAccumulator<T>
where
    T: Float + Send + Sync,
{
    let n = values.len();
    let chunk = chunk_len(n);
    let n_chunks = n.div_ceil(chunk);

    // Partial accumulators cost O(n_groups) each.
    if n < MIN_PARALLEL_LEN || n_groups.saturating_mul(n_chunks) > n {
        return mean_pass(values, codes, n_groups);
    }

    let partials: Vec<GroupAccumulator<T>> = values
        .par_chunks(chunk)
        .zip(codes.par_chunks(chunk))
        .map(|(v, c)| {
            let mut acc = GroupAccumulator::new(n_groups);
            acc.accumulate(v, c);
            acc
        })
        .collect();

    partials
        .into_iter()
        .reduce(GroupAccumulator::merge)
        .unwrap_or_else(|| GroupAccumulator::new(n_groups))
}

// ============================================================================
// Parallel Combine Pass
// ============================================================================

/// Fold one grouping's means into the running weighted mean in parallel.
#[cfg(feature = "cpu")]
pub fn combine_pass_parallel<T>(
    codes: &[usize],
    means: &[T],
    weight: T,
    weighted: &mut [T],
    defined: &mut [bool],
    policy: UndefinedMeanPolicy,
) where
    T: Float + Send + Sync,
{
    match policy {
        UndefinedMeanPolicy::Propagate => {
            weighted
                .par_iter_mut()
                .zip(codes.par_iter())
                .with_min_len(MIN_CHUNK_LEN)
                .for_each(|(wm, &g)| {
                    *wm = *wm + weight * means[g];
                });
        }
        UndefinedMeanPolicy::Skip => {
            weighted
                .par_iter_mut()
                .zip(defined.par_iter_mut())
                .zip(codes.par_iter())
                .with_min_len(MIN_CHUNK_LEN)
                .for_each(|((wm, d), &g)| {
                    let m = means[g];
                    if !m.is_nan() {
                        *wm = *wm + weight * m;
                        *d = true;
                    }
                });
        }
    }
}

// ============================================================================
// Parallel Demean Pass
// ============================================================================

/// Replace each weighted mean with the demeaned value, in parallel.
#[cfg(feature = "cpu")]
pub fn demean_pass_parallel<T>(values: &[T], weighted: &mut [T])
where
    T: Float + Send + Sync,
{
    weighted
        .par_iter_mut()
        .zip(values.par_iter())
        .with_min_len(MIN_CHUNK_LEN)
        .for_each(|(out, &v)| {
            *out = demean_one(v, *out);
        });
}
