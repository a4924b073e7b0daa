//! Execution engine for group adjustment.
//!
//! ## Purpose
//!
//! This module orchestrates one adjustment: for each grouping it encodes the
//! labels, runs the mean pass, and folds the resulting means into the running
//! weighted mean; it then demeans the series in place and assembles the
//! optional outputs.
//!
//! ## Design notes
//!
//! * **Incremental**: Memory stays at O(N + G_k): one weighted-mean buffer,
//!   one reused code buffer, and one mean table at a time.
//! * **Pluggable passes**: Each pass can be replaced through a function
//!   pointer (`custom_*_pass`), which is how `fastGroupAdjust` injects its
//!   parallel implementations.
//! * **Generics**: Generic over `Float` values and [`Label`] types.
//!
//! ## Invariants
//!
//! * Inputs are assumed validated (see `validator`).
//! * The output has exactly one entry per input value, in input order.
//! * The result does not depend on the order in which passes visit records.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs.
//! * This module does not provide public-facing result formatting.
//! * This module does not spawn threads itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::combination::{UndefinedMeanPolicy, combine_pass, finalize_skipped};
use crate::algorithms::demean::demean_pass;
use crate::algorithms::group_means::{GroupMeans, mean_pass};
use crate::evaluation::diagnostics::GroupingSummary;
use crate::math::accumulator::GroupAccumulator;
pub use crate::primitives::buffer::AdjustBuffer;
use crate::primitives::labels::Label;

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for custom mean pass function
#[doc(hidden)]
pub type MeanPassFn<T> = fn(
    &[T],     // values
    &[usize], // group codes
    usize,    // number of groups
) -> GroupAccumulator<T>;

/// Signature for custom combine pass function
#[doc(hidden)]
pub type CombinePassFn<T> = fn(
    &[usize],            // group codes
    &[T],                // group means
    T,                   // weight of this grouping
    &mut [T],            // running weighted means
    &mut [bool],         // defined flags (empty unless skipping)
    UndefinedMeanPolicy, // policy
);

/// Signature for custom demean pass function
#[doc(hidden)]
pub type DemeanPassFn<T> = fn(
    &[T],     // values
    &mut [T], // weighted means in, adjusted values out
);

/// Output from group adjustment execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T, L> {
    /// Adjusted (demeaned) values.
    pub adjusted: Vec<T>,

    /// Per-record weighted means (if requested).
    pub weighted_means: Option<Vec<T>>,

    /// Mean table of each grouping (if requested).
    pub group_means: Option<Vec<GroupMeans<T, L>>>,

    /// Group counts of each grouping.
    pub groupings: Vec<GroupingSummary>,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for group adjustment execution.
#[derive(Debug, Clone)]
pub struct AdjustConfig<T> {
    /// One weight per grouping.
    pub weights: Vec<T>,

    /// Treatment of undefined group means in the weighted combination.
    pub undefined_mean: UndefinedMeanPolicy,

    /// Keep a copy of the weighted means before demeaning.
    pub return_weighted_means: bool,

    /// Keep the mean table of each grouping.
    pub return_group_means: bool,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom mean pass function (enables parallel execution).
    #[doc(hidden)]
    pub custom_mean_pass: Option<MeanPassFn<T>>,

    /// Custom combine pass function.
    #[doc(hidden)]
    pub custom_combine_pass: Option<CombinePassFn<T>>,

    /// Custom demean pass function.
    #[doc(hidden)]
    pub custom_demean_pass: Option<DemeanPassFn<T>>,
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for group adjustment.
pub struct GroupAdjustExecutor;

impl GroupAdjustExecutor {
    /// Run a full adjustment with the given configuration.
    pub fn run_with_config<T, L, G>(
        values: &[T],
        groupings: &[G],
        config: &AdjustConfig<T>,
    ) -> ExecutorOutput<T, L>
    where
        T: Float,
        L: Label,
        G: AsRef<[L]>,
    {
        let policy = config.undefined_mean;
        let mean_fn = config.custom_mean_pass.unwrap_or(mean_pass);
        let combine_fn = config.custom_combine_pass.unwrap_or(combine_pass);
        let demean_fn = config.custom_demean_pass.unwrap_or(demean_pass);

        let mut buffer: AdjustBuffer<T> = AdjustBuffer::new(values.len(), policy.tracks_defined());
        let mut tables = Vec::new();
        let mut summaries = Vec::with_capacity(groupings.len());
        let mut uniques: Vec<L> = Vec::new();

        for (grouping, &weight) in groupings.iter().zip(config.weights.iter()) {
            let labels = grouping.as_ref();
            if config.return_group_means {
                buffer.index.encode_into(labels, Some(&mut uniques));
            } else {
                buffer.index.encode_into(labels, None);
            }

            let acc = mean_fn(values, buffer.index.codes(), buffer.index.n_groups());
            let means = acc.means();

            combine_fn(
                buffer.index.codes(),
                &means,
                weight,
                &mut buffer.weighted,
                &mut buffer.defined,
                policy,
            );

            summaries.push(GroupingSummary {
                n_groups: acc.n_groups(),
                n_empty_groups: acc.n_empty(),
            });

            if config.return_group_means {
                let labels = core::mem::take(&mut uniques);
                tables.push(GroupMeans::from_accumulator(labels, &acc, means));
            }
        }

        if policy.tracks_defined() {
            finalize_skipped(&mut buffer.weighted, &buffer.defined);
        }

        let weighted_means = if config.return_weighted_means {
            Some(buffer.weighted.clone())
        } else {
            None
        };

        demean_fn(values, &mut buffer.weighted);

        ExecutorOutput {
            adjusted: buffer.weighted,
            weighted_means,
            group_means: if config.return_group_means {
                Some(tables)
            } else {
                None
            },
            groupings: summaries,
        }
    }
}
