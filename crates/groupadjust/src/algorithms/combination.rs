//! Weighted combination of group means.
//!
//! ## Purpose
//!
//! This module folds one grouping's group means into the running per-record
//! weighted mean: `weighted[i] += w_k * mean_k[code_k[i]]`. Applied once per
//! grouping, it yields `Σ_k w_k * mean_k(group of i)` for every record.
//!
//! ## Design notes
//!
//! * **Incremental**: Contributions are added in place, so no per-grouping
//!   series of means is ever stored.
//! * **Policy-driven**: [`UndefinedMeanPolicy`] decides what an undefined (NaN)
//!   group mean does to the record's weighted mean.
//! * **No normalization**: Weights are used exactly as given, even when they
//!   do not sum to one.
//!
//! ## Key concepts
//!
//! * **Propagate**: Any undefined contribution makes the weighted mean undefined.
//! * **Skip**: Undefined contributions are left out; the weighted mean is
//!   undefined only if every contribution was.
//!
//! ## Invariants
//!
//! * `codes`, `weighted` and (when used) `defined` have one entry per record.
//! * Under `Skip`, `finalize_skipped` must run after the last grouping.

// External dependencies
use num_traits::Float;

// ============================================================================
// Undefined Mean Policy
// ============================================================================

/// How an undefined group mean contributes to a record's weighted mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UndefinedMeanPolicy {
    /// Any undefined contribution makes the weighted mean undefined (default).
    #[default]
    Propagate,

    /// Leave undefined contributions out of the sum.
    Skip,
}

impl UndefinedMeanPolicy {
    /// Whether per-record "defined" flags must be tracked.
    #[inline]
    pub fn tracks_defined(self) -> bool {
        matches!(self, Self::Skip)
    }
}

// ============================================================================
// Sequential Combine Pass
// ============================================================================

/// Fold one grouping's means into the running weighted mean.
///
/// `defined` is only read and written under [`UndefinedMeanPolicy::Skip`];
/// pass an empty slice otherwise.
pub fn combine_pass<T: Float>(
    codes: &[usize],
    means: &[T],
    weight: T,
    weighted: &mut [T],
    defined: &mut [bool],
    policy: UndefinedMeanPolicy,
) {
    match policy {
        UndefinedMeanPolicy::Propagate => {
            for (wm, &g) in weighted.iter_mut().zip(codes.iter()) {
                *wm = *wm + weight * means[g];
            }
        }
        UndefinedMeanPolicy::Skip => {
            for ((wm, d), &g) in weighted.iter_mut().zip(defined.iter_mut()).zip(codes.iter()) {
                let m = means[g];
                if !m.is_nan() {
                    *wm = *wm + weight * m;
                    *d = true;
                }
            }
        }
    }
}

/// Mark records without any defined contribution as undefined.
pub fn finalize_skipped<T: Float>(weighted: &mut [T], defined: &[bool]) {
    for (wm, &d) in weighted.iter_mut().zip(defined.iter()) {
        if !d {
            *wm = T::nan();
        }
    }
}
