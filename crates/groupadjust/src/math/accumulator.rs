//! Per-group sum and count accumulation.
//!
//! ## Purpose
//!
//! This module provides the aggregation primitive behind every group mean:
//! a flat table of running sums and counts indexed by group code, filled in
//! a single pass over the records.
//!
//! ## Design notes
//!
//! * **Linear**: One pass over the records, O(1) work per record.
//! * **Mergeable**: Partial accumulators over disjoint record ranges can be
//!   merged, which is how parallel extensions split the work.
//! * **Missing-aware**: NaN values are counted as members but contribute to
//!   neither the sum nor the non-missing count.
//!
//! ## Invariants
//!
//! * `sums`, `counts` and `sizes` all have length `n_groups`.
//! * `counts[g] <= sizes[g]` for every group.
//! * A group's mean is NaN exactly when `counts[g] == 0`.
//!
//! ## Non-goals
//!
//! * No compensated (Kahan) summation; plain floating-point sums are used.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// ============================================================================
// Group Accumulator
// ============================================================================

/// Running sums and counts for every group of one grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAccumulator<T> {
    /// Sum of non-missing values per group.
    pub sums: Vec<T>,

    /// Number of non-missing values per group.
    pub counts: Vec<usize>,

    /// Number of records per group, missing or not.
    pub sizes: Vec<usize>,
}

impl<T: Float> GroupAccumulator<T> {
    /// Create an empty accumulator for `n_groups` groups.
    pub fn new(n_groups: usize) -> Self {
        Self {
            sums: vec![T::zero(); n_groups],
            counts: vec![0; n_groups],
            sizes: vec![0; n_groups],
        }
    }

    /// Number of groups tracked.
    #[inline]
    pub fn n_groups(&self) -> usize {
        self.sums.len()
    }

    /// Fold `values` into the table using the matching `codes`.
    ///
    /// `values` and `codes` must have the same length and every code must be
    /// below `n_groups`.
    pub fn accumulate(&mut self, values: &[T], codes: &[usize]) {
        debug_assert_eq!(values.len(), codes.len());

        for (&v, &g) in values.iter().zip(codes.iter()) {
            self.sizes[g] += 1;
            if !v.is_nan() {
                self.sums[g] = self.sums[g] + v;
                self.counts[g] += 1;
            }
        }
    }

    /// Combine two accumulators built over disjoint records of the same grouping.
    pub fn merge(mut self, other: Self) -> Self {
        debug_assert_eq!(self.n_groups(), other.n_groups());

        for (s, o) in self.sums.iter_mut().zip(other.sums) {
            *s = *s + o;
        }
        for (c, o) in self.counts.iter_mut().zip(other.counts) {
            *c += o;
        }
        for (c, o) in self.sizes.iter_mut().zip(other.sizes) {
            *c += o;
        }
        self
    }

    /// Mean of the non-missing values of each group (NaN for empty groups).
    pub fn means(&self) -> Vec<T> {
        self.sums
            .iter()
            .zip(self.counts.iter())
            .map(|(&sum, &count)| match T::from(count) {
                Some(c) if count > 0 => sum / c,
                _ => T::nan(),
            })
            .collect()
    }

    /// Number of groups without any non-missing value.
    pub fn n_empty(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}
