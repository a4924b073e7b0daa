//! Diagnostics for a group adjustment.
//!
//! ## Purpose
//!
//! This module summarizes an adjustment after the fact: how many records were
//! missing on input and output, how many groups each grouping had (and how
//! many of them had no usable values), the weight total, and the location
//! and spread of the adjusted series.
//!
//! ## Design notes
//!
//! * **Descriptive only**: Nothing here changes the adjusted values.
//! * **Weight total reported, not enforced**: Weights that do not sum to one
//!   are legal; the sum is surfaced so callers can spot it.
//! * **Generics**: All computations are generic over `Float` types.
//!
//! ## Invariants
//!
//! * `n_missing_outputs >= n_missing_values`.
//! * `output_mean` and `output_sd` are NaN when no output is defined.
//!
//! ## Non-goals
//!
//! * No hypothesis tests or variance decomposition.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::primitives::missing::{count_missing, is_missing};

// ============================================================================
// Grouping Summary
// ============================================================================

/// Group counts of one grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupingSummary {
    /// Number of distinct labels.
    pub n_groups: usize,

    /// Number of groups without any non-missing value.
    pub n_empty_groups: usize,
}

// ============================================================================
// Diagnostics Structure
// ============================================================================

/// Summary statistics of a group adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics<T> {
    /// Number of records.
    pub n_records: usize,

    /// Number of missing input values.
    pub n_missing_values: usize,

    /// Number of missing adjusted values.
    pub n_missing_outputs: usize,

    /// Sum of the weights.
    pub weight_sum: T,

    /// Group counts per grouping, in input order.
    pub groupings: Vec<GroupingSummary>,

    /// Mean of the defined adjusted values.
    pub output_mean: T,

    /// Sample standard deviation of the defined adjusted values.
    pub output_sd: T,
}

impl<T: Float> Diagnostics<T> {
    /// Compute diagnostics from the inputs and the adjusted series.
    pub fn compute(
        values: &[T],
        adjusted: &[T],
        weights: &[T],
        groupings: Vec<GroupingSummary>,
    ) -> Self {
        let weight_sum = weights.iter().fold(T::zero(), |acc, &w| acc + w);

        let mut n = 0usize;
        let mut sum = T::zero();
        for &a in adjusted.iter().filter(|&&a| !is_missing(a)) {
            n += 1;
            sum = sum + a;
        }

        let (output_mean, output_sd) = match T::from(n) {
            Some(nf) if n > 0 => {
                let mean = sum / nf;
                let ss = adjusted
                    .iter()
                    .filter(|&&a| !is_missing(a))
                    .fold(T::zero(), |acc, &a| acc + (a - mean) * (a - mean));
                let sd = if n > 1 {
                    (ss / (nf - T::one())).sqrt()
                } else {
                    T::zero()
                };
                (mean, sd)
            }
            _ => (T::nan(), T::nan()),
        };

        Self {
            n_records: values.len(),
            n_missing_values: count_missing(values),
            n_missing_outputs: adjusted.len() - n,
            weight_sum,
            groupings,
            output_mean,
            output_sd,
        }
    }

    /// Total number of groups across all groupings.
    pub fn total_groups(&self) -> usize {
        self.groupings.iter().map(|g| g.n_groups).sum()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display> Display for Diagnostics<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Group Adjustment Diagnostics:")?;
        writeln!(f, "  Records:         {}", self.n_records)?;
        writeln!(f, "  Missing values:  {}", self.n_missing_values)?;
        writeln!(f, "  Missing outputs: {}", self.n_missing_outputs)?;
        writeln!(f, "  Weight sum:      {}", self.weight_sum)?;
        writeln!(f, "  Output mean:     {:.6}", self.output_mean)?;
        writeln!(f, "  Output SD:       {:.6}", self.output_sd)?;

        for (k, g) in self.groupings.iter().enumerate() {
            writeln!(
                f,
                "  Grouping {}: {} groups ({} empty)",
                k, g.n_groups, g.n_empty_groups
            )?;
        }

        Ok(())
    }
}
