//! Output types and result structures for group adjustment.
//!
//! ## Purpose
//!
//! This module defines `GroupAdjustResult`, which holds the adjusted series
//! together with the optional intermediate outputs (weighted means, mean
//! tables) and diagnostics.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: Optional outputs use `Option` and are only
//!   populated when requested.
//! * **Generics**: Results are generic over `Float` values and label types.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Invariants
//!
//! * `adjusted` and, when present, `weighted_means` have one entry per input value.
//! * `group_means`, when present, has one table per grouping in input order.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::group_means::GroupMeans;
use crate::evaluation::diagnostics::Diagnostics;
use crate::primitives::missing::values_to_options;

// ============================================================================
// Result Structure
// ============================================================================

/// Group adjustment output.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAdjustResult<T, L> {
    /// Adjusted values: each value minus its weighted group mean (NaN if missing).
    pub adjusted: Vec<T>,

    /// Weighted mean subtracted from each value.
    pub weighted_means: Option<Vec<T>>,

    /// Mean table of each grouping.
    pub group_means: Option<Vec<GroupMeans<T, L>>>,

    /// Summary statistics.
    pub diagnostics: Option<Diagnostics<T>>,

    /// Weights used, as configured.
    pub weights: Vec<T>,
}

impl<T: Float, L> GroupAdjustResult<T, L> {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.adjusted.len()
    }

    /// Whether the input series was empty.
    pub fn is_empty(&self) -> bool {
        self.adjusted.is_empty()
    }

    /// Adjusted values with missing entries as `None`.
    pub fn to_options(&self) -> Vec<Option<T>> {
        values_to_options(&self.adjusted)
    }

    /// Consume the result and return the adjusted values.
    pub fn into_adjusted(self) -> Vec<T> {
        self.adjusted
    }

    /// Check if weighted means were kept.
    pub fn has_weighted_means(&self) -> bool {
        self.weighted_means.is_some()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug, L> Display for GroupAdjustResult<T, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Records:   {}", self.adjusted.len())?;
        writeln!(f, "  Groupings: {}", self.weights.len())?;
        write!(f, "  Weights:  ")?;
        for w in &self.weights {
            write!(f, " {}", w)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
        }

        writeln!(f, "Adjusted Data:")?;

        let has_wm = self.weighted_means.is_some();

        write!(f, "{:>8} {:>12}", "Index", "Adjusted")?;
        if has_wm {
            write!(f, " {:>14}", "Weighted_Mean")?;
        }
        writeln!(f)?;

        let line_width = 21 + if has_wm { 15 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Data rows (show first 10 and last 10 if more than 20 records)
        let n = self.adjusted.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8} {:>12.6}", idx, self.adjusted[idx])?;
            if let Some(wm) = &self.weighted_means {
                write!(f, " {:>14.6}", wm[idx])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
