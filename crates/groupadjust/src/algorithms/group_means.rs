//! Group-mean computation for one grouping.
//!
//! ## Purpose
//!
//! This module computes, for every distinct label of a grouping, the mean of
//! the non-missing values whose records carry that label. It is the first of
//! the three passes of an adjustment.
//!
//! ## Design notes
//!
//! * **Accumulate-then-broadcast**: A single pass builds sums and counts per
//!   group code; means are read back per record through the codes.
//! * **Linear**: O(N) time and O(G) extra space per grouping, regardless of
//!   how many distinct labels the grouping has.
//! * **Pluggable**: The sequential pass has the [`MeanPassFn`] signature so
//!   extension crates can swap in a parallel implementation.
//!
//! ## Key concepts
//!
//! * **Group mean table**: [`GroupMeans`] pairs each label with its mean and counts.
//!
//! ## Invariants
//!
//! * A group whose values are all missing has a NaN mean.
//! * Missing values still count towards a group's size.
//!
//! ## Non-goals
//!
//! * This module does not combine groupings (see `combination`).
//!
//! [`MeanPassFn`]: crate::engine::executor::MeanPassFn

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::accumulator::GroupAccumulator;
use crate::primitives::labels::{Label, LabelTable};

// ============================================================================
// Sequential Mean Pass
// ============================================================================

/// Accumulate sums and counts for every group of one grouping.
pub fn mean_pass<T: Float>(values: &[T], codes: &[usize], n_groups: usize) -> GroupAccumulator<T> {
    let mut acc = GroupAccumulator::new(n_groups);
    acc.accumulate(values, codes);
    acc
}

// ============================================================================
// Group Mean Table
// ============================================================================

/// Mean table of one grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMeans<T, L> {
    /// Distinct labels, in order of first appearance.
    pub labels: Vec<L>,

    /// Mean of the non-missing values of each label (NaN if there are none).
    pub means: Vec<T>,

    /// Number of non-missing values per label.
    pub counts: Vec<usize>,

    /// Number of records per label.
    pub sizes: Vec<usize>,
}

impl<T: Float, L: Label> GroupMeans<T, L> {
    /// Build the table from the distinct labels and their accumulator.
    pub fn from_accumulator(labels: Vec<L>, acc: &GroupAccumulator<T>, means: Vec<T>) -> Self {
        Self {
            labels,
            means,
            counts: acc.counts.clone(),
            sizes: acc.sizes.clone(),
        }
    }

    /// Mean of a label, or `None` if the label does not occur in the grouping.
    ///
    /// This is a linear scan over the distinct labels. Use [`lookup`] when
    /// reading many labels.
    ///
    /// [`lookup`]: GroupMeans::lookup
    pub fn get(&self, label: &L) -> Option<T> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.means[i])
    }

    /// Label to mean map, built in one pass over the table.
    pub fn lookup(&self) -> LabelTable<'_, L, T> {
        self.labels.iter().zip(self.means.iter().copied()).collect()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the grouping had no records.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label, mean)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&L, T)> + '_ {
        self.labels.iter().zip(self.means.iter().copied())
    }
}
