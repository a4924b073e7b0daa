//! Label encoding for groupings.
//!
//! ## Purpose
//!
//! This module turns a grouping (one label per record) into dense integer
//! codes so that per-group aggregates can live in flat vectors indexed by
//! code instead of being looked up by label for every record.
//!
//! ## Design notes
//!
//! * **Single pass**: Labels are factorized with one map lookup per record.
//! * **First appearance**: Codes are assigned in the order labels first appear.
//! * **Reusable**: `encode_into` refills an existing index, keeping its capacity.
//! * **No-std**: Uses a `HashMap` with `std` and a `BTreeMap` without it.
//!
//! ## Key concepts
//!
//! * **Label**: Any hashable (std) or ordered (no_std) cloneable value.
//! * **Code**: Dense group id in `0..n_groups`.
//!
//! ## Invariants
//!
//! * `codes.len()` equals the number of labels encoded.
//! * Every code is strictly less than `n_groups`.
//! * When collected, `uniques[code]` is the label that received `code`.
//!
//! ## Non-goals
//!
//! * This module does not treat any label as missing; every label is a group.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::HashMap;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
#[cfg(feature = "std")]
use core::hash::Hash;

// ============================================================================
// Label Trait
// ============================================================================

/// Marker for types usable as group labels.
///
/// With the `std` feature labels must be `Hash + Eq + Clone`; without it they
/// must be `Ord + Clone`.
#[cfg(feature = "std")]
pub trait Label: Hash + Eq + Clone {}

#[cfg(feature = "std")]
impl<L: Hash + Eq + Clone> Label for L {}

/// Marker for types usable as group labels.
///
/// With the `std` feature labels must be `Hash + Eq + Clone`; without it they
/// must be `Ord + Clone`.
#[cfg(not(feature = "std"))]
pub trait Label: Ord + Clone {}

#[cfg(not(feature = "std"))]
impl<L: Ord + Clone> Label for L {}

/// Map keyed by borrowed labels: a `HashMap` with `std`, a `BTreeMap` without.
#[cfg(feature = "std")]
pub type LabelTable<'a, L, V> = HashMap<&'a L, V>;

/// Map keyed by borrowed labels: a `HashMap` with `std`, a `BTreeMap` without.
#[cfg(not(feature = "std"))]
pub type LabelTable<'a, L, V> = BTreeMap<&'a L, V>;

type LabelMap<'a, L> = LabelTable<'a, L, usize>;

// ============================================================================
// Group Index
// ============================================================================

/// Dense group codes for one grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIndex {
    codes: Vec<usize>,
    n_groups: usize,
}

impl GroupIndex {
    /// Create an empty index with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            codes: Vec::with_capacity(capacity),
            n_groups: 0,
        }
    }

    /// Factorize a grouping.
    pub fn from_labels<L: Label>(labels: &[L]) -> Self {
        let mut index = Self::with_capacity(labels.len());
        index.encode_into(labels, None);
        index
    }

    /// Factorize a grouping and return its distinct labels, indexed by code.
    pub fn from_labels_with_uniques<L: Label>(labels: &[L]) -> (Self, Vec<L>) {
        let mut index = Self::with_capacity(labels.len());
        let mut uniques = Vec::new();
        index.encode_into(labels, Some(&mut uniques));
        (index, uniques)
    }

    /// Refill this index from `labels`, reusing the code buffer.
    ///
    /// When `uniques` is given it is cleared and receives the distinct labels
    /// in code order.
    pub fn encode_into<L: Label>(&mut self, labels: &[L], mut uniques: Option<&mut Vec<L>>) {
        self.codes.clear();
        self.codes.reserve(labels.len());

        if let Some(u) = uniques.as_deref_mut() {
            u.clear();
        }

        let mut map: LabelMap<'_, L> = LabelMap::new();
        for label in labels {
            let next = map.len();
            let code = *map.entry(label).or_insert(next);
            if code == next {
                if let Some(u) = uniques.as_deref_mut() {
                    u.push(label.clone());
                }
            }
            self.codes.push(code);
        }

        self.n_groups = map.len();
    }

    /// Per-record group codes.
    #[inline]
    pub fn codes(&self) -> &[usize] {
        &self.codes
    }

    /// Number of distinct labels.
    #[inline]
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Number of records encoded.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether no records are encoded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
