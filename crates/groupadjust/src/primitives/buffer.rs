//! Working memory for a group adjustment.
//!
//! ## Purpose
//!
//! This module holds the scratch space one adjustment needs, allocated once
//! per call: the running weighted-mean series, the per-record "has a defined
//! contribution" flags used by the skipping policy, and a code buffer that is
//! refilled for each grouping in turn.
//!
//! ## Design notes
//!
//! * **Incremental**: Group means are folded into `weighted` one grouping at a
//!   time, so K groupings never materialize K series of means.
//! * **Reused codes**: The same `GroupIndex` is re-encoded for every grouping.
//! * **Lazy flags**: `defined` is only allocated when the policy needs it.
//!
//! ## Invariants
//!
//! * `weighted.len()` equals the number of records.
//! * `defined` is either empty or has one flag per record.
//!
//! ## Non-goals
//!
//! * Buffers do not outlive a single call; there is no cross-call caching.

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
use num_traits::Zero;

// Internal dependencies
use crate::primitives::labels::GroupIndex;

// ============================================================================
// Adjustment Buffer
// ============================================================================

/// Scratch space for one adjustment.
#[derive(Debug, Clone)]
pub struct AdjustBuffer<T> {
    /// Running weighted mean per record; holds the adjusted series once demeaned.
    pub weighted: Vec<T>,

    /// Per-record flag: at least one defined group mean was folded in.
    pub defined: Vec<bool>,

    /// Codes of the grouping currently being processed.
    pub index: GroupIndex,
}

impl<T: Zero + Clone> AdjustBuffer<T> {
    /// Allocate buffers for `n` records.
    pub fn new(n: usize, track_defined: bool) -> Self {
        Self {
            weighted: vec![T::zero(); n],
            defined: if track_defined {
                vec![false; n]
            } else {
                Vec::new()
            },
            index: GroupIndex::with_capacity(n),
        }
    }

    /// Number of records the buffer was sized for.
    #[inline]
    pub fn len(&self) -> usize {
        self.weighted.len()
    }

    /// Whether the buffer holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weighted.is_empty()
    }
}
