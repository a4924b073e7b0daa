//! Missing-value representation.
//!
//! ## Purpose
//!
//! Value series mark missing entries with NaN. This module converts between
//! that representation and `Option`-based series for callers whose data
//! carries explicit nulls.
//!
//! ## Invariants
//!
//! * `None` maps to NaN and NaN maps to `None`; every other value is kept as is.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Whether a value is the missing marker.
#[inline]
pub fn is_missing<T: Float>(value: T) -> bool {
    value.is_nan()
}

/// Convert an `Option` series into a NaN-marked series.
pub fn values_from_options<T: Float>(values: &[Option<T>]) -> Vec<T> {
    values.iter().map(|v| v.unwrap_or_else(T::nan)).collect()
}

/// Convert a NaN-marked series into an `Option` series.
pub fn values_to_options<T: Float>(values: &[T]) -> Vec<Option<T>> {
    values
        .iter()
        .map(|&v| if is_missing(v) { None } else { Some(v) })
        .collect()
}

/// Count missing entries.
pub fn count_missing<T: Float>(values: &[T]) -> usize {
    values.iter().filter(|&&v| is_missing(v)).count()
}
