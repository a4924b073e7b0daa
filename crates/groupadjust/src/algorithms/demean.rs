//! Demeaning: subtract the weighted mean from each value.
//!
//! ## Purpose
//!
//! Final pass of an adjustment. It overwrites the weighted-mean buffer with
//! `values[i] - weighted[i]`, reusing the buffer as the output series.
//!
//! ## Invariants
//!
//! * A missing value yields a missing output.
//! * An undefined weighted mean yields a missing output.

// External dependencies
use num_traits::Float;

/// Replace each weighted mean with the demeaned value, in place.
pub fn demean_pass<T: Float>(values: &[T], weighted: &mut [T]) {
    for (out, &v) in weighted.iter_mut().zip(values.iter()) {
        *out = demean_one(v, *out);
    }
}

/// Demean a single record.
#[inline]
pub fn demean_one<T: Float>(value: T, weighted_mean: T) -> T {
    if value.is_nan() || weighted_mean.is_nan() {
        T::nan()
    } else {
        value - weighted_mean
    }
}
