//! Input abstractions for group adjustment.
//!
//! ## Purpose
//!
//! This module lets `adjust` take its value series as a slice, a vector or a
//! 1-D `ndarray` array through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy**: Every implementation hands out a view of the existing buffer.
//! * **Fail-fast validation**: Non-contiguous arrays are rejected before processing.
//!
//! ## Invariants
//!
//! * Returned slices cover every element of the input, in order.
//!
//! ## Non-goals
//!
//! * This module does not convert label containers; groupings are plain slices.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Export dependencies from groupadjust crate
use groupadjust::internals::primitives::errors::GroupAdjustError;

/// Trait for value series accepted by `adjust`.
pub trait AdjustInput<T: Float> {
    /// View the input as a contiguous slice.
    fn as_adjust_slice(&self) -> Result<&[T], GroupAdjustError>;
}

impl<T: Float> AdjustInput<T> for [T] {
    fn as_adjust_slice(&self) -> Result<&[T], GroupAdjustError> {
        Ok(self)
    }
}

impl<T: Float> AdjustInput<T> for Vec<T> {
    fn as_adjust_slice(&self) -> Result<&[T], GroupAdjustError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> AdjustInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_adjust_slice(&self) -> Result<&[T], GroupAdjustError> {
        self.as_slice().ok_or_else(|| {
            GroupAdjustError::InvalidInput("ndarray values must be contiguous in memory".to_string())
        })
    }
}
