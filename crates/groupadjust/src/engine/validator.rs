//! Input validation for group adjustment configuration and data.
//!
//! ## Purpose
//!
//! This module checks the shape of the inputs (one label per value in every
//! grouping, one weight per grouping, at least one grouping) and the weights
//! themselves before any computation starts.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types and label types.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//! * Values are never validated: NaN is the missing marker, not an error.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights or repair inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::GroupAdjustError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for group adjustment inputs.
///
/// All methods return `Result<(), GroupAdjustError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate that `n_values` records, `groupings` and `n_weights` weights line up.
    pub fn validate_shapes<L, G: AsRef<[L]>>(
        n_values: usize,
        groupings: &[G],
        n_weights: usize,
    ) -> Result<(), GroupAdjustError> {
        // Check 1: At least one grouping
        if groupings.is_empty() {
            return Err(GroupAdjustError::NoGroupings);
        }

        // Check 2: One weight per grouping
        if groupings.len() != n_weights {
            return Err(GroupAdjustError::MismatchedWeights {
                groupings: groupings.len(),
                weights: n_weights,
            });
        }

        // Check 3: One label per value in every grouping
        for (k, g) in groupings.iter().enumerate() {
            let got = g.as_ref().len();
            if got != n_values {
                return Err(GroupAdjustError::MismatchedGroupingLength {
                    grouping: k,
                    expected: n_values,
                    got,
                });
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the weight vector.
    ///
    /// # Notes
    ///
    /// * Weights must be finite and non-negative.
    /// * Weights are not required to sum to one.
    pub fn validate_weights<T: Float>(weights: &[T]) -> Result<(), GroupAdjustError> {
        if weights.is_empty() {
            return Err(GroupAdjustError::NoGroupings);
        }

        for (index, &w) in weights.iter().enumerate() {
            if !w.is_finite() || w < T::zero() {
                return Err(GroupAdjustError::InvalidWeight {
                    index,
                    value: w.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), GroupAdjustError> {
        if let Some(param) = duplicate_param {
            return Err(GroupAdjustError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
