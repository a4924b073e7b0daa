//! Error types for group adjustment.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while adjusting a
//! series against its groupings: shape mismatches between the value series,
//! the groupings and the weight vector, invalid weights, and builder misuse.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending lengths, indices and values.
//! * **Deferred**: Builder errors are detected when `.build()` is called.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Shape mismatch**: Any length or cardinality disagreement among the inputs.
//! 2. **Invalid weight**: A negative or non-finite weight.
//! 3. **Builder misuse**: Missing weights or parameters configured twice.
//!
//! ## Invariants
//!
//! * Missing values are never an error; they propagate silently.
//! * Errors are raised before any computation, so no partial output exists.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for group adjustment operations.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupAdjustError {
    /// At least one grouping (and one weight) is required.
    NoGroupings,

    /// A grouping does not have one label per value.
    MismatchedGroupingLength {
        /// Position of the offending grouping.
        grouping: usize,
        /// Number of values in the series.
        expected: usize,
        /// Number of labels in the grouping.
        got: usize,
    },

    /// The number of weights differs from the number of groupings.
    MismatchedWeights {
        /// Number of groupings supplied.
        groupings: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// Weights must be finite and non-negative.
    InvalidWeight {
        /// Position of the offending weight.
        index: usize,
        /// The offending weight.
        value: f64,
    },

    /// `.build()` was called before `.weights()`.
    MissingWeights,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl GroupAdjustError {
    /// Whether the error reports a length or cardinality mismatch among the inputs.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            Self::NoGroupings | Self::MismatchedGroupingLength { .. } | Self::MismatchedWeights { .. }
        )
    }

    /// Whether the error reports an unusable weight.
    pub fn is_invalid_weight(&self) -> bool {
        matches!(self, Self::InvalidWeight { .. })
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for GroupAdjustError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::NoGroupings => write!(f, "Shape mismatch: at least one grouping is required"),
            Self::MismatchedGroupingLength {
                grouping,
                expected,
                got,
            } => {
                write!(
                    f,
                    "Shape mismatch: grouping {grouping} has {got} labels, values has {expected}"
                )
            }
            Self::MismatchedWeights { groupings, weights } => {
                write!(
                    f,
                    "Shape mismatch: {groupings} groupings but {weights} weights"
                )
            }
            Self::InvalidWeight { index, value } => {
                write!(
                    f,
                    "Invalid weight: weights[{index}]={value} (must be finite and >= 0)"
                )
            }
            Self::MissingWeights => write!(f, "Weights were not configured"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for GroupAdjustError {}
