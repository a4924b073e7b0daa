//! High-level API for group adjustment.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points: a fluent
//! builder for configuring the adjustment and choosing an execution adapter,
//! and the one-shot [`group_adjust`] function for the common case.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults; only `weights` is required.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GroupAdjustBuilder`] via `GroupAdjust::new()`.
//! 2. Chain configuration methods (`.weights()`, `.undefined_mean()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.
//! 4. Call `.build()?` and then `.adjust(&values, &groupings)?`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchGroupAdjustBuilder;
use crate::engine::executor::{CombinePassFn, DemeanPassFn, MeanPassFn};

// Publicly re-exported types
pub use crate::algorithms::combination::UndefinedMeanPolicy;
pub use crate::algorithms::group_means::GroupMeans;
pub use crate::engine::output::GroupAdjustResult;
pub use crate::evaluation::diagnostics::{Diagnostics, GroupingSummary};
pub use crate::primitives::errors::GroupAdjustError;
pub use crate::primitives::labels::Label;
pub use crate::primitives::missing::{values_from_options, values_to_options};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring group adjustment.
#[derive(Debug, Clone)]
pub struct GroupAdjustBuilder<T> {
    /// One weight per grouping.
    pub weights: Option<Vec<T>>,

    /// Treatment of undefined group means (default: Propagate).
    pub undefined_mean: Option<UndefinedMeanPolicy>,

    /// Return the per-record weighted means.
    pub return_weighted_means: Option<bool>,

    /// Return the mean table of each grouping.
    pub return_group_means: Option<bool>,

    /// Enable diagnostics.
    pub return_diagnostics: Option<bool>,

    // ======================================
    // DEV
    // ======================================
    /// Custom mean pass function.
    #[doc(hidden)]
    pub custom_mean_pass: Option<MeanPassFn<T>>,

    /// Custom combine pass function.
    #[doc(hidden)]
    pub custom_combine_pass: Option<CombinePassFn<T>>,

    /// Custom demean pass function.
    #[doc(hidden)]
    pub custom_demean_pass: Option<DemeanPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for GroupAdjustBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> GroupAdjustBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: GroupAdjustAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            weights: None,
            undefined_mean: None,
            return_weighted_means: None,
            return_group_means: None,
            return_diagnostics: None,
            custom_mean_pass: None,
            custom_combine_pass: None,
            custom_demean_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the weight of each grouping.
    ///
    /// Weights are used as given; they are not required to sum to 1 and are
    /// never normalized.
    pub fn weights(mut self, weights: &[T]) -> Self {
        if self.weights.is_some() {
            self.duplicate_param = Some("weights");
        }
        self.weights = Some(weights.to_vec());
        self
    }

    /// Set the treatment of undefined group means.
    pub fn undefined_mean(mut self, policy: UndefinedMeanPolicy) -> Self {
        if self.undefined_mean.is_some() {
            self.duplicate_param = Some("undefined_mean");
        }
        self.undefined_mean = Some(policy);
        self
    }

    /// Include the per-record weighted means in output.
    pub fn return_weighted_means(mut self) -> Self {
        self.return_weighted_means = Some(true);
        self
    }

    /// Include the mean table of each grouping in output.
    pub fn return_group_means(mut self) -> Self {
        self.return_group_means = Some(true);
        self
    }

    /// Enable diagnostics in output.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = Some(true);
        self
    }

    // ======================================
    // DEV
    // ======================================

    /// Set a custom mean pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_mean_pass(mut self, pass: MeanPassFn<T>) -> Self {
        self.custom_mean_pass = Some(pass);
        self
    }

    /// Set a custom combine pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_combine_pass(mut self, pass: CombinePassFn<T>) -> Self {
        self.custom_combine_pass = Some(pass);
        self
    }

    /// Set a custom demean pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_demean_pass(mut self, pass: DemeanPassFn<T>) -> Self {
        self.custom_demean_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait GroupAdjustAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`GroupAdjustBuilder`] into a specialized execution builder.
    fn convert(builder: GroupAdjustBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> GroupAdjustAdapter<T> for Batch {
    type Output = BatchGroupAdjustBuilder<T>;

    fn convert(builder: GroupAdjustBuilder<T>) -> Self::Output {
        let mut result = BatchGroupAdjustBuilder::default();

        result.weights = builder.weights;
        if let Some(policy) = builder.undefined_mean {
            result.undefined_mean = policy;
        }
        if let Some(wm) = builder.return_weighted_means {
            result.return_weighted_means = wm;
        }
        if let Some(gm) = builder.return_group_means {
            result.return_group_means = gm;
        }
        if let Some(rd) = builder.return_diagnostics {
            result.return_diagnostics = rd;
        }

        // ======================================
        // DEV
        // ======================================
        result.custom_mean_pass = builder.custom_mean_pass;
        result.custom_combine_pass = builder.custom_combine_pass;
        result.custom_demean_pass = builder.custom_demean_pass;
        result.parallel = builder.parallel;

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

// ============================================================================
// One-shot API
// ============================================================================

/// Demean `values` against `groupings` with one weight per grouping.
///
/// Equivalent to building a batch processor with `weights` and calling
/// `adjust`, returning only the adjusted series.
///
/// ```rust
/// use groupadjust::prelude::*;
///
/// let vals = [1.0f64, 2.0, 3.0];
/// let countries = ["USA", "USA", "USA"];
/// let states = ["MA", "MA", "CT"];
///
/// let out = group_adjust(&vals, &[countries, states], &[0.35, 0.65])?;
/// assert!((out[0] - -0.675).abs() < 1e-12);
/// # Result::<(), GroupAdjustError>::Ok(())
/// ```
pub fn group_adjust<T, L, G>(
    values: &[T],
    groupings: &[G],
    weights: &[T],
) -> Result<Vec<T>, GroupAdjustError>
where
    T: Float,
    L: Label,
    G: AsRef<[L]>,
{
    let model = GroupAdjustBuilder::new()
        .weights(weights)
        .adapter(Batch)
        .build()?;

    Ok(model.adjust(values, groupings)?.into_adjusted())
}
