//! Batch adapter for group adjustment.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: the whole series and all
//! groupings are in memory and the adjustment runs in a single call.
//!
//! ## Design notes
//!
//! * **Processing**: Validates, executes, and packages the result.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Reusable**: A built processor can adjust any number of datasets.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible defaults.
//! * **Deferred Validation**: Weights are checked at `build()`, shapes at `adjust()`.
//!
//! ## Invariants
//!
//! * Every grouping has one label per value.
//! * There is one finite, non-negative weight per grouping.
//! * Output order matches input order.
//!
//! ## Non-goals
//!
//! * This adapter does not handle data that does not fit in memory.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::combination::UndefinedMeanPolicy;
use crate::engine::executor::{AdjustConfig, CombinePassFn, DemeanPassFn, MeanPassFn};
use crate::engine::executor::GroupAdjustExecutor;
use crate::engine::output::GroupAdjustResult;
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::Diagnostics;
use crate::primitives::errors::GroupAdjustError;
use crate::primitives::labels::Label;

// ============================================================================
// Batch Group Adjust Builder
// ============================================================================

/// Builder for batch group adjustment processor.
#[derive(Debug, Clone)]
pub struct BatchGroupAdjustBuilder<T: Float> {
    /// One weight per grouping
    pub weights: Option<Vec<T>>,

    /// Treatment of undefined group means
    pub undefined_mean: UndefinedMeanPolicy,

    /// Whether to return the weighted means
    pub return_weighted_means: bool,

    /// Whether to return the mean table of each grouping
    pub return_group_means: bool,

    /// Whether to compute diagnostic statistics
    pub return_diagnostics: bool,

    /// Deferred error from adapter conversion
    pub deferred_error: Option<GroupAdjustError>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
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

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchGroupAdjustBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchGroupAdjustBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            weights: None,
            undefined_mean: UndefinedMeanPolicy::default(),
            return_weighted_means: false,
            return_group_means: false,
            return_diagnostics: false,
            deferred_error: None,
            custom_mean_pass: None,
            custom_combine_pass: None,
            custom_demean_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the weight of each grouping.
    pub fn weights(mut self, weights: &[T]) -> Self {
        self.weights = Some(weights.to_vec());
        self
    }

    /// Set the treatment of undefined group means.
    pub fn undefined_mean(mut self, policy: UndefinedMeanPolicy) -> Self {
        self.undefined_mean = policy;
        self
    }

    /// Enable returning the weighted means in the result.
    pub fn return_weighted_means(mut self, enabled: bool) -> Self {
        self.return_weighted_means = enabled;
        self
    }

    /// Enable returning the mean table of each grouping in the result.
    pub fn return_group_means(mut self, enabled: bool) -> Self {
        self.return_group_means = enabled;
        self
    }

    /// Enable returning diagnostics in the result.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.return_diagnostics = enabled;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom mean pass function.
    #[doc(hidden)]
    pub fn custom_mean_pass(mut self, pass: MeanPassFn<T>) -> Self {
        self.custom_mean_pass = Some(pass);
        self
    }

    /// Set a custom combine pass function.
    #[doc(hidden)]
    pub fn custom_combine_pass(mut self, pass: CombinePassFn<T>) -> Self {
        self.custom_combine_pass = Some(pass);
        self
    }

    /// Set a custom demean pass function.
    #[doc(hidden)]
    pub fn custom_demean_pass(mut self, pass: DemeanPassFn<T>) -> Self {
        self.custom_demean_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchGroupAdjust<T>, GroupAdjustError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate weights
        let weights = self.weights.as_deref().ok_or(GroupAdjustError::MissingWeights)?;
        Validator::validate_weights(weights)?;

        Ok(BatchGroupAdjust { config: self })
    }
}

// ============================================================================
// Batch Group Adjust Processor
// ============================================================================

/// Batch group adjustment processor.
#[derive(Debug, Clone)]
pub struct BatchGroupAdjust<T: Float> {
    config: BatchGroupAdjustBuilder<T>,
}

impl<T: Float> BatchGroupAdjust<T> {
    /// Weights this processor applies.
    pub fn weights(&self) -> &[T] {
        self.config.weights.as_deref().unwrap_or(&[])
    }

    /// Adjust `values` against `groupings`.
    ///
    /// Each grouping holds one label per value; missing values are NaN.
    pub fn adjust<L, G>(
        &self,
        values: &[T],
        groupings: &[G],
    ) -> Result<GroupAdjustResult<T, L>, GroupAdjustError>
    where
        L: Label,
        G: AsRef<[L]>,
    {
        let weights = self.weights();
        Validator::validate_shapes(values.len(), groupings, weights.len())?;

        let config = AdjustConfig {
            weights: weights.to_vec(),
            undefined_mean: self.config.undefined_mean,
            return_weighted_means: self.config.return_weighted_means,
            return_group_means: self.config.return_group_means,
            // ++++++++++++++++++++++++++++++++++++++
            // +               DEV                  +
            // ++++++++++++++++++++++++++++++++++++++
            custom_mean_pass: self.config.custom_mean_pass,
            custom_combine_pass: self.config.custom_combine_pass,
            custom_demean_pass: self.config.custom_demean_pass,
        };

        let result = GroupAdjustExecutor::run_with_config(values, groupings, &config);

        let diagnostics = if self.config.return_diagnostics {
            Some(Diagnostics::compute(
                values,
                &result.adjusted,
                weights,
                result.groupings,
            ))
        } else {
            None
        };

        Ok(GroupAdjustResult {
            adjusted: result.adjusted,
            weighted_means: result.weighted_means,
            group_means: result.group_means,
            diagnostics,
            weights: config.weights,
        })
    }
}
