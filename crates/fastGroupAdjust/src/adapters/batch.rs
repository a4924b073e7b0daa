//! Batch adapter for group adjustment with parallel execution.
//!
//! ## Purpose
//!
//! This module wraps the `groupadjust` batch adapter and injects the parallel
//! passes from this crate's engine when parallel execution is enabled.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation and orchestration stay in the base adapter.
//! * **Parallelism**: Adds parallel execution via `rayon`.
//! * **Inputs**: Value series may be slices, vectors or 1-D `ndarray` arrays.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Every grouping has one label per value.
//! * Output order matches input order.
//! * Parallel and sequential execution agree up to floating-point summation order.
//!
//! ## Non-goals
//!
//! * This adapter does not handle data that does not fit in memory.

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::{combine_pass_parallel, demean_pass_parallel, mean_pass_parallel};

// External dependencies
use num_traits::Float;
use std::result::Result;

// Export dependencies from groupadjust crate
use groupadjust::internals::adapters::batch::{BatchGroupAdjust, BatchGroupAdjustBuilder};
use groupadjust::internals::algorithms::combination::UndefinedMeanPolicy;
use groupadjust::internals::engine::output::GroupAdjustResult;
use groupadjust::internals::primitives::errors::GroupAdjustError;
use groupadjust::internals::primitives::labels::Label;

// Internal dependencies
use crate::input::AdjustInput;

// ============================================================================
// Extended Batch Group Adjust Builder
// ============================================================================

/// Builder for batch group adjustment processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchGroupAdjustBuilder<T: Float> {
    /// Base builder from the groupadjust crate
    pub base: BatchGroupAdjustBuilder<T>,
}

impl<T: Float> Default for ParallelBatchGroupAdjustBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelBatchGroupAdjustBuilder<T> {
    /// Create a new builder with default parameters and parallel execution on.
    fn new() -> Self {
        let base = BatchGroupAdjustBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the weight of each grouping.
    pub fn weights(mut self, weights: &[T]) -> Self {
        self.base = self.base.weights(weights);
        self
    }

    /// Set the treatment of undefined group means.
    pub fn undefined_mean(mut self, policy: UndefinedMeanPolicy) -> Self {
        self.base = self.base.undefined_mean(policy);
        self
    }

    /// Enable returning the weighted means in the result.
    pub fn return_weighted_means(mut self, enabled: bool) -> Self {
        self.base = self.base.return_weighted_means(enabled);
        self
    }

    /// Enable returning the mean table of each grouping in the result.
    pub fn return_group_means(mut self, enabled: bool) -> Self {
        self.base = self.base.return_group_means(enabled);
        self
    }

    /// Enable returning diagnostics in the result.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.base = self.base.return_diagnostics(enabled);
        self
    }
}

impl<T: Float + Send + Sync + 'static> ParallelBatchGroupAdjustBuilder<T> {
    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    ///
    /// The base processor is validated and configured once here; `adjust`
    /// reuses it.
    pub fn build(self) -> Result<ParallelBatchGroupAdjust<T>, GroupAdjustError> {
        // Check for deferred errors from adapter conversion
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        let parallel = cfg!(feature = "cpu") && self.base.parallel.unwrap_or(true);
        let mut builder = self.base;

        // Configure the base builder with parallel passes if enabled
        #[cfg(feature = "cpu")]
        {
            if parallel {
                builder = builder
                    .custom_mean_pass(mean_pass_parallel)
                    .custom_combine_pass(combine_pass_parallel)
                    .custom_demean_pass(demean_pass_parallel);
            }
        }

        if !parallel {
            builder.custom_mean_pass = None;
            builder.custom_combine_pass = None;
            builder.custom_demean_pass = None;
        }

        let processor = builder.build()?;

        Ok(ParallelBatchGroupAdjust {
            processor,
            parallel,
        })
    }
}

// ============================================================================
// Extended Batch Group Adjust Processor
// ============================================================================

/// Batch group adjustment processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelBatchGroupAdjust<T: Float> {
    processor: BatchGroupAdjust<T>,
    parallel: bool,
}

impl<T: Float> ParallelBatchGroupAdjust<T> {
    /// Whether the parallel passes will be used.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Weights this processor applies.
    pub fn weights(&self) -> &[T] {
        self.processor.weights()
    }

    /// Adjust `values` against `groupings`.
    pub fn adjust<V, L, G>(
        &self,
        values: &V,
        groupings: &[G],
    ) -> Result<GroupAdjustResult<T, L>, GroupAdjustError>
    where
        V: AdjustInput<T> + ?Sized,
        L: Label,
        G: AsRef<[L]>,
    {
        let values = values.as_adjust_slice()?;

        // Delegate execution to the validated base processor
        self.processor.adjust(values, groupings)
    }
}
