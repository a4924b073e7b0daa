//! High-level API for group adjustment with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for parallel group
//! adjustment. It extends the `groupadjust` API with a batch adapter that uses
//! all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `groupadjust` builder pattern.
//! * **Parallel-First**: The `Batch` marker defaults to parallel execution.
//! * **Transparent**: Results match the sequential engine.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`GroupAdjustBuilder`] via `GroupAdjust::new()`.
//! 2. Chain configuration methods (`.weights()`, `.undefined_mean()`, etc.).
//! 3. Select an adapter via `.adapter(Batch)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use groupadjust::internals::api::Batch as BaseBatch;

// Internal dependencies
use crate::adapters::batch::ParallelBatchGroupAdjustBuilder;
use crate::input::AdjustInput;

// Publicly re-exported types
pub use groupadjust::internals::algorithms::combination::UndefinedMeanPolicy;
pub use groupadjust::internals::algorithms::group_means::GroupMeans;
pub use groupadjust::internals::api::{GroupAdjustAdapter, GroupAdjustBuilder};
pub use groupadjust::internals::engine::output::GroupAdjustResult;
pub use groupadjust::internals::evaluation::diagnostics::{Diagnostics, GroupingSummary};
pub use groupadjust::internals::primitives::errors::GroupAdjustError;
pub use groupadjust::internals::primitives::labels::Label;
pub use groupadjust::internals::primitives::missing::{values_from_options, values_to_options};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> GroupAdjustAdapter<T> for Batch {
    type Output = ParallelBatchGroupAdjustBuilder<T>;

    fn convert(builder: GroupAdjustBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastGroupAdjust Batch
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseBatch as GroupAdjustAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelBatchGroupAdjustBuilder { base }
    }
}

// ============================================================================
// One-shot API
// ============================================================================

/// Demean `values` against `groupings` in parallel.
///
/// ```rust
/// use fastGroupAdjust::prelude::*;
/// use ndarray::array;
///
/// let vals = array![1.0f64, 2.0, 3.0];
/// let out = group_adjust(&vals, &[["USA"; 3], ["MA", "MA", "CT"]], &[0.35, 0.65])?;
/// assert!((out[2] - 0.35).abs() < 1e-12);
/// # Result::<(), GroupAdjustError>::Ok(())
/// ```
pub fn group_adjust<T, V, L, G>(
    values: &V,
    groupings: &[G],
    weights: &[T],
) -> Result<Vec<T>, GroupAdjustError>
where
    T: Float + Send + Sync + 'static,
    V: AdjustInput<T> + ?Sized,
    L: Label,
    G: AsRef<[L]>,
{
    let model = GroupAdjustBuilder::new()
        .weights(weights)
        .adapter(Batch)
        .build()?;

    Ok(model.adjust(values, groupings)?.into_adjusted())
}
