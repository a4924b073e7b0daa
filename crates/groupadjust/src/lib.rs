//! # groupadjust: weighted multi-grouping demeaning for Rust
//!
//! Demean a numeric series against several categorical groupings at once,
//! blending the group means of each grouping with a fixed weight.
//!
//! ## What is group adjustment?
//!
//! Given values `v`, K groupings (each assigning a label to every record) and
//! weights `w_1..w_K`, each record is adjusted as
//!
//! ```text
//! out[i] = v[i] - Σ_k w_k · mean_k(group of record i in grouping k)
//! ```
//!
//! where `mean_k(g)` is the mean of the non-missing values in group `g` of
//! grouping `k`. A value can thus be normalized relative to its country and
//! its state simultaneously, with a user-chosen blend of the two.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use groupadjust::prelude::*;
//!
//! let vals = vec![1.0, 2.0, 3.0];
//! let countries = vec!["USA", "USA", "USA"];
//! let states = vec!["MA", "MA", "CT"];
//!
//! // Build the model
//! let model = GroupAdjust::new()
//!     .weights(&[0.35, 0.65])  // one weight per grouping
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Adjust the series
//! let result = model.adjust(&vals, &[countries, states])?;
//!
//! println!("{}", result);
//! # Result::<(), GroupAdjustError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Records:   3
//!   Groupings: 2
//!   Weights:   0.35 0.65
//!
//! Adjusted Data:
//!    Index     Adjusted
//! ---------------------
//!        0    -0.675000
//!        1     0.325000
//!        2     0.350000
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use groupadjust::prelude::*;
//!
//! let vals = values_from_options(&[Some(1.0f64), None, Some(3.0), Some(5.0), Some(8.0), Some(7.0)]);
//! let countries = vec!["USA", "USA", "USA", "USA", "USA", "USA"];
//! let states = vec!["MA", "RI", "RI", "CT", "CT", "CT"];
//!
//! let model = GroupAdjust::new()
//!     .weights(&[0.35, 0.65])
//!     .undefined_mean(Skip)       // drop undefined means from the blend
//!     .return_weighted_means()    // keep what was subtracted
//!     .return_group_means()       // keep per-grouping mean tables
//!     .return_diagnostics()       // summary statistics
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = model.adjust(&vals, &[countries, states])?;
//!
//! assert!(result.adjusted[1].is_nan());
//! assert_eq!(result.to_options()[1], None);
//! println!("{}", result);
//! # Result::<(), GroupAdjustError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `adjust` returns a `Result<GroupAdjustResult<T, L>, GroupAdjustError>`.
//!
//! - **`Ok(GroupAdjustResult)`**: The adjusted series plus any requested extras.
//! - **`Err(GroupAdjustError)`**: A shape mismatch (grouping length, weight
//!   count) or an invalid weight. Validation happens before any computation.
//!
//! Missing values never raise: a missing input yields a missing output, and a
//! group with no non-missing values has an undefined (NaN) mean.
//!
//! For the common case, [`prelude::group_adjust`] does it all in one call:
//!
//! ```rust
//! use groupadjust::prelude::*;
//!
//! let out = group_adjust(&[1.0, 2.0, 3.0], &[[1, 1, 2]], &[1.0])?;
//! assert_eq!(out, vec![-0.5, 0.5, 0.0]);
//! # Result::<(), GroupAdjustError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! Disable default features to remove the standard library dependency. Labels
//! then need `Ord` instead of `Hash`:
//!
//! ```toml
//! [dependencies]
//! groupadjust = { version = "0.1", default-features = false }
//! ```
//!
//! ## Parallel Execution
//!
//! The `fastGroupAdjust` crate plugs rayon-parallel passes into this engine
//! and accepts `ndarray` inputs, behind the same builder API.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - group accumulators.
mod math;

// Layer 3: Algorithms - mean, combination and demean passes.
mod algorithms;

// Layer 4: Evaluation - diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for group adjustment.
mod api;

// Standard group adjustment prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, Diagnostics, GroupAdjustBuilder as GroupAdjust, GroupAdjustError,
        GroupAdjustResult, GroupMeans, GroupingSummary, Label, UndefinedMeanPolicy,
        UndefinedMeanPolicy::Propagate, UndefinedMeanPolicy::Skip, group_adjust,
        values_from_options, values_to_options,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
