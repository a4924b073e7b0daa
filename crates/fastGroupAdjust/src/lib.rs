//! # fastGroupAdjust: parallel weighted multi-grouping demeaning
//!
//! A parallel extension of the [`groupadjust`] crate. It keeps the same fluent
//! API and results, runs the per-record passes on all CPU cores with `rayon`,
//! and accepts `ndarray` value series.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastGroupAdjust::prelude::*;
//!
//! let vals: Vec<f64> = vec![1.0, 2.0, 3.0, 8.0, 5.0];
//! let countries = vec!["USA"; 5];
//! let states = vec!["MA", "MA", "MA", "RI", "RI"];
//! let cities = vec!["WEYMOUTH", "BOSTON", "BOSTON", "PROVIDENCE", "PROVIDENCE"];
//!
//! let model = GroupAdjust::new()
//!     .weights(&[0.15, 0.35, 0.5])
//!     .return_diagnostics()
//!     .adapter(Batch)            // parallel by default
//!     .build()?;
//!
//! let result = model.adjust(&vals, &[countries, states, cities])?;
//!
//! assert!((result.adjusted[0] - -0.77).abs() < 1e-9);
//! println!("{}", result);
//! # Result::<(), GroupAdjustError>::Ok(())
//! ```
//!
//! ## Sequential Execution
//!
//! ```rust
//! use fastGroupAdjust::prelude::*;
//!
//! let model = GroupAdjust::new()
//!     .weights(&[1.0])
//!     .adapter(Batch)
//!     .parallel(false)
//!     .build()?;
//!
//! let result = model.adjust(&[1.0, 3.0][..], &[[7, 7]])?;
//! assert_eq!(result.adjusted, vec![-1.0, 1.0]);
//! # Result::<(), GroupAdjustError>::Ok(())
//! ```
//!
//! ## Features
//!
//! * `cpu` (default): rayon-parallel passes. Without it every adapter runs
//!   sequentially.

#![allow(non_snake_case)]

// Layer 5: Engine - parallel passes.
mod engine;

// Layer 6: Adapters - execution mode adapters.
mod adapters;

// High-level fluent API for group adjustment.
mod api;

// Input data handling.
mod input;

// Standard fastGroupAdjust prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, Diagnostics, GroupAdjustBuilder as GroupAdjust, GroupAdjustError,
        GroupAdjustResult, GroupMeans, GroupingSummary, Label, UndefinedMeanPolicy,
        UndefinedMeanPolicy::Propagate, UndefinedMeanPolicy::Skip, group_adjust,
        values_from_options, values_to_options,
    };
    pub use crate::input::AdjustInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
