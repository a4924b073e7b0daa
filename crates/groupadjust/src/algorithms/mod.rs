//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the three passes of a group adjustment: group means,
//! weighted combination, and demeaning.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Group means of one grouping.
pub mod group_means;

/// Weighted combination of group means.
pub mod combination;

/// Demeaning.
pub mod demean;
