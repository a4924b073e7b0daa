//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer provides post-processing summaries of an adjustment.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Adjustment diagnostics.
pub mod diagnostics;
