//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the adjustment by coordinating the primitives
//! (label encoding, buffers) and the algorithms (group means, combination,
//! demeaning). It also validates inputs and defines the result type.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Unified execution engine for group adjustment.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for group adjustment.
pub mod output;
