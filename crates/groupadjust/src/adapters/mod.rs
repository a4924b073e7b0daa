//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides the user-facing execution adapters built on top of the
//! engine layer:
//!
//! - **Batch**: In-memory adjustment of a complete series
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Batch adapter for group adjustment.
pub mod batch;
