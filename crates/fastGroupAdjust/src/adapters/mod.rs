//! Layer 6: Adapters
//!
//! This layer provides the user-facing batch adapter, which runs the
//! `groupadjust` engine with parallel or sequential passes.

// Unified batch adapter for group adjustment.
pub mod batch;
