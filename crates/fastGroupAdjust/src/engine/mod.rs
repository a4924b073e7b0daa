//! Layer 5: Engine
//!
//! This layer provides the parallel passes for group adjustment. They plug
//! into the `groupadjust` executor through its pass hooks.

// Parallel execution passes using CPU threads
#[cfg(feature = "cpu")]
pub mod executor;
