//! Expected-outcome analysis.
//!
//! Predicts how a fixture will exercise the simulator's cache:
//! 1. **Trace:** Straight-line walk of the encoded program producing fetch, load and store accesses.
//! 2. **Report:** Replay through the advisory LRU model with separate instruction and data hit rates.

/// Straight-line program trace.
pub mod trace;

/// Hit-rate report built from a trace.
pub mod report;

pub use report::{AccessRecord, ExpectedReport, HitRate, analyze};
pub use trace::{Access, AccessKind, Trace};
