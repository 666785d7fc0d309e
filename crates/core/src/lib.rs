//! RISC-V cache test-vector generator library.
//!
//! This crate builds the binary task files consumed by an external RISC-V cache
//! simulator. It provides the following:
//! 1. **ISA:** Bit-exact encoders for the R, I, S and B instruction formats, plus decode and disassembly.
//! 2. **Fixture:** A two-phase builder that validates, encodes and lays out registers, code and data.
//! 3. **Image:** A reader for the task file layout, used for inspection and verification.
//! 4. **Cache:** Address decomposition under the simulator's cache geometry.
//! 5. **Analysis:** An advisory report of the hit/miss pattern a fixture is engineered to produce.

/// Common types and constants (layout sizes, errors, register bank).
pub mod common;
/// Generator configuration (defaults, immediate policy, JSON loading).
pub mod config;
/// Instruction set (encoders, tagged instructions, decode, disassembly, RV32I constants).
pub mod isa;
/// Task file model: segments, builder, serializer and image reader.
pub mod fixture;
/// Cache geometry and the advisory replacement model used for reporting.
pub mod cache;
/// Program trace and expected hit/miss reporting.
pub mod analysis;
/// Stock hit-rate scenario.
pub mod scenario;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Library error type.
pub use crate::common::FixtureError;
/// Immutable, fully encoded task file; construct with `FixtureBuilder`.
pub use crate::fixture::{Fixture, FixtureBuilder};
/// Tagged instruction, one variant per encoding format.
pub use crate::isa::instruction::Instruction;
