//! Common utilities and types shared by the encoder, the fixture model and the reports.
//!
//! This module provides:
//! 1. **Constants:** Byte sizes of every section of the task file layout.
//! 2. **Error Handling:** The `FixtureError` type returned throughout the crate.
//! 3. **Register Management:** The `RegisterBank` written at the head of every task file.

/// Layout and address constants.
pub mod constants;

/// Error type for fixture construction, serialization and parsing.
pub mod error;

/// Register bank written into the task file.
pub mod reg;

pub use constants::{INSTRUCTION_BYTES, REGISTER_BANK_BYTES, WORD_BYTES};
pub use error::FixtureError;
pub use reg::RegisterBank;
