//! Fixture error definitions.
//!
//! This module defines the single error type returned by the library. It covers:
//! 1. **Instruction Validation:** Register indices, fixed-width fields and immediates.
//! 2. **Layout Failures:** Reserved registers, address overflow, invalid cache geometry.
//! 3. **Image Parsing:** Truncated task files.
//! 4. **I/O and Configuration:** File and JSON failures, carried unmodified.

use std::io;

use thiserror::Error;

use crate::isa::instruction::Format;

/// Errors produced while building, writing or reading a task file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A register operand does not name one of x0..x31.
    #[error("register index {index} is out of range (x0..x31)")]
    InvalidRegister {
        /// The offending register index.
        index: u32,
    },

    /// A register was given an initial value but is owned by the generator.
    #[error("register x{index} is reserved and cannot be overridden")]
    ReservedRegister {
        /// The reserved register index.
        index: u32,
    },

    /// An opcode or function-code value exceeds its field width.
    #[error("{field} value {value:#x} exceeds {bits}-bit field")]
    FieldOverflow {
        /// Field name (`opcode`, `funct3`, `funct7`).
        field: &'static str,
        /// The offending value.
        value: u32,
        /// Width of the field in bits.
        bits: u32,
    },

    /// An immediate does not fit its format under the strict or expand policy.
    #[error("{format} immediate {imm} ({imm:#x}) does not fit in {bits} signed bits")]
    ImmediateOutOfRange {
        /// Format of the instruction carrying the immediate.
        format: Format,
        /// The requested immediate.
        imm: i32,
        /// Width of the signed immediate field.
        bits: u32,
    },

    /// A branch offset is odd; bit 0 cannot be encoded.
    #[error("branch offset {imm} is not a multiple of 2")]
    MisalignedBranch {
        /// The requested offset.
        imm: i32,
    },

    /// Base address plus code length wraps past the 32-bit address space.
    #[error("code segment at {base:#x} with {len} bytes overflows the address space")]
    AddressOverflow {
        /// Code base address.
        base: u32,
        /// Code length in bytes.
        len: u64,
    },

    /// A cache geometry parameter is zero or not a power of two.
    #[error("invalid cache geometry: {0}")]
    InvalidGeometry(String),

    /// A task image ended before a complete header or payload could be read.
    #[error("truncated task image at offset {offset}: need {needed} more bytes, {available} available")]
    TruncatedImage {
        /// Byte offset where the read started.
        offset: usize,
        /// Bytes required to finish the read.
        needed: usize,
        /// Bytes remaining in the image.
        available: usize,
    },

    /// The configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Underlying I/O failure, propagated unmodified.
    #[error(transparent)]
    Io(#[from] io::Error),
}
