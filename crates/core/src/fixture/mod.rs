//! Task file model.
//!
//! A task file is built in two phases. `FixtureBuilder` collects register values,
//! tagged instructions and data words, then `build()` validates and encodes
//! everything and derives the return address before a single byte is written.
//! The resulting `Fixture` is immutable and serializes in one linear pass:
//! 1. **Registers:** PC, then x1 (return address) and x2..x31.
//! 2. **Code:** One segment header followed by the instruction words.
//! 3. **Data:** One `(address, 4, value)` triple per data word.

/// Two-phase fixture construction and immediate policy.
pub mod builder;

/// Reader for serialized task files.
pub mod image;

/// Code and data segments.
pub mod segment;

/// Serialization and atomic file output.
pub mod writer;

pub use builder::FixtureBuilder;
pub use image::{Fragment, TaskImage};
pub use segment::{CodeSegment, DataSegment};

use crate::common::RegisterBank;
use crate::isa::instruction::Instruction;

/// A fully encoded task file, ready to serialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pc: u32,
    registers: RegisterBank,
    code: CodeSegment,
    data: Vec<DataSegment>,
    program: Vec<Instruction>,
}

impl Fixture {
    /// Initial program counter (the code base).
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    /// Address execution returns to once it falls off the end of the code block.
    pub fn return_address(&self) -> u32 {
        self.registers.read(crate::isa::abi::REG_RA as usize)
    }

    /// Initial register state.
    pub const fn registers(&self) -> &RegisterBank {
        &self.registers
    }

    /// The code segment.
    pub const fn code(&self) -> &CodeSegment {
        &self.code
    }

    /// Data segments in caller order.
    pub fn data(&self) -> &[DataSegment] {
        &self.data
    }

    /// Instructions after immediate policy was applied, one per code word.
    pub fn program(&self) -> &[Instruction] {
        &self.program
    }
}
