//! Code and data segments of a task file.

use crate::common::constants::{DATA_SEGMENT_LEN, INSTRUCTION_BYTES};

/// A contiguous block of encoded instructions.
///
/// Invariant: the serialized byte length is `4 × words.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSegment {
    /// Load address of the first instruction.
    pub base: u32,
    /// Encoded instruction words in program order.
    pub words: Vec<u32>,
}

impl CodeSegment {
    /// Creates a code segment from already encoded words.
    pub const fn new(base: u32, words: Vec<u32>) -> Self {
        Self { base, words }
    }

    /// Byte length of the segment as a 64-bit value (never overflows).
    pub const fn byte_len(&self) -> u64 {
        self.words.len() as u64 * INSTRUCTION_BYTES as u64
    }

    /// Number of instructions.
    pub const fn instruction_count(&self) -> usize {
        self.words.len()
    }

    /// Address of instruction `index`.
    pub const fn address_of(&self, index: usize) -> u32 {
        self.base
            .wrapping_add((index as u32).wrapping_mul(INSTRUCTION_BYTES))
    }

    /// Returns true when `addr` falls inside the segment.
    pub const fn contains(&self, addr: u32) -> bool {
        let addr = addr as u64;
        let base = self.base as u64;
        addr >= base && addr < base + self.byte_len()
    }
}

/// A single initialized data word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSegment {
    /// Address of the word.
    pub addr: u32,
    /// Initial value.
    pub value: u32,
}

impl DataSegment {
    /// Payload length written for every data segment.
    pub const LEN: u32 = DATA_SEGMENT_LEN;

    /// Creates a data segment.
    pub const fn new(addr: u32, value: u32) -> Self {
        Self { addr, value }
    }

    /// Returns true when `addr` falls inside the word.
    pub const fn contains(&self, addr: u32) -> bool {
        let addr = addr as u64;
        let base = self.addr as u64;
        addr >= base && addr < base + Self::LEN as u64
    }

    /// Returns true when the word intersects the byte range `[base, base + len)`.
    pub const fn overlaps(&self, base: u32, len: u64) -> bool {
        let a0 = self.addr as u64;
        let a1 = a0 + Self::LEN as u64;
        let b0 = base as u64;
        let b1 = b0 + len;
        a0 < b1 && b0 < a1
    }
}
