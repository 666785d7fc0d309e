//! Task image reader.
//!
//! Parses a serialized task file the same way the simulator consumes it: 32
//! register words, then `(address, length, payload)` fragments until the input
//! is exhausted. The code block is simply the first fragment.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::common::constants::{
    REGISTER_BANK_BYTES, REGISTER_COUNT, SEGMENT_HEADER_BYTES, WORD_BYTES,
};
use crate::common::{FixtureError, RegisterBank};
use crate::isa::abi::xreg;
use crate::isa::disasm::disassemble;

/// One memory fragment of a task image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Load address.
    pub addr: u32,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

impl Fragment {
    /// Iterates over the payload as little-endian words; a trailing partial word is skipped.
    pub fn words(&self) -> impl Iterator<Item = u32> + '_ {
        self.bytes
            .chunks_exact(WORD_BYTES)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// Payload length in bytes.
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true for an empty payload.
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A parsed task file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskImage {
    /// Initial program counter.
    pub pc: u32,
    /// Initial registers; `x0` reads as zero.
    pub registers: RegisterBank,
    /// Memory fragments in file order.
    pub fragments: Vec<Fragment>,
}

/// Sequential little-endian reader over a byte slice.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], FixtureError> {
        let available = self.remaining();
        if n > available {
            return Err(FixtureError::TruncatedImage {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn word(&mut self) -> Result<u32, FixtureError> {
        let b = self.take(WORD_BYTES)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}

impl TaskImage {
    /// Parses a task image from memory.
    ///
    /// # Errors
    ///
    /// `FixtureError::TruncatedImage` when the register bank, a fragment header
    /// or a fragment payload is cut short.
    pub fn parse(bytes: &[u8]) -> Result<Self, FixtureError> {
        let mut cur = Cursor::new(bytes);
        if cur.remaining() < REGISTER_BANK_BYTES {
            return Err(FixtureError::TruncatedImage {
                offset: 0,
                needed: REGISTER_BANK_BYTES,
                available: cur.remaining(),
            });
        }

        let pc = cur.word()?;
        let mut registers = RegisterBank::new();
        for idx in 1..REGISTER_COUNT {
            registers.write(idx, cur.word()?);
        }

        let mut fragments = Vec::new();
        while cur.remaining() > 0 {
            if cur.remaining() < SEGMENT_HEADER_BYTES {
                return Err(FixtureError::TruncatedImage {
                    offset: cur.pos,
                    needed: SEGMENT_HEADER_BYTES,
                    available: cur.remaining(),
                });
            }
            let addr = cur.word()?;
            let len = cur.word()? as usize;
            let bytes = cur.take(len)?.to_vec();
            fragments.push(Fragment { addr, bytes });
        }

        Ok(Self {
            pc,
            registers,
            fragments,
        })
    }

    /// Reads and parses a task file.
    ///
    /// # Errors
    ///
    /// `FixtureError::Io` when the file cannot be read, otherwise as [`TaskImage::parse`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes)
    }

    /// The code fragment: the first fragment in the file.
    pub fn code(&self) -> Option<&Fragment> {
        self.fragments.first()
    }

    /// Fragments after the code block.
    pub fn data(&self) -> &[Fragment] {
        self.fragments.get(1..).unwrap_or(&[])
    }
}

impl fmt::Display for TaskImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pc = {:#010x}", self.pc)?;
        for (idx, value) in self.registers.non_zero() {
            writeln!(f, "x{idx:<2} ({:<4}) = {value:#010x}", xreg(idx))?;
        }
        if let Some(code) = self.code() {
            writeln!(f, "code @ {:#010x} ({} bytes)", code.addr, code.len())?;
            let mut addr = code.addr;
            for word in code.words() {
                writeln!(f, "  {addr:#010x}: {word:08x}  {}", disassemble(word))?;
                addr = addr.wrapping_add(WORD_BYTES as u32);
            }
        }
        for frag in self.data() {
            let words: Vec<String> = frag.words().map(|w| format!("{w:#010x}")).collect();
            writeln!(
                f,
                "data @ {:#010x} ({} bytes): {}",
                frag.addr,
                frag.len(),
                words.join(" ")
            )?;
        }
        Ok(())
    }
}
