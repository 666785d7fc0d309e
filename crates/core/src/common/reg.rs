//! Register Bank.
//!
//! This module provides the `RegisterBank` written at the head of every task file.
//! It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) as 32-bit values.
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero and never serialized;
//!    its file slot carries the initial program counter instead.
//! 3. **Debugging:** Provides a dump of non-zero registers for operator output.

use std::fmt;

use super::constants::REGISTER_COUNT;

/// Initial integer register state of a task file.
///
/// Lifecycle: initialized to zero, selectively overwritten while a fixture is
/// built, then written once to the output stream.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterBank {
    regs: [u32; REGISTER_COUNT],
}

impl RegisterBank {
    /// Creates a register bank with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). `x0` and out-of-range indices read as 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs.get(idx).copied().unwrap_or(0)
        }
    }

    /// Writes a register value.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` and out-of-range indices are ignored.
    /// * `val` - The 32-bit value to write.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            if let Some(slot) = self.regs.get_mut(idx) {
                *slot = val;
            }
        }
    }

    /// Returns `x1..x31` in file order.
    pub fn serialized(&self) -> &[u32] {
        &self.regs[1..]
    }

    /// Iterates over `(index, value)` pairs of registers holding a non-zero value.
    pub fn non_zero(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.regs
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, v)| v != 0)
    }
}

impl fmt::Display for RegisterBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..REGISTER_COUNT).step_by(4) {
            writeln!(
                f,
                "x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.read(i),
                i + 1,
                self.read(i + 1),
                i + 2,
                self.read(i + 2),
                i + 3,
                self.read(i + 3)
            )?;
        }
        Ok(())
    }
}
