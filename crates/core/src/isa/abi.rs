//! RISC-V Application Binary Interface (ABI) register name constants.
//!
//! Defines standard RISC-V ABI register indices used by the generated programs
//! and the task file register bank.

/// Register x0 (zero register, always zero).
pub const REG_ZERO: u32 = 0;
/// Register x1 (return address, ra).
pub const REG_RA: u32 = 1;
/// Register x2 (stack pointer, sp); the stock scenario uses it as the data pointer.
pub const REG_SP: u32 = 2;
/// Register x3 (global pointer, gp); the stock scenario uses it as a counter.
pub const REG_GP: u32 = 3;
/// Register x4 (thread pointer, tp); the stock scenario uses it as the load target.
pub const REG_TP: u32 = 4;
/// Highest architectural register index.
pub const REG_MAX: u32 = 31;

/// ABI register names for x0–x31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}
