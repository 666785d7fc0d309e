//! RISC-V Base Integer (I) Opcodes.
//!
//! Defines the major opcodes (bits 6-0) for the formats the generator encodes.

/// Load instructions (LB, LH, LW, LBU, LHU). I-type.
pub const OP_LOAD: u32 = 0b0000011;

/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, etc.). I-type.
pub const OP_IMM: u32 = 0b0010011;

/// Store instructions (SB, SH, SW). S-type.
pub const OP_STORE: u32 = 0b0100011;

/// Register-Register arithmetic (ADD, SUB, SLL, etc.). R-type.
pub const OP_REG: u32 = 0b0110011;

/// Conditional Branch instructions (BEQ, BNE, etc.). B-type.
pub const OP_BRANCH: u32 = 0b1100011;
