//! RISC-V Instruction Encoder.
//!
//! This module packs instruction fields into 32-bit instruction words for the four
//! formats the generator emits (R, I, S, B). The encoders are pure and never fail:
//!
//! * Immediates are masked to their field width before packing. Out-of-range values
//!   are truncated silently, mirroring hardware field truncation.
//! * Register, opcode and function-code fields are packed as given. A value wider
//!   than its field spills into the neighbouring fields; callers that need checking
//!   go through [`Instruction`](crate::isa::instruction::Instruction), which validates
//!   at fixture build time.

/// Bit position of the destination register field (bits 7-11).
pub const RD_SHIFT: u32 = 7;
/// Bit position of the funct3 field (bits 12-14).
pub const FUNCT3_SHIFT: u32 = 12;
/// Bit position of the first source register field (bits 15-19).
pub const RS1_SHIFT: u32 = 15;
/// Bit position of the second source register field (bits 20-24).
pub const RS2_SHIFT: u32 = 20;
/// Bit position of the funct7 field (bits 25-31).
pub const FUNCT7_SHIFT: u32 = 25;

/// Bit position of the I-type immediate (bits 20-31).
pub const I_IMM_SHIFT: u32 = 20;
/// Width mask of a 12-bit I-type or S-type immediate.
pub const IMM12_MASK: u32 = 0xFFF;

/// S-type immediate high part imm[11:5], placed at bit 25.
const S_IMM_HIGH_SHIFT: u32 = 25;
const S_IMM_HIGH_MASK: u32 = 0x7F;
/// S-type immediate low part imm[4:0], placed at bit 7.
const S_IMM_LOW_SHIFT: u32 = 7;
const S_IMM_LOW_MASK: u32 = 0x1F;
/// Offset of imm[11:5] within the immediate.
const S_IMM_HIGH_POS: u32 = 5;

/// Width mask of a 13-bit B-type immediate.
pub const IMM13_MASK: u32 = 0x1FFF;

/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
const B_IMM_12_POS: u32 = 12;
const B_IMM_12_SHIFT: u32 = 31;
const B_IMM_10_5_POS: u32 = 5;
const B_IMM_10_5_MASK: u32 = 0x3F;
const B_IMM_10_5_SHIFT: u32 = 25;
const B_IMM_4_1_POS: u32 = 1;
const B_IMM_4_1_MASK: u32 = 0xF;
const B_IMM_4_1_SHIFT: u32 = 8;
const B_IMM_11_POS: u32 = 11;
const B_IMM_11_SHIFT: u32 = 7;

/// Encodes an R-type (register-register) instruction.
///
/// Layout: `funct7 | rs2 | rs1 | funct3 | rd | opcode`.
///
/// # Arguments
///
/// * `opcode` - 7-bit major opcode.
/// * `rd` - Destination register index.
/// * `funct3` - 3-bit function code.
/// * `rs1` - First source register index.
/// * `rs2` - Second source register index.
/// * `funct7` - 7-bit function code.
#[inline]
pub const fn encode_register_type(
    opcode: u32,
    rd: u32,
    funct3: u32,
    rs1: u32,
    rs2: u32,
    funct7: u32,
) -> u32 {
    (funct7 << FUNCT7_SHIFT)
        | (rs2 << RS2_SHIFT)
        | (rs1 << RS1_SHIFT)
        | (funct3 << FUNCT3_SHIFT)
        | (rd << RD_SHIFT)
        | opcode
}

/// Encodes an I-type (register-immediate or load) instruction.
///
/// Layout: `imm[11:0] | rs1 | funct3 | rd | opcode`. The immediate is masked to
/// 12 bits, so negative values are stored in two's complement and values above
/// `0xFFF` lose their upper bits (`0x2000` encodes as `0`).
#[inline]
pub const fn encode_immediate_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm: i32) -> u32 {
    let imm = (imm as u32) & IMM12_MASK;
    (imm << I_IMM_SHIFT) | (rs1 << RS1_SHIFT) | (funct3 << FUNCT3_SHIFT) | (rd << RD_SHIFT) | opcode
}

/// Encodes an S-type (store) instruction.
///
/// Layout: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`. The 12-bit
/// immediate is split across two non-contiguous fields.
#[inline]
pub const fn encode_store_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = (imm as u32) & IMM12_MASK;
    let imm_11_5 = (imm >> S_IMM_HIGH_POS) & S_IMM_HIGH_MASK;
    let imm_4_0 = imm & S_IMM_LOW_MASK;
    (imm_11_5 << S_IMM_HIGH_SHIFT)
        | (rs2 << RS2_SHIFT)
        | (rs1 << RS1_SHIFT)
        | (funct3 << FUNCT3_SHIFT)
        | (imm_4_0 << S_IMM_LOW_SHIFT)
        | opcode
}

/// Encodes a B-type (conditional branch) instruction.
///
/// Layout: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
/// The offset is masked to 13 bits; bit 0 is implicit (offsets are even) and dropped.
#[inline]
pub const fn encode_branch_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm: i32) -> u32 {
    let imm = (imm as u32) & IMM13_MASK;
    let imm_12 = (imm >> B_IMM_12_POS) & 1;
    let imm_10_5 = (imm >> B_IMM_10_5_POS) & B_IMM_10_5_MASK;
    let imm_4_1 = (imm >> B_IMM_4_1_POS) & B_IMM_4_1_MASK;
    let imm_11 = (imm >> B_IMM_11_POS) & 1;
    (imm_12 << B_IMM_12_SHIFT)
        | (imm_10_5 << B_IMM_10_5_SHIFT)
        | (rs2 << RS2_SHIFT)
        | (rs1 << RS1_SHIFT)
        | (funct3 << FUNCT3_SHIFT)
        | (imm_4_1 << B_IMM_4_1_SHIFT)
        | (imm_11 << B_IMM_11_SHIFT)
        | opcode
}
