//! Encoder Properties.
//!
//! Verifies the R, I, S and B encoders bit for bit:
//! - Fields survive an encode/decode round trip when in range.
//! - Every immediate bit lands at its architected position.
//! - Oversized immediates are masked exactly like the independent reference encoders.
//! - Oversized register and function fields are packed as given.

use proptest::prelude::*;
use rstest::rstest;

use rvtask_core::isa::decode::{decode, immediate};
use rvtask_core::isa::encode::{
    encode_branch_type, encode_immediate_type, encode_register_type, encode_store_type,
};
use rvtask_core::isa::instruction::Format;
use rvtask_core::isa::rv32i::{funct3, funct7, opcodes};

use crate::common::{b_type, i_type, s_type};

// ──────────────────────────────────────────────────────────
// Pinned words
// ──────────────────────────────────────────────────────────

#[rstest]
#[case::addi_data_base(
    encode_immediate_type(opcodes::OP_IMM, 2, funct3::ADD_SUB, 0, 0x2000),
    0x0000_0113
)]
#[case::addi_counter(
    encode_immediate_type(opcodes::OP_IMM, 3, funct3::ADD_SUB, 0, 4),
    0x0040_0193
)]
#[case::addi_stride(
    encode_immediate_type(opcodes::OP_IMM, 2, funct3::ADD_SUB, 2, 1024),
    0x4001_0113
)]
#[case::lw(
    encode_immediate_type(opcodes::OP_LOAD, 4, funct3::LW, 2, 0),
    0x0001_2203
)]
#[case::sw(encode_store_type(opcodes::OP_STORE, funct3::SW, 2, 4, 0), 0x0041_2023)]
#[case::add(
    encode_register_type(opcodes::OP_REG, 3, funct3::ADD_SUB, 1, 2, funct7::DEFAULT),
    0x0020_81B3
)]
#[case::sub(
    encode_register_type(opcodes::OP_REG, 3, funct3::ADD_SUB, 1, 2, funct7::SUB),
    0x4020_81B3
)]
#[case::beq_back(
    encode_branch_type(opcodes::OP_BRANCH, funct3::BEQ, 1, 2, -4),
    0xFE20_8EE3
)]
#[case::addi_minus_one(
    encode_immediate_type(opcodes::OP_IMM, 1, funct3::ADD_SUB, 0, -1),
    0xFFF0_0093
)]
fn pinned_words(#[case] got: u32, #[case] expected: u32) {
    assert_eq!(got, expected, "got {got:#010x}, expected {expected:#010x}");
}

// ──────────────────────────────────────────────────────────
// Immediate scatter
// ──────────────────────────────────────────────────────────

/// Bit `k` of an S-type immediate lands at bit 7+k (k < 5) or 25+(k-5).
#[rstest]
fn store_immediate_bits_scatter(#[values(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11)] k: u32) {
    let word = encode_store_type(0, 0, 0, 0, (1u32 << k) as i32);
    let expected = if k < 5 { 7 + k } else { 25 + (k - 5) };
    assert_eq!(word, 1 << expected, "imm bit {k}");
}

/// Bit `k` of a B-type immediate lands at its split position; bit 0 is dropped.
#[rstest]
#[case(1, 8)]
#[case(2, 9)]
#[case(3, 10)]
#[case(4, 11)]
#[case(5, 25)]
#[case(6, 26)]
#[case(7, 27)]
#[case(8, 28)]
#[case(9, 29)]
#[case(10, 30)]
#[case(11, 7)]
#[case(12, 31)]
fn branch_immediate_bits_scatter(#[case] k: u32, #[case] position: u32) {
    let word = encode_branch_type(0, 0, 0, 0, (1u32 << k) as i32);
    assert_eq!(word, 1 << position, "imm bit {k}");
}

#[test]
fn branch_immediate_bit_zero_is_not_encoded() {
    assert_eq!(encode_branch_type(0, 0, 0, 0, 1), 0);
}

#[test]
fn immediate_bits_start_at_twenty() {
    for k in 0..12 {
        let word = encode_immediate_type(0, 0, 0, 0, 1 << k);
        assert_eq!(word, 1 << (20 + k));
    }
}

// ──────────────────────────────────────────────────────────
// Unchecked field packing
// ──────────────────────────────────────────────────────────

#[test]
fn oversized_destination_spills_into_funct3() {
    let word = encode_register_type(opcodes::OP_REG, 32, 0, 0, 0, 0);
    assert_eq!(word, opcodes::OP_REG | 1 << 12);
}

#[test]
fn oversized_rs2_spills_into_funct7() {
    let word = encode_register_type(opcodes::OP_REG, 0, 0, 0, 32, 0);
    assert_eq!(word, opcodes::OP_REG | 1 << 25);
}

// ──────────────────────────────────────────────────────────
// Properties
// ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn register_type_fields_round_trip(
        opcode in 0u32..0x80,
        rd in 0u32..32,
        f3 in 0u32..8,
        rs1 in 0u32..32,
        rs2 in 0u32..32,
        f7 in 0u32..0x80,
    ) {
        let d = decode(encode_register_type(opcode, rd, f3, rs1, rs2, f7));
        prop_assert_eq!(
            (d.opcode, d.rd, d.funct3, d.rs1, d.rs2, d.funct7),
            (opcode, rd, f3, rs1, rs2, f7)
        );
    }

    #[test]
    fn immediate_type_round_trips_in_range(
        opcode in 0u32..0x80,
        rd in 0u32..32,
        f3 in 0u32..8,
        rs1 in 0u32..32,
        imm in -2048i32..2048,
    ) {
        let word = encode_immediate_type(opcode, rd, f3, rs1, imm);
        let d = decode(word);
        prop_assert_eq!(
            (d.opcode, d.rd, d.funct3, d.rs1, immediate(word, Format::Immediate)),
            (opcode, rd, f3, rs1, imm)
        );
    }

    #[test]
    fn store_type_round_trips_in_range(
        opcode in 0u32..0x80,
        f3 in 0u32..8,
        rs1 in 0u32..32,
        rs2 in 0u32..32,
        imm in -2048i32..2048,
    ) {
        let word = encode_store_type(opcode, f3, rs1, rs2, imm);
        let d = decode(word);
        prop_assert_eq!(
            (d.opcode, d.funct3, d.rs1, d.rs2, immediate(word, Format::Store)),
            (opcode, f3, rs1, rs2, imm)
        );
    }

    #[test]
    fn branch_type_round_trips_even_offsets(
        opcode in 0u32..0x80,
        f3 in 0u32..8,
        rs1 in 0u32..32,
        rs2 in 0u32..32,
        half in -2048i32..2048,
    ) {
        let imm = half * 2;
        let word = encode_branch_type(opcode, f3, rs1, rs2, imm);
        let d = decode(word);
        prop_assert_eq!(
            (d.opcode, d.funct3, d.rs1, d.rs2, immediate(word, Format::Branch)),
            (opcode, f3, rs1, rs2, imm)
        );
    }

    #[test]
    fn oversized_immediates_mask_like_the_reference(imm in any::<i32>()) {
        prop_assert_eq!(
            encode_immediate_type(opcodes::OP_IMM, 5, 0, 6, imm),
            i_type(opcodes::OP_IMM, 5, 0, 6, imm)
        );
        prop_assert_eq!(
            encode_store_type(opcodes::OP_STORE, funct3::SW, 6, 7, imm),
            s_type(opcodes::OP_STORE, funct3::SW, 6, 7, imm)
        );
        prop_assert_eq!(
            encode_branch_type(opcodes::OP_BRANCH, funct3::BEQ, 6, 7, imm),
            b_type(opcodes::OP_BRANCH, funct3::BEQ, 6, 7, imm)
        );
    }
}
