//! Tagged Instruction Tests.
//!
//! Covers format tags, immediate ranges and build-time field validation.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rvtask_core::FixtureError;
use rvtask_core::Instruction;
use rvtask_core::isa::instruction::{Format, InstructionBits};

#[rstest]
#[case(Instruction::add(3, 1, 2), Format::Register, None)]
#[case(Instruction::addi(2, 0, 5), Format::Immediate, Some(5))]
#[case(Instruction::lw(4, 2, -8), Format::Immediate, Some(-8))]
#[case(Instruction::sw(4, 2, 12), Format::Store, Some(12))]
#[case(Instruction::bne(1, 2, -16), Format::Branch, Some(-16))]
fn format_and_immediate(
    #[case] inst: Instruction,
    #[case] format: Format,
    #[case] imm: Option<i32>,
) {
    assert_eq!(inst.format(), format);
    assert_eq!(inst.immediate(), imm);
}

#[rstest]
#[case(Format::Immediate, -2048, true)]
#[case(Format::Immediate, 2047, true)]
#[case(Format::Immediate, 2048, false)]
#[case(Format::Immediate, -2049, false)]
#[case(Format::Store, 0x2000, false)]
#[case(Format::Branch, 4095, true)]
#[case(Format::Branch, -4096, true)]
#[case(Format::Branch, 4096, false)]
#[case(Format::Register, i32::MAX, true)]
fn signed_ranges(#[case] format: Format, #[case] imm: i32, #[case] fits: bool) {
    assert_eq!(format.fits(imm), fits);
}

#[test]
fn encode_matches_field_accessors() {
    let word = Instruction::sub(7, 8, 9).encode();
    let fields = (word.opcode(), word.rd(), word.rs1(), word.rs2());
    assert_eq!(fields, (0x33, 7, 8, 9));
    assert_eq!(word.funct7(), 0x20);
}

#[test]
fn load_immediate_idiom_is_recognised() {
    assert!(Instruction::addi(2, 0, 0x2000).is_load_immediate());
    assert!(!Instruction::addi(2, 2, 0x2000).is_load_immediate());
    assert!(!Instruction::lw(2, 0, 0).is_load_immediate());
}

#[rstest]
#[case(Instruction::add(32, 1, 2), 32)]
#[case(Instruction::addi(2, 40, 0), 40)]
#[case(Instruction::sw(33, 2, 0), 33)]
#[case(Instruction::beq(1, 99, 8), 99)]
fn register_above_31_is_rejected(#[case] inst: Instruction, #[case] index: u32) {
    assert!(matches!(
        inst.check_fields(),
        Err(FixtureError::InvalidRegister { index: i }) if i == index
    ));
}

#[test]
fn oversized_funct3_is_rejected() {
    let inst = Instruction::Immediate {
        opcode: 0x13,
        rd: 1,
        funct3: 8,
        rs1: 0,
        imm: 0,
    };
    assert!(matches!(
        inst.check_fields(),
        Err(FixtureError::FieldOverflow {
            field: "funct3",
            value: 8,
            bits: 3,
        })
    ));
}

#[test]
fn oversized_opcode_is_rejected() {
    let inst = Instruction::Register {
        opcode: 0x80,
        rd: 1,
        funct3: 0,
        rs1: 0,
        rs2: 0,
        funct7: 0,
    };
    assert!(matches!(
        inst.check_fields(),
        Err(FixtureError::FieldOverflow {
            field: "opcode",
            ..
        })
    ));
}

#[test]
fn in_range_fields_pass() {
    for inst in [
        Instruction::add(31, 31, 31),
        Instruction::addi(0, 0, 0x7FFF_FFFF),
        Instruction::sw(31, 0, 0),
        Instruction::bne(0, 31, 3),
    ] {
        assert!(inst.check_fields().is_ok(), "{inst:?}");
    }
}

#[test]
fn display_uses_disassembly() {
    assert_eq!(Instruction::lw(4, 2, 0).to_string(), "lw tp, 0(sp)");
}
