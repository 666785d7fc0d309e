//! Instruction field extraction and the tagged instruction type.
//!
//! Provides bit extraction for encoded 32-bit words and the `Instruction` enum,
//! which carries one typed field set per encoding format so a caller cannot pair
//! one format's fields with another format's encoder.

use std::fmt;

use crate::common::FixtureError;
use crate::isa::abi::REG_MAX;
use crate::isa::encode;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Bit mask for extracting the opcode field (bits 0-6).
pub const OPCODE_MASK: u32 = 0x7F;
/// Bit mask for extracting a register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for extracting the funct3 field (bits 12-14).
pub const FUNCT3_MASK: u32 = 0x7;
/// Bit mask for extracting the funct7 field (bits 25-31).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Extracts the opcode field (bits 0-6).
    fn opcode(&self) -> u32;

    /// Extracts the destination register field (bits 7-11).
    fn rd(&self) -> u32;

    /// Extracts the first source register field (bits 15-19).
    fn rs1(&self) -> u32;

    /// Extracts the second source register field (bits 20-24).
    fn rs2(&self) -> u32;

    /// Extracts the funct3 field (bits 12-14).
    fn funct3(&self) -> u32;

    /// Extracts the funct7 field (bits 25-31).
    fn funct7(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & OPCODE_MASK
    }

    #[inline(always)]
    fn rd(&self) -> u32 {
        (self >> encode::RD_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn rs1(&self) -> u32 {
        (self >> encode::RS1_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn rs2(&self) -> u32 {
        (self >> encode::RS2_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> encode::FUNCT3_SHIFT) & FUNCT3_MASK
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> encode::FUNCT7_SHIFT) & FUNCT7_MASK
    }
}

/// Encoding format of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Register-register (`funct7 | rs2 | rs1 | funct3 | rd | opcode`).
    Register,
    /// Register-immediate and loads (`imm[11:0] | rs1 | funct3 | rd | opcode`).
    Immediate,
    /// Stores (`imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`).
    Store,
    /// Conditional branches (`imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode`).
    Branch,
}

impl Format {
    /// Width in bits of the signed immediate carried by this format, if any.
    pub const fn immediate_bits(self) -> Option<u32> {
        match self {
            Self::Register => None,
            Self::Immediate | Self::Store => Some(12),
            Self::Branch => Some(13),
        }
    }

    /// Returns true when `imm` lies in the signed range of the immediate field.
    ///
    /// Branch alignment (bit 0) is not considered here.
    pub const fn fits(self, imm: i32) -> bool {
        match self.immediate_bits() {
            None => true,
            Some(bits) => {
                let min = -(1i32 << (bits - 1));
                let max = (1i32 << (bits - 1)) - 1;
                imm >= min && imm <= max
            }
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Register => "R-type",
            Self::Immediate => "I-type",
            Self::Store => "S-type",
            Self::Branch => "B-type",
        };
        f.write_str(name)
    }
}

/// A symbolic instruction, tagged by encoding format.
///
/// Encoding happens once, when a fixture is built; until then the instruction
/// keeps its named fields so it can be validated, expanded and traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// R-type instruction.
    Register {
        /// Major opcode.
        opcode: u32,
        /// Destination register.
        rd: u32,
        /// Minor opcode.
        funct3: u32,
        /// First source register.
        rs1: u32,
        /// Second source register.
        rs2: u32,
        /// Extended opcode.
        funct7: u32,
    },
    /// I-type instruction.
    Immediate {
        /// Major opcode.
        opcode: u32,
        /// Destination register.
        rd: u32,
        /// Minor opcode.
        funct3: u32,
        /// Source (or base) register.
        rs1: u32,
        /// Signed 12-bit immediate.
        imm: i32,
    },
    /// S-type instruction.
    Store {
        /// Major opcode.
        opcode: u32,
        /// Minor opcode (access width).
        funct3: u32,
        /// Base register.
        rs1: u32,
        /// Value register.
        rs2: u32,
        /// Signed 12-bit offset.
        imm: i32,
    },
    /// B-type instruction.
    Branch {
        /// Major opcode.
        opcode: u32,
        /// Minor opcode (comparison).
        funct3: u32,
        /// First compared register.
        rs1: u32,
        /// Second compared register.
        rs2: u32,
        /// Signed, even 13-bit offset relative to the branch.
        imm: i32,
    },
}

impl Instruction {
    /// `add rd, rs1, rs2`
    pub const fn add(rd: u32, rs1: u32, rs2: u32) -> Self {
        Self::Register {
            opcode: opcodes::OP_REG,
            rd,
            funct3: funct3::ADD_SUB,
            rs1,
            rs2,
            funct7: funct7::DEFAULT,
        }
    }

    /// `sub rd, rs1, rs2`
    pub const fn sub(rd: u32, rs1: u32, rs2: u32) -> Self {
        Self::Register {
            opcode: opcodes::OP_REG,
            rd,
            funct3: funct3::ADD_SUB,
            rs1,
            rs2,
            funct7: funct7::SUB,
        }
    }

    /// `addi rd, rs1, imm`
    pub const fn addi(rd: u32, rs1: u32, imm: i32) -> Self {
        Self::Immediate {
            opcode: opcodes::OP_IMM,
            rd,
            funct3: funct3::ADD_SUB,
            rs1,
            imm,
        }
    }

    /// `slli rd, rs1, shamt`
    pub const fn slli(rd: u32, rs1: u32, shamt: u32) -> Self {
        Self::Immediate {
            opcode: opcodes::OP_IMM,
            rd,
            funct3: funct3::SLL,
            rs1,
            imm: (shamt & 0x1F) as i32,
        }
    }

    /// `lw rd, imm(rs1)`
    pub const fn lw(rd: u32, rs1: u32, imm: i32) -> Self {
        Self::Immediate {
            opcode: opcodes::OP_LOAD,
            rd,
            funct3: funct3::LW,
            rs1,
            imm,
        }
    }

    /// `sw rs2, imm(rs1)`
    pub const fn sw(rs2: u32, rs1: u32, imm: i32) -> Self {
        Self::Store {
            opcode: opcodes::OP_STORE,
            funct3: funct3::SW,
            rs1,
            rs2,
            imm,
        }
    }

    /// `beq rs1, rs2, imm`
    pub const fn beq(rs1: u32, rs2: u32, imm: i32) -> Self {
        Self::Branch {
            opcode: opcodes::OP_BRANCH,
            funct3: funct3::BEQ,
            rs1,
            rs2,
            imm,
        }
    }

    /// `bne rs1, rs2, imm`
    pub const fn bne(rs1: u32, rs2: u32, imm: i32) -> Self {
        Self::Branch {
            opcode: opcodes::OP_BRANCH,
            funct3: funct3::BNE,
            rs1,
            rs2,
            imm,
        }
    }

    /// Returns the encoding format tag.
    pub const fn format(&self) -> Format {
        match self {
            Self::Register { .. } => Format::Register,
            Self::Immediate { .. } => Format::Immediate,
            Self::Store { .. } => Format::Store,
            Self::Branch { .. } => Format::Branch,
        }
    }

    /// Returns the immediate operand, if the format carries one.
    pub const fn immediate(&self) -> Option<i32> {
        match *self {
            Self::Register { .. } => None,
            Self::Immediate { imm, .. } | Self::Store { imm, .. } | Self::Branch { imm, .. } => {
                Some(imm)
            }
        }
    }

    /// Returns true for `addi rd, x0, imm`, the load-immediate idiom.
    pub const fn is_load_immediate(&self) -> bool {
        matches!(
            *self,
            Self::Immediate {
                opcode: opcodes::OP_IMM,
                funct3: funct3::ADD_SUB,
                rs1: 0,
                ..
            }
        )
    }

    /// Encodes the instruction into its 32-bit word with the matching format encoder.
    pub const fn encode(&self) -> u32 {
        match *self {
            Self::Register {
                opcode,
                rd,
                funct3,
                rs1,
                rs2,
                funct7,
            } => encode::encode_register_type(opcode, rd, funct3, rs1, rs2, funct7),
            Self::Immediate {
                opcode,
                rd,
                funct3,
                rs1,
                imm,
            } => encode::encode_immediate_type(opcode, rd, funct3, rs1, imm),
            Self::Store {
                opcode,
                funct3,
                rs1,
                rs2,
                imm,
            } => encode::encode_store_type(opcode, funct3, rs1, rs2, imm),
            Self::Branch {
                opcode,
                funct3,
                rs1,
                rs2,
                imm,
            } => encode::encode_branch_type(opcode, funct3, rs1, rs2, imm),
        }
    }

    /// Checks register indices and fixed-width fields.
    ///
    /// Immediates are not checked here; the fixture builder applies the
    /// configured immediate policy.
    ///
    /// # Errors
    ///
    /// `InvalidRegister` for an index above 31, `FieldOverflow` for an opcode,
    /// funct3 or funct7 wider than its field.
    pub fn check_fields(&self) -> Result<(), FixtureError> {
        let (opcode, f3, f7, regs): (u32, u32, u32, [u32; 3]) = match *self {
            Self::Register {
                opcode,
                rd,
                funct3,
                rs1,
                rs2,
                funct7,
            } => (opcode, funct3, funct7, [rd, rs1, rs2]),
            Self::Immediate {
                opcode,
                rd,
                funct3,
                rs1,
                ..
            } => (opcode, funct3, 0, [rd, rs1, 0]),
            Self::Store {
                opcode,
                funct3,
                rs1,
                rs2,
                ..
            }
            | Self::Branch {
                opcode,
                funct3,
                rs1,
                rs2,
                ..
            } => (opcode, funct3, 0, [rs1, rs2, 0]),
        };

        if let Some(&index) = regs.iter().find(|&&r| r > REG_MAX) {
            return Err(FixtureError::InvalidRegister { index });
        }
        check_width("opcode", opcode, OPCODE_MASK, 7)?;
        check_width("funct3", f3, FUNCT3_MASK, 3)?;
        check_width("funct7", f7, FUNCT7_MASK, 7)
    }
}

const fn check_width(
    field: &'static str,
    value: u32,
    mask: u32,
    bits: u32,
) -> Result<(), FixtureError> {
    if value & !mask == 0 {
        Ok(())
    } else {
        Err(FixtureError::FieldOverflow { field, value, bits })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::isa::disasm::disassemble(self.encode()))
    }
}
