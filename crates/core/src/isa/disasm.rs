//! Instruction Disassembler for the RV32I subset the generator emits.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for operator reports, `inspect` output and test diagnostics.
//! Words outside the subset render as `.word 0x........`.
//!
//! # Usage
//!
//! ```
//! use rvtask_core::isa::disasm::disassemble;
//! let text = disassemble(0x0040_0193); // ADDI x3, x0, 4
//! assert_eq!(text, "addi gp, zero, 4");
//! ```

use crate::isa::abi::xreg;
use crate::isa::decode::decode;
use crate::isa::rv32i::{funct3 as f3, funct7 as f7, opcodes as op};

/// Disassembles a 32-bit RISC-V instruction into a human-readable string.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let rd = xreg(d.rd as usize);
    let rs1 = xreg(d.rs1 as usize);
    let rs2 = xreg(d.rs2 as usize);
    let imm = d.imm;

    match d.opcode {
        // ── R-type register-register ──────────────────────
        op::OP_REG => {
            let mn = match (d.funct3, d.funct7) {
                (f3::ADD_SUB, f7::DEFAULT) => "add",
                (f3::ADD_SUB, f7::SUB) => "sub",
                (f3::SLL, f7::DEFAULT) => "sll",
                (f3::SLT, f7::DEFAULT) => "slt",
                (f3::SLTU, f7::DEFAULT) => "sltu",
                (f3::XOR, f7::DEFAULT) => "xor",
                (f3::SRL_SRA, f7::DEFAULT) => "srl",
                (f3::SRL_SRA, f7::SRA) => "sra",
                (f3::OR, f7::DEFAULT) => "or",
                (f3::AND, f7::DEFAULT) => "and",
                _ => return word(inst),
            };
            format!("{mn} {rd}, {rs1}, {rs2}")
        }

        // ── I-type immediate arithmetic ───────────────────
        op::OP_IMM => {
            let shamt = imm & 0x1F;
            match d.funct3 {
                f3::ADD_SUB => format!("addi {rd}, {rs1}, {imm}"),
                f3::SLT => format!("slti {rd}, {rs1}, {imm}"),
                f3::SLTU => format!("sltiu {rd}, {rs1}, {imm}"),
                f3::XOR => format!("xori {rd}, {rs1}, {imm}"),
                f3::OR => format!("ori {rd}, {rs1}, {imm}"),
                f3::AND => format!("andi {rd}, {rs1}, {imm}"),
                f3::SLL => format!("slli {rd}, {rs1}, {shamt}"),
                _ if d.funct7 == f7::SRA => format!("srai {rd}, {rs1}, {shamt}"),
                _ => format!("srli {rd}, {rs1}, {shamt}"),
            }
        }

        // ── Loads ─────────────────────────────────────────
        op::OP_LOAD => {
            let mn = match d.funct3 {
                f3::LB => "lb",
                f3::LH => "lh",
                f3::LW => "lw",
                f3::LBU => "lbu",
                f3::LHU => "lhu",
                _ => return word(inst),
            };
            format!("{mn} {rd}, {imm}({rs1})")
        }

        // ── Stores ────────────────────────────────────────
        op::OP_STORE => {
            let mn = match d.funct3 {
                f3::SB => "sb",
                f3::SH => "sh",
                f3::SW => "sw",
                _ => return word(inst),
            };
            format!("{mn} {rs2}, {imm}({rs1})")
        }

        // ── Branches ──────────────────────────────────────
        op::OP_BRANCH => {
            let mn = match d.funct3 {
                f3::BEQ => "beq",
                f3::BNE => "bne",
                f3::BLT => "blt",
                f3::BGE => "bge",
                f3::BLTU => "bltu",
                f3::BGEU => "bgeu",
                _ => return word(inst),
            };
            format!("{mn} {rs1}, {rs2}, {imm}")
        }

        _ => word(inst),
    }
}

fn word(inst: u32) -> String {
    format!(".word {inst:#010x}")
}
