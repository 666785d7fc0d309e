//! Straight-line program trace.
//!
//! Walks the encoded code words of a fixture from the code base to the return
//! address, in order, and records the memory accesses the simulator will make:
//! one instruction fetch per word, plus one data access per load or store at its
//! effective address. The words are decoded rather than the symbolic program, so
//! truncated immediates are traced with the value the simulator actually sees.
//!
//! Register state tracks `addi`, `slli`, `add`, `sub` and `lw`. Branches are
//! assumed not taken; other opcodes are fetched but otherwise ignored.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::common::RegisterBank;
use crate::fixture::Fixture;
use crate::isa::decode::decode;
use crate::isa::disasm::disassemble;
use crate::isa::rv32i::{funct3, funct7, opcodes};

/// Kind of memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch.
    Fetch,
    /// Data read.
    Load,
    /// Data write.
    Store,
}

impl AccessKind {
    /// Returns true for data accesses.
    pub const fn is_data(self) -> bool {
        !matches!(self, Self::Fetch)
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Load => "load",
            Self::Store => "store",
        })
    }
}

/// A single traced memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    /// Address of the instruction that caused the access.
    pub pc: u32,
    /// Kind of access.
    pub kind: AccessKind,
    /// Accessed byte address.
    pub addr: u32,
}

/// Accesses in program order, plus notes about anything the trace could not follow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    /// Accesses in the order the simulator issues them.
    pub accesses: Vec<Access>,
    /// Human-readable caveats (untaken-branch assumptions).
    pub notes: Vec<String>,
    /// Register state once execution reaches the return address.
    pub registers: RegisterBank,
}

/// Traces `fixture` from its initial register state.
pub fn trace(fixture: &Fixture) -> Trace {
    let mut regs = fixture.registers().clone();
    let mut memory: HashMap<u32, u32> = fixture
        .data()
        .iter()
        .map(|seg| (seg.addr, seg.value))
        .collect();
    let mut out = Trace::default();

    let code = fixture.code();
    for (i, &word) in code.words.iter().enumerate() {
        let pc = code.address_of(i);
        out.accesses.push(Access {
            pc,
            kind: AccessKind::Fetch,
            addr: pc,
        });

        let d = decode(word);
        let rs1 = regs.read(d.rs1 as usize);
        let rs2 = regs.read(d.rs2 as usize);
        let effective = rs1.wrapping_add(d.imm as u32);

        match (d.opcode, d.funct3) {
            (opcodes::OP_IMM, funct3::ADD_SUB) => regs.write(d.rd as usize, effective),
            (opcodes::OP_IMM, funct3::SLL) => {
                regs.write(d.rd as usize, rs1.wrapping_shl(d.imm as u32 & 0x1F));
            }
            (opcodes::OP_REG, funct3::ADD_SUB) => {
                let value = if d.funct7 == funct7::SUB {
                    rs1.wrapping_sub(rs2)
                } else {
                    rs1.wrapping_add(rs2)
                };
                regs.write(d.rd as usize, value);
            }
            (opcodes::OP_LOAD, _) => {
                out.accesses.push(Access {
                    pc,
                    kind: AccessKind::Load,
                    addr: effective,
                });
                let value = memory.get(&effective).copied().unwrap_or(0);
                regs.write(d.rd as usize, value);
            }
            (opcodes::OP_STORE, _) => {
                out.accesses.push(Access {
                    pc,
                    kind: AccessKind::Store,
                    addr: effective,
                });
                if d.funct3 == funct3::SW {
                    let _prev = memory.insert(effective, rs2);
                }
            }
            (opcodes::OP_BRANCH, _) => out.notes.push(format!(
                "{pc:#010x}: '{}' assumed not taken",
                disassemble(word)
            )),
            _ => {}
        }
    }

    out.registers = regs;
    debug!(
        accesses = out.accesses.len(),
        notes = out.notes.len(),
        "program traced"
    );
    out
}
