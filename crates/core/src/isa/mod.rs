//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encoders, field extraction, decoding and disassembly for the
//! subset of RV32I the generator emits.
//!
//! # Formats
//!
//! * R-type: register-register arithmetic (`add`, `sub`).
//! * I-type: immediate arithmetic and loads (`addi`, `slli`, `lw`).
//! * S-type: stores (`sw`).
//! * B-type: conditional branches (`beq`, `bne`, ...).

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Immediate reconstruction for every emitted format.
pub mod decode;

/// Instruction disassembler for operator output and diagnostics.
pub mod disasm;

/// Bit-exact encoders for the R, I, S and B formats.
pub mod encode;

/// Field extraction trait and the tagged `Instruction` type.
pub mod instruction;

/// Base integer instruction set constants (opcodes, funct3, funct7).
pub mod rv32i;
