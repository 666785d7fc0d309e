//! Fixture construction.
//!
//! `FixtureBuilder` performs the whole build before anything is serialized:
//! 1. **Validation:** Register indices and fixed-width fields of every instruction.
//! 2. **Immediate policy:** Truncate, reject, or expand oversized immediates.
//! 3. **Encoding:** Each instruction is encoded exactly once.
//! 4. **Derived state:** PC = code base, x1 = code base + code length.

use tracing::{debug, warn};

use super::Fixture;
use super::segment::{CodeSegment, DataSegment};
use crate::common::{FixtureError, RegisterBank};
use crate::config::{FixtureConfig, ImmediateMode};
use crate::isa::abi::{REG_MAX, REG_RA, REG_ZERO};
use crate::isa::decode::sign_extend;
use crate::isa::instruction::{Format, Instruction};

/// Shift applied between the chunks of an expanded load-immediate.
const LI_CHUNK_SHIFT: u32 = 12;

/// Collects the inputs of a task file.
///
/// # Examples
///
/// ```
/// use rvtask_core::config::FixtureConfig;
/// use rvtask_core::{FixtureBuilder, Instruction};
///
/// let fixture = FixtureBuilder::new(&FixtureConfig::default())
///     .instruction(Instruction::addi(3, 0, 4))
///     .instruction(Instruction::lw(4, 2, 0))
///     .data(0x2000, 7)
///     .build()
///     .unwrap();
///
/// assert_eq!(fixture.pc(), 0x1000);
/// assert_eq!(fixture.return_address(), 0x1008);
/// assert_eq!(fixture.encoded_len(), 128 + 8 + 2 * 4 + 12);
/// ```
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    code_base: u32,
    mode: ImmediateMode,
    overrides: Vec<(u32, u32)>,
    program: Vec<Instruction>,
    data: Vec<DataSegment>,
}

impl FixtureBuilder {
    /// Starts an empty fixture with the code base and immediate policy of `config`.
    pub const fn new(config: &FixtureConfig) -> Self {
        Self {
            code_base: config.code_base,
            mode: config.immediates,
            overrides: Vec::new(),
            program: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Overrides the immediate policy.
    #[must_use]
    pub const fn immediates(mut self, mode: ImmediateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the initial value of register `index`. Later calls for the same register win.
    ///
    /// `x0` and `x1` are owned by the generator; `build()` rejects them.
    #[must_use]
    pub fn register(mut self, index: u32, value: u32) -> Self {
        self.overrides.push((index, value));
        self
    }

    /// Appends one instruction.
    #[must_use]
    pub fn instruction(mut self, inst: Instruction) -> Self {
        self.program.push(inst);
        self
    }

    /// Appends instructions in order.
    #[must_use]
    pub fn instructions(mut self, insts: impl IntoIterator<Item = Instruction>) -> Self {
        self.program.extend(insts);
        self
    }

    /// Appends a 4-byte data segment.
    #[must_use]
    pub fn data(mut self, addr: u32, value: u32) -> Self {
        self.data.push(DataSegment::new(addr, value));
        self
    }

    /// Validates, encodes and lays out the fixture.
    ///
    /// # Errors
    ///
    /// - `InvalidRegister` / `FieldOverflow` for malformed instructions.
    /// - `ImmediateOutOfRange` / `MisalignedBranch` under the strict or expand policy.
    /// - `ReservedRegister` / `InvalidRegister` for bad register overrides.
    /// - `AddressOverflow` when the code block runs past the 32-bit address space.
    pub fn build(self) -> Result<Fixture, FixtureError> {
        let mut program = Vec::with_capacity(self.program.len());
        for inst in &self.program {
            resolve(*inst, self.mode, &mut program)?;
        }
        if program.len() != self.program.len() {
            debug!(
                requested = self.program.len(),
                emitted = program.len(),
                "load-immediates expanded"
            );
        }

        let words = program.iter().map(Instruction::encode).collect();
        let code = CodeSegment::new(self.code_base, words);
        let end = u64::from(code.base) + code.byte_len();
        let overflow = FixtureError::AddressOverflow {
            base: code.base,
            len: code.byte_len(),
        };
        let return_address = u32::try_from(end).map_err(|_| overflow)?;

        let mut registers = RegisterBank::new();
        for &(index, value) in &self.overrides {
            match index {
                REG_ZERO | REG_RA => return Err(FixtureError::ReservedRegister { index }),
                i if i > REG_MAX => return Err(FixtureError::InvalidRegister { index }),
                i => registers.write(i as usize, value),
            }
        }
        registers.write(REG_RA as usize, return_address);

        warn_on_overlap(&code, &self.data);

        debug!(
            base = format_args!("{:#x}", code.base),
            instructions = code.instruction_count(),
            data = self.data.len(),
            return_address = format_args!("{return_address:#x}"),
            "fixture built"
        );

        Ok(Fixture {
            pc: code.base,
            registers,
            code,
            data: self.data,
            program,
        })
    }
}

/// Applies field checks and the immediate policy to one instruction.
fn resolve(
    inst: Instruction,
    mode: ImmediateMode,
    out: &mut Vec<Instruction>,
) -> Result<(), FixtureError> {
    inst.check_fields()?;

    let format = inst.format();
    let (Some(imm), Some(bits)) = (inst.immediate(), format.immediate_bits()) else {
        out.push(inst);
        return Ok(());
    };

    let in_range = format.fits(imm);
    let aligned = format != Format::Branch || imm % 2 == 0;
    if in_range && aligned {
        out.push(inst);
        return Ok(());
    }

    match mode {
        ImmediateMode::Truncate => {
            warn!(
                instruction = %inst,
                %format,
                imm,
                bits,
                "immediate truncated to field width"
            );
            out.push(inst);
            Ok(())
        }
        ImmediateMode::Expand | ImmediateMode::Strict if in_range => {
            Err(FixtureError::MisalignedBranch { imm })
        }
        ImmediateMode::Expand => match inst {
            Instruction::Immediate { rd, .. } if inst.is_load_immediate() => {
                let before = out.len();
                expand_load_immediate(rd, imm, out);
                debug!(
                    rd,
                    imm,
                    emitted = out.len() - before,
                    "load-immediate expanded"
                );
                Ok(())
            }
            _ => Err(FixtureError::ImmediateOutOfRange { format, imm, bits }),
        },
        ImmediateMode::Strict => Err(FixtureError::ImmediateOutOfRange { format, imm, bits }),
    }
}

/// Emits an I-type-only sequence that leaves `value` in `rd`.
///
/// The low 12 bits are peeled off as a signed chunk and the remainder is built
/// recursively, then shifted into place with `slli 12`:
/// `addi rd, x0, hi` / `slli rd, rd, 12` / `addi rd, rd, lo`. Arithmetic wraps at
/// 32 bits, as on RV32. A value that already fits yields a single `addi`.
pub fn expand_load_immediate(rd: u32, value: i32, out: &mut Vec<Instruction>) {
    if Format::Immediate.fits(value) {
        out.push(Instruction::addi(rd, REG_ZERO, value));
        return;
    }

    let lo = sign_extend(value as u32 & 0xFFF, 12);
    let hi = value.wrapping_sub(lo) >> LI_CHUNK_SHIFT;
    expand_load_immediate(rd, hi, out);
    out.push(Instruction::slli(rd, rd, LI_CHUNK_SHIFT));
    if lo != 0 {
        out.push(Instruction::addi(rd, rd, lo));
    }
}

fn warn_on_overlap(code: &CodeSegment, data: &[DataSegment]) {
    for (i, seg) in data.iter().enumerate() {
        if seg.overlaps(code.base, code.byte_len()) {
            warn!(
                addr = format_args!("{:#x}", seg.addr),
                "data segment overlaps the code segment"
            );
        }
        if data[..i]
            .iter()
            .any(|prev| prev.overlaps(seg.addr, u64::from(DataSegment::LEN)))
        {
            warn!(
                addr = format_args!("{:#x}", seg.addr),
                "data segment overlaps an earlier data segment"
            );
        }
    }
}
