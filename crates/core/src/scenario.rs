//! Stock hit-rate scenario.
//!
//! A short straight-line program that fits in a single cache line and walks
//! `accesses` data words spaced `stride` bytes apart. With the default 1024-byte
//! stride every word maps to the same set, so each load misses and the store
//! that follows it hits:
//!
//! ```text
//! addi x2, x0, data_base
//! addi x3, x0, accesses
//! lw   x4, 0(x2)
//! sw   x4, 0(x2)
//! addi x2, x2, stride      ; repeated before every further access
//! lw   x4, 0(x2)
//! sw   x4, 0(x2)
//! ```

use serde::Deserialize;

use crate::common::constants::{DEFAULT_DATA_BASE, DEFAULT_DATA_STRIDE};
use crate::common::FixtureError;
use crate::config::Config;
use crate::fixture::{DataSegment, Fixture, FixtureBuilder};
use crate::isa::abi::{REG_GP, REG_SP, REG_TP, REG_ZERO};
use crate::isa::instruction::Instruction;

/// Parameters of the stock scenario.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HitRateScenario {
    /// Address of the first data word.
    pub data_base: u32,
    /// Distance in bytes between consecutive data words.
    pub stride: u32,
    /// Number of load/store pairs.
    pub accesses: u32,
}

impl Default for HitRateScenario {
    fn default() -> Self {
        Self {
            data_base: DEFAULT_DATA_BASE,
            stride: DEFAULT_DATA_STRIDE,
            accesses: 4,
        }
    }
}

impl HitRateScenario {
    /// The scenario program, before any immediate policy is applied.
    pub fn program(&self) -> Vec<Instruction> {
        let mut program = vec![
            Instruction::addi(REG_SP, REG_ZERO, self.data_base as i32),
            Instruction::addi(REG_GP, REG_ZERO, self.accesses as i32),
        ];
        for i in 0..self.accesses {
            if i > 0 {
                program.push(Instruction::addi(REG_SP, REG_SP, self.stride as i32));
            }
            program.push(Instruction::lw(REG_TP, REG_SP, 0));
            program.push(Instruction::sw(REG_TP, REG_SP, 0));
        }
        program
    }

    /// One zero-initialized word per access.
    pub fn data_segments(&self) -> impl Iterator<Item = DataSegment> + '_ {
        (0..self.accesses).map(|i| {
            let addr = self.data_base.wrapping_add(i.wrapping_mul(self.stride));
            DataSegment::new(addr, 0)
        })
    }

    /// Builds the scenario fixture under `config`'s code base and immediate policy.
    ///
    /// # Errors
    ///
    /// Whatever [`FixtureBuilder::build`] reports, e.g. `ImmediateOutOfRange` for a
    /// data base above 2047 under the strict policy.
    pub fn fixture(&self, config: &Config) -> Result<Fixture, FixtureError> {
        self.data_segments()
            .fold(
                FixtureBuilder::new(&config.fixture).instructions(self.program()),
                |b, seg| b.data(seg.addr, seg.value),
            )
            .build()
    }
}
