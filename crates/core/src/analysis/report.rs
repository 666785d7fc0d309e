//! Expected-outcome report.
//!
//! Replays a fixture's trace through the advisory cache model and summarizes the
//! hit rates the simulator is expected to print. The report is informational;
//! nothing in it feeds back into the written task file.

use std::fmt;

use tracing::debug;

use super::trace::{Access, AccessKind, trace};
use crate::cache::{AddressParts, CacheGeometry, CacheModel, Outcome};
use crate::common::FixtureError;
use crate::fixture::Fixture;

const HEAVY_RULE: &str = "==========================================================";
const LIGHT_RULE: &str = "----------------------------------------------------------";

/// Hits out of accesses for one access class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitRate {
    /// Accesses that hit.
    pub hits: u64,
    /// Total accesses.
    pub accesses: u64,
}

impl HitRate {
    /// A rate of `hits` out of `accesses`.
    pub const fn new(hits: u64, accesses: u64) -> Self {
        Self { hits, accesses }
    }

    /// Hit rate in percent; 0 when there were no accesses.
    pub fn percent(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 * 100.0 / self.accesses as f64
        }
    }

    const fn record(&mut self, outcome: Outcome) {
        self.accesses += 1;
        if outcome.is_hit() {
            self.hits += 1;
        }
    }
}

impl fmt::Display for HitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} hits ({:.4}%)",
            self.hits,
            self.accesses,
            self.percent()
        )
    }
}

/// One replayed access with its cache coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessRecord {
    /// The traced access.
    pub access: Access,
    /// Address split under the report's geometry.
    pub parts: AddressParts,
    /// Predicted outcome.
    pub outcome: Outcome,
}

/// Predicted hit/miss pattern of a fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedReport {
    /// Geometry the prediction was made for.
    pub geometry: CacheGeometry,
    /// Instruction fetches.
    pub instructions: HitRate,
    /// Loads and stores.
    pub data: HitRate,
    /// Every access in program order.
    pub records: Vec<AccessRecord>,
    /// Accesses outside declared memory, address-space overruns and trace caveats.
    pub warnings: Vec<String>,
}

/// Predicts the simulator's unified-cache hit rates for `fixture`.
///
/// # Errors
///
/// `FixtureError::InvalidGeometry` when `geometry` fails validation.
pub fn analyze(
    fixture: &Fixture,
    geometry: &CacheGeometry,
) -> Result<ExpectedReport, FixtureError> {
    geometry.validate()?;

    let traced = trace(fixture);
    let mut model = CacheModel::new(*geometry);
    let mut instructions = HitRate::default();
    let mut data = HitRate::default();
    let mut records = Vec::with_capacity(traced.accesses.len());
    let mut warnings = traced.notes;

    for access in traced.accesses {
        if !geometry.in_address_space(access.addr) {
            warnings.push(format!(
                "{:#010x}: {} of {:#010x} lies beyond the {}-bit address space",
                access.pc, access.kind, access.addr, geometry.address_bits
            ));
        }
        if access.kind.is_data() && !declared(fixture, access.addr) {
            warnings.push(format!(
                "{:#010x}: {} of {:#010x} is outside every declared segment",
                access.pc, access.kind, access.addr
            ));
        }

        let outcome = model.access(access.addr);
        match access.kind {
            AccessKind::Fetch => instructions.record(outcome),
            AccessKind::Load | AccessKind::Store => data.record(outcome),
        }
        records.push(AccessRecord {
            access,
            parts: geometry.decompose(access.addr),
            outcome,
        });
    }

    for w in &warnings {
        debug!("{w}");
    }
    debug!(%instructions, %data, warnings = warnings.len(), "expected outcome computed");

    Ok(ExpectedReport {
        geometry: *geometry,
        instructions,
        data,
        records,
        warnings,
    })
}

fn declared(fixture: &Fixture, addr: u32) -> bool {
    fixture.code().contains(addr) || fixture.data().iter().any(|seg| seg.contains(addr))
}

impl fmt::Display for ExpectedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = &self.geometry;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(
            f,
            "EXPECTED CACHE OUTCOME ({} sets x {} ways, {}-byte lines, LRU)",
            g.sets, g.ways, g.line_bytes
        )?;
        writeln!(f, "{HEAVY_RULE}")?;
        writeln!(f, "  instructions           {}", self.instructions)?;
        writeln!(f, "  data                   {}", self.data)?;
        writeln!(f, "{LIGHT_RULE}")?;
        writeln!(
            f,
            "  pc          kind   addr        tag   set  offset  outcome"
        )?;
        for r in &self.records {
            writeln!(
                f,
                "  {:#010x}  {:<5}  {:#010x}  {:<4}  {:<3}  {:<6}  {}",
                r.access.pc,
                r.access.kind,
                r.access.addr,
                r.parts.tag,
                r.parts.set,
                r.parts.offset,
                if r.outcome.is_hit() { "hit" } else { "miss" }
            )?;
        }
        if !self.warnings.is_empty() {
            writeln!(f, "{LIGHT_RULE}")?;
            for w in &self.warnings {
                writeln!(f, "  warning: {w}")?;
            }
        }
        writeln!(f, "{HEAVY_RULE}")
    }
}
