//! Cache geometry and address decomposition.
//!
//! An address splits into `tag | set index | offset`: the offset selects a byte
//! within a line, the set index selects one of `sets` sets, and the tag holds the
//! next `tag_bits` bits. With the default 64-byte lines, 16 sets and a 17-bit
//! address space, bits 0-5 are the offset, bits 6-9 the set index, and bits 10-16
//! the tag. Bits above the address space are dropped from the tag, so addresses
//! that differ only there alias to the same line.

use serde::Deserialize;

use crate::common::FixtureError;

mod defaults {
    /// Cache line size in bytes.
    pub const LINE_BYTES: u32 = 64;
    /// Number of sets (16 sets × 4 ways = 64 lines, 4 KiB).
    pub const SETS: u32 = 16;
    /// Associativity.
    pub const WAYS: u32 = 4;
    /// Width of the simulator's physical address (128 KiB memory).
    pub const ADDRESS_BITS: u32 = 17;
}

/// Geometry of the cache the fixture targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheGeometry {
    /// Line size in bytes (power of two).
    pub line_bytes: u32,
    /// Number of sets (power of two).
    pub sets: u32,
    /// Lines per set.
    pub ways: u32,
    /// Width of the simulated address space in bits.
    pub address_bits: u32,
}

impl Default for CacheGeometry {
    fn default() -> Self {
        Self {
            line_bytes: defaults::LINE_BYTES,
            sets: defaults::SETS,
            ways: defaults::WAYS,
            address_bits: defaults::ADDRESS_BITS,
        }
    }
}

/// An address split into its cache coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressParts {
    /// High bits above the set index.
    pub tag: u32,
    /// Set index.
    pub set: u32,
    /// Byte offset within the line.
    pub offset: u32,
}

impl CacheGeometry {
    /// Checks that the geometry describes a realizable cache.
    ///
    /// # Errors
    ///
    /// `FixtureError::InvalidGeometry` when the line size or set count is zero or
    /// not a power of two, the cache has no ways, or the address width cannot hold
    /// the offset and index bits.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if !self.line_bytes.is_power_of_two() {
            return Err(FixtureError::InvalidGeometry(format!(
                "line size {} is not a power of two",
                self.line_bytes
            )));
        }
        if !self.sets.is_power_of_two() {
            return Err(FixtureError::InvalidGeometry(format!(
                "set count {} is not a power of two",
                self.sets
            )));
        }
        if self.ways == 0 {
            return Err(FixtureError::InvalidGeometry(
                "ways must be at least 1".into(),
            ));
        }
        let used = self.offset_bits() + self.index_bits();
        if self.address_bits < used || self.address_bits > 32 {
            return Err(FixtureError::InvalidGeometry(format!(
                "address width {} must lie in {used}..=32",
                self.address_bits
            )));
        }
        Ok(())
    }

    /// Number of offset bits (log2 of the line size).
    pub const fn offset_bits(&self) -> u32 {
        self.line_bytes.trailing_zeros()
    }

    /// Number of set index bits (log2 of the set count).
    pub const fn index_bits(&self) -> u32 {
        self.sets.trailing_zeros()
    }

    /// Number of tag bits within the simulated address space.
    pub const fn tag_bits(&self) -> u32 {
        self.address_bits
            .saturating_sub(self.offset_bits() + self.index_bits())
    }

    /// Total capacity in bytes.
    pub const fn capacity(&self) -> u64 {
        self.line_bytes as u64 * self.sets as u64 * self.ways as u64
    }

    /// Returns true when `addr` lies inside the simulated address space.
    pub const fn in_address_space(&self, addr: u32) -> bool {
        match addr.checked_shr(self.address_bits) {
            Some(high) => high == 0,
            None => true,
        }
    }

    /// Splits `addr` into tag, set index and offset.
    ///
    /// The tag is masked to [`tag_bits`](Self::tag_bits).
    pub fn decompose(&self, addr: u32) -> AddressParts {
        let offset_bits = self.offset_bits();
        let index_bits = self.index_bits();
        let tag_mask = 1u32
            .checked_shl(self.tag_bits())
            .map_or(u32::MAX, |bit| bit - 1);
        AddressParts {
            tag: addr.checked_shr(offset_bits + index_bits).unwrap_or(0) & tag_mask,
            set: addr.checked_shr(offset_bits).unwrap_or(0) & self.sets.wrapping_sub(1),
            offset: addr & self.line_bytes.wrapping_sub(1),
        }
    }

    /// Address of the first byte of the line holding `addr`.
    pub const fn line_address(&self, addr: u32) -> u32 {
        addr & !self.line_bytes.wrapping_sub(1)
    }
}
