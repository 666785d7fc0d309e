//! Advisory cache model for expected-outcome reports.
//!
//! Models a unified (instruction + data) set-associative cache with LRU
//! replacement, matching the simulator's LRU run. Each set keeps a usage stack
//! of line tags: index 0 is MRU, the last index is LRU. An access that finds its
//! tag moves it to the front (hit); otherwise the tag is pushed to the front and
//! the LRU entry falls off once the set holds `ways` lines (miss).
//!
//! Nothing here feeds back into the written task file.

use super::geometry::CacheGeometry;

/// Predicted outcome of one access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The line was resident.
    Hit,
    /// The line had to be filled.
    Miss,
}

impl Outcome {
    /// Returns true for `Hit`.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Unified LRU set model.
#[derive(Debug, Clone)]
pub struct CacheModel {
    geometry: CacheGeometry,
    /// One usage stack of tags per set.
    usage: Vec<Vec<u32>>,
}

impl CacheModel {
    /// Creates an empty (cold) model for `geometry`.
    ///
    /// The geometry is expected to have passed [`CacheGeometry::validate`].
    pub fn new(geometry: CacheGeometry) -> Self {
        let ways = geometry.ways as usize;
        let usage = (0..geometry.sets)
            .map(|_| Vec::with_capacity(ways))
            .collect();
        Self { geometry, usage }
    }

    /// Geometry the model was built for.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Records an access to `addr` and returns whether it hits.
    pub fn access(&mut self, addr: u32) -> Outcome {
        let parts = self.geometry.decompose(addr);
        let ways = self.geometry.ways as usize;
        let Some(stack) = self.usage.get_mut(parts.set as usize) else {
            return Outcome::Miss;
        };

        if let Some(pos) = stack.iter().position(|&t| t == parts.tag) {
            stack[..=pos].rotate_right(1);
            Outcome::Hit
        } else {
            stack.insert(0, parts.tag);
            stack.truncate(ways);
            Outcome::Miss
        }
    }

    /// Number of lines currently resident in `set`.
    pub fn occupancy(&self, set: u32) -> usize {
        self.usage.get(set as usize).map_or(0, Vec::len)
    }
}
