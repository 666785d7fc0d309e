//! Cache geometry and expected-outcome modelling.
//!
//! The generator never simulates the target cache; it only chooses addresses
//! with a known geometry in mind. This module provides:
//! 1. **Geometry:** Offset / set index / tag decomposition of an address.
//! 2. **Model:** A small unified LRU set model that predicts hit/miss outcomes for reports.

/// Cache geometry and address decomposition.
pub mod geometry;

/// Advisory replacement model for expected-outcome reports.
pub mod model;

pub use geometry::{AddressParts, CacheGeometry};
pub use model::{CacheModel, Outcome};
