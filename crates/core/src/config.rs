//! Configuration system for the task file generator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** The code base, data layout and cache geometry of the stock fixture.
//! 2. **Structures:** Fixture, cache and scenario sections, each optional in JSON.
//! 3. **Immediate policy:** How out-of-range immediates are treated when a fixture is built.
//!
//! Configuration is supplied as JSON (`rvtask generate -c config.json`) or use `Config::default()`.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::cache::geometry::CacheGeometry;
use crate::common::FixtureError;
use crate::scenario::HitRateScenario;

/// Default configuration constants for the generator.
mod defaults {
    use crate::common::constants;

    /// Base address of the generated code block; also the initial PC.
    pub const CODE_BASE: u32 = constants::DEFAULT_CODE_BASE;
}

/// Policy applied to immediates that do not fit their instruction format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImmediateMode {
    /// Mask to the field width, as the hardware would. A warning is logged.
    #[default]
    Truncate,
    /// Reject the fixture with `ImmediateOutOfRange` or `MisalignedBranch`.
    Strict,
    /// Rewrite an oversized `addi rd, x0, imm` into an I-type load sequence;
    /// any other oversized immediate is rejected as under `Strict`.
    Expand,
}

impl FromStr for ImmediateMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "strict" => Ok(Self::Strict),
            "expand" => Ok(Self::Expand),
            other => Err(format!(
                "unknown immediate mode '{other}' (expected truncate, strict or expand)"
            )),
        }
    }
}

impl fmt::Display for ImmediateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Truncate => "truncate",
            Self::Strict => "strict",
            Self::Expand => "expand",
        })
    }
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rvtask_core::config::{Config, ImmediateMode};
///
/// let json = r#"{
///     "fixture": { "code_base": 8192, "immediates": "strict" },
///     "cache": { "ways": 2 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.fixture.code_base, 0x2000);
/// assert_eq!(config.fixture.immediates, ImmediateMode::Strict);
/// assert_eq!(config.cache.ways, 2);
/// assert_eq!(config.cache.sets, 16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code placement and immediate policy.
    pub fixture: FixtureConfig,
    /// Cache geometry assumed by address selection and reports.
    pub cache: CacheGeometry,
    /// Stock hit-rate scenario parameters.
    pub scenario: HitRateScenario,
}

impl Config {
    /// Parses a configuration from a JSON string. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// `FixtureError::Config` when the JSON is malformed or has wrongly typed values.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// `FixtureError::Io` when the file cannot be read, `FixtureError::Config` when it
    /// does not parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Code placement and validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixtureConfig {
    /// Base address of the code segment; the initial PC.
    pub code_base: u32,
    /// Policy for immediates that do not fit their field.
    pub immediates: ImmediateMode,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            code_base: defaults::CODE_BASE,
            immediates: ImmediateMode::default(),
        }
    }
}
