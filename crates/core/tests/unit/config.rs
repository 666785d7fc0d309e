//! # Configuration Tests
//!
//! Defaults, partial JSON, policy parsing and file loading.

use std::fs;

use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;

use rvtask_core::FixtureError;
use rvtask_core::cache::CacheGeometry;
use rvtask_core::config::{Config, FixtureConfig, ImmediateMode};
use rvtask_core::scenario::HitRateScenario;

#[test]
fn defaults_describe_the_stock_fixture() {
    let config = Config::default();
    assert_eq!(config.fixture.code_base, 0x1000);
    assert_eq!(config.fixture.immediates, ImmediateMode::Truncate);
    assert_eq!(
        config.cache,
        CacheGeometry {
            line_bytes: 64,
            sets: 16,
            ways: 4,
            address_bits: 17,
        }
    );
    assert_eq!(
        config.scenario,
        HitRateScenario {
            data_base: 0x2000,
            stride: 1024,
            accesses: 4,
        }
    );
}

#[test]
fn empty_json_is_the_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let json = r#"{ "scenario": { "accesses": 6 }, "cache": { "sets": 8 } }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(config.scenario.accesses, 6);
    assert_eq!(config.scenario.stride, 1024);
    assert_eq!(config.cache.sets, 8);
    assert_eq!(config.cache.ways, 4);
    assert_eq!(config.fixture, FixtureConfig::default());
}

#[rstest]
#[case("truncate", ImmediateMode::Truncate)]
#[case("strict", ImmediateMode::Strict)]
#[case("expand", ImmediateMode::Expand)]
fn immediate_modes_deserialize(#[case] name: &str, #[case] mode: ImmediateMode) {
    let json = format!(r#"{{ "fixture": {{ "immediates": "{name}" }} }}"#);
    assert_eq!(Config::from_json(&json).unwrap().fixture.immediates, mode);
    assert_eq!(name.parse::<ImmediateMode>().unwrap(), mode);
    assert_eq!(mode.to_string(), name);
}

#[test]
fn immediate_mode_parsing_ignores_case() {
    let mode: ImmediateMode = "EXPAND".parse().unwrap();
    assert_eq!(mode, ImmediateMode::Expand);
    assert!("widen".parse::<ImmediateMode>().is_err());
}

#[rstest]
#[case::not_json("code_base = 1")]
#[case::wrong_type(r#"{ "fixture": { "code_base": "0x1000" } }"#)]
#[case::unknown_mode(r#"{ "fixture": { "immediates": "widen" } }"#)]
fn malformed_json_is_a_config_error(#[case] json: &str) {
    assert!(matches!(
        Config::from_json(json),
        Err(FixtureError::Config(_))
    ));
}

#[test]
fn load_reads_a_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rvtask.json");
    fs::write(&path, r#"{ "fixture": { "code_base": 8192 } }"#).unwrap();
    assert_eq!(Config::load(&path).unwrap().fixture.code_base, 0x2000);
}

#[test]
fn load_of_a_missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.json")),
        Err(FixtureError::Io(_))
    ));
}

#[test]
fn scenario_program_matches_its_parameters() {
    let scenario = HitRateScenario {
        accesses: 2,
        ..HitRateScenario::default()
    };
    assert_eq!(scenario.program().len(), 2 + 2 + 3);
    let addrs: Vec<u32> = scenario.data_segments().map(|s| s.addr).collect();
    assert_eq!(addrs, vec![0x2000, 0x2400]);
}
