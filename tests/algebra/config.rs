//! Engine Configuration Tests

use crate::common::*;
use std::io::Write;
use tempora::{EngineConfig, IntervalOrder};

#[test]
fn test_default_toml_parses_to_default() {
    let parsed = EngineConfig::from_toml_str(EngineConfig::default_toml()).unwrap();
    assert_eq!(parsed, EngineConfig::default());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_zone = \"+05:30\"").unwrap();
    writeln!(file, "interval_order = \"normalize\"").unwrap();

    let config = EngineConfig::load(file.path()).unwrap();
    assert_eq!(config.interval_order, IntervalOrder::Normalize);
    let resolved = config.resolve().unwrap();
    assert_eq!(resolved.zone, Zone::for_id("+05:30").unwrap());
}

#[test]
fn test_missing_keys_take_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config.default_zone, "UTC");
    assert_eq!(config.interval_order, IntervalOrder::Reject);
}

#[test]
fn test_bad_values_are_config_errors() {
    assert!(matches!(
        EngineConfig::from_toml_str("interval_order = \"sometimes\""),
        Err(Error::Config(_))
    ));
    let config = EngineConfig {
        default_zone: "Mars/Olympus".to_string(),
        ..EngineConfig::default()
    };
    assert!(matches!(config.resolve(), Err(Error::Config(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        EngineConfig::load(&dir.path().join("tempora.toml")),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_toml_round_trip() {
    let config = EngineConfig {
        default_zone: "-08:00".to_string(),
        interval_order: IntervalOrder::Normalize,
    };
    let text = config.to_toml_string().unwrap();
    assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_install_once() {
    // installing the defaults leaves every other test's behaviour unchanged
    let config = EngineConfig::default();
    let _ = config.install();
    assert!(matches!(config.install(), Err(Error::Config(_))));
}
