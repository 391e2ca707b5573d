//! Unit tests for runner configuration.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;

#[test]
fn empty_config_yields_defaults() {
    let config = HarnessConfig::load_from_str("").unwrap();
    assert!(config.runner.filter.is_none());
    assert!(config.default_timeout().is_none());
}

#[test]
fn full_config_parses() {
    let config = HarnessConfig::load_from_str(
        r#"
[runner]
filter = "^net_"
output = "json"
color = "never"

[timeout]
default_ms = 250
mode = "preemptive"
"#,
    )
    .unwrap();

    assert_eq!(config.runner.filter.as_deref(), Some("^net_"));
    assert_eq!(config.runner.output.as_deref(), Some("json"));
    assert_eq!(
        config.default_timeout(),
        Some((Duration::from_millis(250), TimeoutMode::Preemptive))
    );
}

#[test]
fn zero_default_timeout_means_none() {
    let config = HarnessConfig::load_from_str("[timeout]\ndefault_ms = 0\n").unwrap();
    assert!(config.default_timeout().is_none());
}

#[test]
fn unknown_mode_falls_back_to_cooperative() {
    let config =
        HarnessConfig::load_from_str("[timeout]\ndefault_ms = 10\nmode = \"whatever\"\n").unwrap();
    assert_eq!(config.default_timeout().map(|(_, mode)| mode), Some(TimeoutMode::Cooperative));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let error = HarnessConfig::load_from_str("[runner\nfilter = ").unwrap_err();
    assert!(matches!(error, ConfigError::Parse(_)));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = HarnessConfig::load(&dir.path().join("verdict.toml")).unwrap();
    assert!(config.runner.filter.is_none());
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("verdict.toml");
    std::fs::write(&path, "[runner]\nfilter = \"smoke\"\n").unwrap();

    let config = HarnessConfig::load(&path).unwrap();
    assert_eq!(config.runner.filter.as_deref(), Some("smoke"));
}
