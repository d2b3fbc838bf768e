//! Tests for config file discovery and loading

use std::fs;
use std::path::PathBuf;

use jslink_config::{ConfigDiscovery, ConfigError, load_file};
use tempfile::TempDir;

#[test]
fn discovers_jslink_toml() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("jslink.toml"),
        r#"
sources = ["src"]
recursive = true
overwrite = true
"#,
    )
    .unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    let found = discovery.find().unwrap();
    assert_eq!(found.file_name().unwrap(), "jslink.toml");

    let config = discovery.load().unwrap();
    assert_eq!(config.sources, vec![PathBuf::from("src")]);
    assert!(config.recursive);
    assert!(config.overwrite);
}

#[test]
fn discovers_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
  "name": "test",
  "jslink": {
    "sources": ["js"],
    "destination": "build"
  }
}"#,
    )
    .unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.sources, vec![PathBuf::from("js")]);
    assert_eq!(config.destination, PathBuf::from("build"));
}

#[test]
fn toml_wins_over_package_json() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("jslink.toml"), "sources = [\"a\"]\n").unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "jslink": { "sources": ["b"] } }"#).unwrap();

    let config = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(config.sources, vec![PathBuf::from("a")]);
}

#[test]
fn package_json_without_field_is_ignored() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), r#"{ "name": "plain" }"#).unwrap();

    let discovery = ConfigDiscovery::new(dir.path());
    assert!(discovery.find().is_none());
    assert!(matches!(discovery.load(), Err(ConfigError::NotFound)));
}

#[test]
fn explicit_file_reports_bad_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "sources = [").unwrap();

    let err = load_file(&path).unwrap_err();
    match err {
        ConfigError::InvalidValue { field, hint } => {
            assert_eq!(field, "toml");
            assert!(hint.unwrap().contains("Invalid TOML"));
        }
        other => panic!("expected InvalidValue, got {other:?}"),
    }
}

#[test]
fn explicit_package_json_needs_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    fs::write(&path, r#"{ "name": "plain" }"#).unwrap();

    let err = load_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "jslink"));
}
