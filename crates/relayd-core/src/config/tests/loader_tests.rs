use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::tempdir;

use crate::config::error::ConfigError;
use crate::config::loader::{load_source, ConfigFormat};

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

#[test]
fn test_format_from_path() {
    assert_eq!(
        ConfigFormat::from_path(&PathBuf::from("conf.json")),
        Some(ConfigFormat::Json)
    );
    #[cfg(feature = "yaml-config")]
    {
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("conf.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("conf.YML")),
            Some(ConfigFormat::Yaml)
        );
    }
    #[cfg(feature = "toml-config")]
    assert_eq!(
        ConfigFormat::from_path(&PathBuf::from("conf.toml")),
        Some(ConfigFormat::Toml)
    );
    assert_eq!(ConfigFormat::from_path(&PathBuf::from("conf.ini")), None);
    assert_eq!(ConfigFormat::from_path(&PathBuf::from("conf")), None);
}

#[test]
fn test_load_json_source() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = write_file(&dir, "relayd.json", r#"{"input": [{"name": "statsd"}]}"#);

    let tree = load_source(&path).expect("load failed");
    assert_eq!(tree, json!({"input": [{"name": "statsd"}]}));
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_load_yaml_source() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = write_file(&dir, "relayd.yaml", "input:\n  - name: statsd\n    port: 8125\n");

    let tree = load_source(&path).expect("load failed");
    assert_eq!(tree, json!({"input": [{"name": "statsd", "port": 8125}]}));
}

#[cfg(feature = "toml-config")]
#[test]
fn test_load_toml_source() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = write_file(&dir, "relayd.toml", "[[input]]\nname = \"statsd\"\n");

    let tree = load_source(&path).expect("load failed");
    assert_eq!(tree, json!({"input": [{"name": "statsd"}]}));
}

#[test]
fn test_load_missing_source_is_not_found() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("absent.json");

    let error = load_source(&path).expect_err("load should fail");
    assert!(matches!(error, ConfigError::SourceNotFound { .. }));
    assert!(!error.is_recoverable());
}

#[test]
fn test_load_malformed_source_is_recoverable_parse_error() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = write_file(&dir, "broken.json", "{not json");

    let error = load_source(&path).expect_err("load should fail");
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error.is_recoverable());
}

#[test]
fn test_load_unrecognized_extension_is_parse_error() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = write_file(&dir, "conf.ini", "key=value");

    let error = load_source(&path).expect_err("load should fail");
    assert!(matches!(error, ConfigError::Parse { .. }));
}
