//! Unit tests for settings resolution
//!
//! Tests cover:
//! - Priority order: CLI > environment > TOML file > compiled default
//! - TOML parsing, including partial files and the [logging] table
//! - Malformed and missing explicit config files
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate DOCSMOKE_MONGO_URI are marked with #[serial].

use docsmoke_common::config::{
    load_toml_config, LoggingConfig, SettingsResolver, TomlConfig, DEFAULT_DATABASE,
    DEFAULT_MONGO_URI, URI_ENV_VAR,
};
use docsmoke_common::Error;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test helper: write `content` to a config.toml inside a fresh temp dir
fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(URI_ENV_VAR);

    // Empty config file stands in for "no config" without depending on $HOME
    let (_dir, path) = write_config("");
    let settings = SettingsResolver::new()
        .with_config_path(Some(path))
        .resolve()
        .unwrap();

    assert_eq!(settings.mongo_uri, DEFAULT_MONGO_URI);
    assert_eq!(settings.database, DEFAULT_DATABASE);
    assert!(!settings.reset_collections);
    assert_eq!(settings.log_level, "info");
}

#[test]
#[serial]
fn test_resolver_toml_value_used_when_env_unset() {
    env::remove_var(URI_ENV_VAR);

    let (_dir, path) = write_config(
        r#"
        mongo_uri = "mongodb://toml-host:27017/h6"
        reset_collections = true

        [logging]
        level = "debug"
        "#,
    );

    let settings = SettingsResolver::new()
        .with_config_path(Some(path))
        .resolve()
        .unwrap();

    assert_eq!(settings.mongo_uri, "mongodb://toml-host:27017/h6");
    assert!(settings.reset_collections);
    assert_eq!(settings.log_level, "debug");
}

#[test]
#[serial]
fn test_resolver_env_var_beats_toml() {
    let (_dir, path) = write_config(r#"mongo_uri = "mongodb://toml-host/h6""#);
    env::set_var(URI_ENV_VAR, "mongodb://env-host/h6");

    let settings = SettingsResolver::new()
        .with_config_path(Some(path))
        .resolve()
        .unwrap();

    assert_eq!(settings.mongo_uri, "mongodb://env-host/h6");

    // Cleanup
    env::remove_var(URI_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_cli_arg_takes_precedence() {
    let (_dir, path) = write_config(r#"mongo_uri = "mongodb://toml-host/h6""#);
    env::set_var(URI_ENV_VAR, "mongodb://env-host/h6");

    let settings = SettingsResolver::new()
        .with_cli_uri(Some("mongodb://cli-host/h6".to_string()))
        .with_config_path(Some(path))
        .resolve()
        .unwrap();

    assert_eq!(settings.mongo_uri, "mongodb://cli-host/h6");

    // Cleanup
    env::remove_var(URI_ENV_VAR);
}

#[test]
#[serial]
fn test_resolver_custom_env_var_name() {
    env::set_var("DOCSMOKE_TEST_ALT_URI", "mongodb://alt-host/h6");
    let (_dir, path) = write_config("");

    let settings = SettingsResolver::new()
        .with_env_var("DOCSMOKE_TEST_ALT_URI")
        .with_config_path(Some(path))
        .resolve()
        .unwrap();

    assert_eq!(settings.mongo_uri, "mongodb://alt-host/h6");

    env::remove_var("DOCSMOKE_TEST_ALT_URI");
}

#[test]
#[serial]
fn test_resolver_rejects_empty_uri() {
    env::remove_var(URI_ENV_VAR);

    let result = SettingsResolver::new()
        .with_cli_uri(Some("   ".to_string()))
        .resolve();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_missing_explicit_config_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("does-not-exist.toml");

    let result = SettingsResolver::new().with_config_path(Some(path)).resolve();

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_file_is_an_error() {
    let (_dir, path) = write_config("mongo_uri = [unterminated");

    let result = load_toml_config(&path);

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("Invalid config file")),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_partial_toml_config_fills_defaults() {
    let (_dir, path) = write_config(r#"database = "blog""#);

    let config = load_toml_config(&path).unwrap();

    assert_eq!(
        config,
        TomlConfig {
            mongo_uri: None,
            database: Some("blog".to_string()),
            reset_collections: None,
            logging: LoggingConfig::default(),
        }
    );
}

#[test]
fn test_logging_table_without_level_uses_info() {
    let (_dir, path) = write_config("[logging]\n");

    let config = load_toml_config(&path).unwrap();

    assert_eq!(config.logging.level, "info");
}
