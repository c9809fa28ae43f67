//! Integration tests for config.rs

use email_archive::config::AppConfig;
use email_archive::encoder::QuotePolicy;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_default_config_values() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_path, None);
    assert_eq!(config.logging.format, "text");
    assert_eq!(config.export.file_name, "emails_actualizados.csv");
    assert_eq!(config.export.mime_type, "text/csv;charset=utf-8;");
    assert_eq!(config.export.quote_style, QuotePolicy::Necessary);
    assert_eq!(config.view.page_size, 50);
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = AppConfig::default();
    config.logging.level = "verbose".into();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.logging.format = "xml".into();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.export.file_name = "  ".into();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.export.file_name = "../out.csv".into();
    assert!(config.validate().is_err());

    let mut config = AppConfig::default();
    config.view.page_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_file_overrides_defaults() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("archive.toml");
    fs::write(
        &path,
        r#"
[logging]
level = "debug"
format = "json"

[export]
quote_style = "all"

[view]
page_size = 20
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).expect("config should load");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.export.quote_style, QuotePolicy::All);
    assert_eq!(config.view.page_size, 20);
    // untouched keys keep their defaults
    assert_eq!(config.export.file_name, "emails_actualizados.csv");
}

#[test]
fn test_load_from_file_is_validated() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[view]\npage_size = 0\n").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

#[test]
fn test_load_from_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(AppConfig::load_from(&dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_unknown_quote_style_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quote.toml");
    fs::write(&path, "[export]\nquote_style = \"sometimes\"\n").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}
