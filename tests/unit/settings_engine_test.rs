//! Unit tests for the SettingsEngine public API.
//!
//! Exercises default loading, persistence across instances, reset, and
//! the handling of partial or malformed config files.

use fontsurvey::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use fontsurvey::types::errors::ConfigError;
use fontsurvey::types::settings::{FontSourceKind, SurveySettings, DEFAULT_API_BASE};
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    assert_eq!(settings, SurveySettings::default());
    assert_eq!(settings.api_base, DEFAULT_API_BASE);
    assert_eq!(settings.font_source, FontSourceKind::System);
    assert!(
        !dir.path().join("settings.json").exists(),
        "load must not create the file"
    );
}

#[test]
fn test_save_then_load_in_new_instance() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"api_base":"http://localhost:8080","font_source":"browser"}"#,
    )
    .unwrap();

    {
        let mut engine = engine_in_temp(&dir);
        engine.load().unwrap();
        engine.save().unwrap();
    }

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.api_base, "http://localhost:8080");
    assert_eq!(settings.font_source, FontSourceKind::Browser);
    assert_eq!(engine.get_settings(), &settings);
}

#[test]
fn test_partial_file_fills_missing_fields_with_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), r#"{"font_source":"none"}"#).unwrap();

    let mut engine = engine_in_temp(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings.font_source, FontSourceKind::None);
    assert_eq!(settings.api_base, DEFAULT_API_BASE);
}

#[test]
fn test_malformed_file_is_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();

    let mut engine = engine_in_temp(&dir);
    match engine.load() {
        Err(ConfigError::SerializationError(msg)) => {
            assert!(msg.starts_with("Failed to parse config file"))
        }
        other => panic!("expected serialization error, got {:?}", other),
    }
}

#[test]
fn test_reset_restores_defaults_on_disk() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"api_base":"http://localhost:8080","font_source":"browser"}"#,
    )
    .unwrap();

    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();
    engine.reset().unwrap();
    assert_eq!(engine.get_settings(), &SurveySettings::default());

    let mut fresh = engine_in_temp(&dir);
    assert_eq!(fresh.load().unwrap(), SurveySettings::default());
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b").join("settings.json");
    let engine = SettingsEngine::new(Some(nested.to_string_lossy().to_string()));

    engine.save().unwrap();
    assert!(nested.exists());
    assert_eq!(engine.get_config_path(), nested.to_string_lossy());
}
