// Settings Tests - Testing defaults, persistence and normalization

use crate::storage::Settings;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.api_url, "https://api.green-api.com");
    assert_eq!(settings.poll_interval_secs, 5);
    assert_eq!(settings.history_count, 10);
    assert_eq!(settings.request_timeout_secs, 30);
    assert_eq!(settings.poll_interval(), Duration::from_secs(5));
}

#[test]
fn test_settings_load_missing_file_returns_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");

    let settings = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_settings_load_empty_file_returns_default() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "  \n").expect("Failed to write file");

    let settings = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_settings_save_and_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("nested").join("settings.json");

    let mut settings = Settings::default();
    settings.api_url = "http://localhost:8080".to_string();
    settings.poll_interval_secs = 2;
    settings.history_count = 25;

    settings.save(&path).expect("Failed to save settings");
    let loaded = Settings::load(&path).expect("Failed to load settings");

    assert_eq!(loaded, settings);
}

#[test]
fn test_settings_partial_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, r#"{ "poll_interval_secs": 3 }"#).expect("Failed to write file");

    let settings = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(settings.poll_interval_secs, 3);
    assert_eq!(settings.history_count, 10);
    assert_eq!(settings.api_url, "https://api.green-api.com");
}

#[test]
fn test_settings_zero_values_are_normalized() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{ "poll_interval_secs": 0, "history_count": 0, "request_timeout_secs": 0 }"#,
    )
    .expect("Failed to write file");

    let settings = Settings::load(&path).expect("Failed to load settings");
    assert_eq!(settings.poll_interval_secs, 1);
    assert_eq!(settings.history_count, 10);
    assert_eq!(settings.request_timeout_secs, 30);
}

#[test]
fn test_settings_invalid_json_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").expect("Failed to write file");

    let result = Settings::load(&path);
    assert!(matches!(result, Err(crate::Error::Storage(_))));
}

#[test]
fn test_poll_interval_never_zero() {
    let settings = Settings {
        poll_interval_secs: 0,
        ..Settings::default()
    };

    assert_eq!(settings.poll_interval(), Duration::from_secs(1));
}
