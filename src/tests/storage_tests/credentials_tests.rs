// Credentials Tests - Testing validation and the credential file

use crate::storage::{CredentialStore, Credentials};
use tempfile::TempDir;

#[test]
fn test_credentials_trim_input() {
    let credentials = Credentials::new("  1101000001 ", "\ttoken123\n");
    assert_eq!(credentials.id_instance, "1101000001");
    assert_eq!(credentials.api_token_instance, "token123");
    assert!(credentials.validate().is_ok());
}

#[test]
fn test_credentials_require_both_fields() {
    let missing_id = Credentials::new("", "token");
    assert_eq!(
        missing_id.validate().expect_err("Missing id accepted").to_string(),
        "idInstance is required"
    );

    let missing_token = Credentials::new("1101000001", "   ");
    assert_eq!(
        missing_token.validate().expect_err("Missing token accepted").to_string(),
        "apiTokenInstance is required"
    );
}

#[test]
fn test_credentials_debug_redacts_token() {
    let credentials = Credentials::new("1101000001", "supersecret");
    let debug = format!("{:?}", credentials);
    assert!(debug.contains("1101000001"));
    assert!(!debug.contains("supersecret"), "Token leaked into Debug output");
}

#[test]
fn test_credentials_wire_names() {
    let credentials = Credentials::new("1101000001", "token");
    let json = serde_json::to_value(&credentials).expect("Failed to serialize");
    assert_eq!(
        json,
        serde_json::json!({ "idInstance": "1101000001", "apiTokenInstance": "token" })
    );
}

#[test]
fn test_credential_store_roundtrip_and_clear() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = CredentialStore::new(temp_dir.path().join("data").join("credentials.json"));

    assert!(store.load().expect("Failed to load").is_none());

    let credentials = Credentials::new("1101000001", "token");
    store.save(&credentials).expect("Failed to save");
    assert!(store.path().exists());
    assert_eq!(store.load().expect("Failed to load"), Some(credentials));

    store.clear().expect("Failed to clear");
    assert!(!store.path().exists());
    assert!(store.load().expect("Failed to load").is_none());

    // Clearing twice is fine
    store.clear().expect("Second clear should succeed");
}

#[test]
fn test_credential_store_corrupt_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("credentials.json");
    std::fs::write(&path, "garbage").expect("Failed to write file");

    let store = CredentialStore::new(&path);
    assert!(matches!(store.load(), Err(crate::Error::Storage(_))));
}
