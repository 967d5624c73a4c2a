//! Integration tests for the tasknest-config crate.

use std::fs;

use secrecy::ExposeSecret;
use tasknest_config::{
    Config, DEFAULT_API_URL, DEFAULT_IDENTITY_ENDPOINT, PreferenceStore, Preferences,
    auth::{resolve_api_token, resolve_identity_key},
};
use tempfile::TempDir;

#[test]
fn config_load_from_json5_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tasknest.json5");

    fs::write(
        &config_path,
        r#"
        {
            // Where the task API lives
            api_url: "https://tasks.example.com",
            identity: {
                endpoint: "http://localhost:9099/v1",
                api_key: "web-key",
            },
            notification_secs: 6,
        }
        "#,
    )
    .unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.api_url, "https://tasks.example.com");
    assert_eq!(config.identity.endpoint, "http://localhost:9099/v1");
    assert_eq!(config.identity.api_key.as_deref(), Some("web-key"));
    assert_eq!(config.notification_duration().as_secs(), 6);
}

#[test]
fn empty_file_uses_crate_defaults() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tasknest.json");
    fs::write(&config_path, "{}").unwrap();

    let config = Config::load_from(&config_path).unwrap();

    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.identity.endpoint, DEFAULT_IDENTITY_ENDPOINT);
    assert!(config.identity.api_key.is_none());
}

#[test]
fn config_rejects_out_of_range_notification_time() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("tasknest.json");
    fs::write(&config_path, r#"{"notification_secs": 0}"#).unwrap();

    assert!(Config::load_from(&config_path).is_err());
}

#[test]
fn cli_secrets_win_over_config() {
    let config = Config {
        api_token: Some("from-file".to_string()),
        ..Config::default()
    };

    let token = resolve_api_token(Some("from-cli"), &config).unwrap();
    assert_eq!(token.expose_secret(), "from-cli");

    let token = resolve_api_token(Some("   "), &config).unwrap();
    assert_eq!(token.expose_secret(), "from-file");

    assert!(resolve_identity_key(None, &Config::default()).is_none());
}

#[test]
fn preferences_file_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("preferences.json");
    let store = PreferenceStore::new(&path);

    assert_eq!(store.load().unwrap(), Preferences::default());

    store.set_dark_mode(true).unwrap();
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "darkMode": true }));

    store.set_dark_mode(false).unwrap();
    assert!(!store.load().unwrap().dark_mode);
}
