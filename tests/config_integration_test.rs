//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use vendorsync::config::load_config;
use vendorsync::domain::SheetId;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: [&str; 11] = [
    "VENDORSYNC_APPLICATION_DRY_RUN",
    "VENDORSYNC_SHEET_SHEET_ID",
    "VENDORSYNC_SHEET_ACCESS_TOKEN",
    "VENDORSYNC_PLATFORM_BASE_URL",
    "VENDORSYNC_PLATFORM_API_TOKEN",
    "VENDORSYNC_SYNC_WRITE_BACK",
    "SMARTSHEET_ACCESS_TOKEN",
    "CYBERGRX_API",
    "CYBERGRX_API_TOKEN",
    "TEST_SHEET_TOKEN",
    "TEST_PLATFORM_TOKEN",
];

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const MINIMAL_CONFIG: &str = r#"
[sheet]
access_token = "sheet-token"
sheet_name = "Vendors"

[platform]
api_token = "platform-token"
"#;

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[sheet]
base_url = "https://api.smartsheet.eu/2.0"
access_token = "sheet-token"
sheet_id = 4821
timeout_seconds = 30

[sheet.retry]
max_retries = 5
initial_delay_ms = 200

[platform]
base_url = "https://api.example.com/"
api_token = "platform-token"
skip_residual_risk = false

[sync]
submit_scoping = false

[logging]
local_enabled = true
local_path = "/tmp/vendorsync"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.sheet.base_url, "https://api.smartsheet.eu/2.0");
    assert_eq!(config.sheet.sheet_id, Some(SheetId::new(4821)));
    assert_eq!(config.sheet.timeout_seconds, 30);
    assert_eq!(config.sheet.retry.max_retries, 5);
    assert_eq!(config.sheet.retry.initial_delay_ms, 200);
    assert_eq!(config.platform.base_url, "https://api.example.com");
    assert!(!config.platform.skip_residual_risk);
    assert!(config.sync.create_missing);
    assert!(!config.sync.submit_scoping);
    assert!(config.sync.write_back);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(MINIMAL_CONFIG);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.sheet.base_url, "https://api.smartsheet.com/2.0");
    assert_eq!(config.platform.base_url, "https://api.cybergrx.com");
    assert!(config.platform.skip_residual_risk);
    assert_eq!(config.platform.timeout_seconds, 300);
    assert_eq!(config.sheet.retry.max_retries, 3);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_SHEET_TOKEN", "substituted-sheet");
    std::env::set_var("TEST_PLATFORM_TOKEN", "substituted-platform");

    let file = write_config(
        r#"
[sheet]
# access_token = "${NEVER_SET_IN_A_COMMENT}"
access_token = "${TEST_SHEET_TOKEN}"
sheet_id = 1

[platform]
api_token = "${TEST_PLATFORM_TOKEN}"
"#,
    );
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(
        config.sheet.access_token.expose_secret().as_str(),
        "substituted-sheet"
    );
    assert_eq!(
        config.platform.api_token.expose_secret().as_str(),
        "substituted-platform"
    );
}

#[test]
fn test_missing_env_var_is_reported() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[sheet]
access_token = "${TEST_SHEET_TOKEN}"
sheet_id = 1

[platform]
api_token = "${TEST_PLATFORM_TOKEN}"
"#,
    );

    let err = load_config(file.path()).unwrap_err().to_string();
    assert!(err.contains("TEST_SHEET_TOKEN"));
    assert!(err.contains("TEST_PLATFORM_TOKEN"));
}

#[test]
fn test_env_overrides() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("VENDORSYNC_APPLICATION_DRY_RUN", "true");
    std::env::set_var("VENDORSYNC_SHEET_SHEET_ID", "99");
    std::env::set_var("VENDORSYNC_SYNC_WRITE_BACK", "false");
    std::env::set_var("CYBERGRX_API", "https://legacy.example.com/");
    std::env::set_var("CYBERGRX_API_TOKEN", "legacy-token");
    std::env::set_var("VENDORSYNC_PLATFORM_API_TOKEN", "prefixed-token");

    let file = write_config(MINIMAL_CONFIG);
    let result = load_config(file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert!(config.application.dry_run);
    assert_eq!(config.sheet.sheet_id, Some(SheetId::new(99)));
    assert!(!config.sync.write_back);
    assert_eq!(config.platform.base_url, "https://legacy.example.com");
    assert_eq!(
        config.platform.api_token.expose_secret().as_str(),
        "prefixed-token"
    );
}

#[test]
fn test_validation_failures() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let cases = [
        (
            "[sheet]\naccess_token = \"t\"\n[platform]\napi_token = \"p\"\n",
            "sheet_name",
        ),
        (
            "[sheet]\naccess_token = \"t\"\nsheet_id = 1\n[platform]\napi_token = \"\"\n",
            "api_token",
        ),
        (
            "[sheet]\naccess_token = \"t\"\nsheet_id = 1\n[platform]\napi_token = \"p\"\nbase_url = \"ftp://x\"\n",
            "platform.base_url",
        ),
        (
            "[sheet]\naccess_token = \"t\"\nsheet_id = 1\n[platform]\napi_token = \"p\"\n[logging]\nlocal_rotation = \"weekly\"\n",
            "local_rotation",
        ),
    ];

    for (contents, expected) in cases {
        let file = write_config(contents);
        let err = load_config(file.path()).unwrap_err().to_string();
        assert!(
            err.contains(expected),
            "expected '{expected}' in error: {err}"
        );
    }
}
