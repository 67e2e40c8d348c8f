//! Configuration schema types
//!
//! This module defines the configuration structure for vendorsync.

use crate::config::secret::{secret_string, SecretString};
use crate::domain::SheetId;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;

/// Main vendorsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VendorSyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Tracking sheet connection
    #[serde(default)]
    pub sheet: SheetConfig,

    /// Risk platform connection
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Which sync steps run
    #[serde(default)]
    pub sync: SyncConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VendorSyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.sheet.validate()?;
        self.platform.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (log intended writes, perform none)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        if self.max_retries == 0 || self.max_retries > 10 {
            return Err(format!(
                "{section}.retry.max_retries must be between 1 and 10, got {}",
                self.max_retries
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(format!(
                "{section}.retry.initial_delay_ms ({}) cannot exceed max_delay_ms ({})",
                self.initial_delay_ms, self.max_delay_ms
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "{section}.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Tracking sheet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Base URL of the sheet service API
    #[serde(default = "default_sheet_base_url")]
    pub base_url: String,

    /// API access token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "empty_secret")]
    pub access_token: SecretString,

    /// Sheet to sync (takes precedence over `sheet_name`)
    #[serde(default)]
    pub sheet_id: Option<SheetId>,

    /// Sheet to sync, looked up by case-insensitive title
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// Timeout in seconds
    #[serde(default = "default_sheet_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl SheetConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("sheet.base_url", &self.base_url)?;

        if self.access_token.expose_secret().is_empty() {
            return Err(
                "sheet.access_token cannot be empty (set SMARTSHEET_ACCESS_TOKEN)".to_string(),
            );
        }

        let has_name = self
            .sheet_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if self.sheet_id.is_none() && !has_name {
            return Err("Either sheet.sheet_id or sheet.sheet_name must be provided".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("sheet.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate("sheet")
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            base_url: default_sheet_base_url(),
            access_token: empty_secret(),
            sheet_id: None,
            sheet_name: None,
            timeout_seconds: default_sheet_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Risk platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform API, stored without a trailing `/`
    #[serde(default = "default_platform_base_url")]
    pub base_url: String,

    /// API token sent verbatim in the `Authorization` header
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default = "empty_secret")]
    pub api_token: SecretString,

    /// Ask the bulk endpoint to leave residual risk out
    #[serde(default = "default_true")]
    pub skip_residual_risk: bool,

    /// Timeout in seconds; the bulk endpoint is slow
    #[serde(default = "default_platform_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl PlatformConfig {
    fn validate(&self) -> Result<(), String> {
        validate_base_url("platform.base_url", &self.base_url)?;

        if self.api_token.expose_secret().as_str().trim().is_empty() {
            return Err(
                "platform.api_token cannot be empty (set CYBERGRX_API_TOKEN)".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("platform.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate("platform")
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            base_url: default_platform_base_url(),
            api_token: empty_secret(),
            skip_residual_risk: true,
            timeout_seconds: default_platform_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Sync step toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Create or link platform records for sheet vendors without one
    #[serde(default = "default_true")]
    pub create_missing: bool,

    /// Submit scoping answers for vendors with an incomplete profile
    #[serde(default = "default_true")]
    pub submit_scoping: bool,

    /// Write platform risk data back to the sheet
    #[serde(default = "default_true")]
    pub write_back: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            create_missing: true,
            submit_scoping: true,
            write_back: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,

    /// Maximum log file size in MB
    #[serde(default = "default_local_max_size_mb")]
    pub local_max_size_mb: usize,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_max_size_mb == 0 {
            return Err("logging.local_max_size_mb must be > 0".to_string());
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
            local_max_size_mb: default_local_max_size_mb(),
        }
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} cannot be empty"));
    }

    let parsed = Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!("{field} must start with http:// or https://"));
    }

    Ok(())
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn empty_secret() -> SecretString {
    secret_string(String::new())
}

fn default_sheet_base_url() -> String {
    "https://api.smartsheet.com/2.0".to_string()
}

fn default_platform_base_url() -> String {
    "https://api.cybergrx.com".to_string()
}

fn default_sheet_timeout_seconds() -> u64 {
    60
}

fn default_platform_timeout_seconds() -> u64 {
    300
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_local_path() -> String {
    "/var/log/vendorsync".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_local_max_size_mb() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> VendorSyncConfig {
        VendorSyncConfig {
            sheet: SheetConfig {
                access_token: secret_string("sheet-token".to_string()),
                sheet_name: Some("Vendors".to_string()),
                ..Default::default()
            },
            platform: PlatformConfig {
                api_token: secret_string("platform-token".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig {
            log_level: "info".to_string(),
            dry_run: false,
        };

        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_sheet_requires_id_or_name() {
        let mut config = valid_config();
        config.sheet.sheet_name = None;
        let err = config.validate().unwrap_err();
        assert!(err.contains("sheet_id or sheet.sheet_name"));

        config.sheet.sheet_id = Some(SheetId::new(42));
        assert!(config.validate().is_ok());

        config.sheet.sheet_id = None;
        config.sheet.sheet_name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tokens_required() {
        let mut config = valid_config();
        config.platform.api_token = secret_string("   ".to_string());
        assert!(config.validate().unwrap_err().contains("CYBERGRX_API_TOKEN"));

        let mut config = valid_config();
        config.sheet.access_token = secret_string(String::new());
        assert!(config
            .validate()
            .unwrap_err()
            .contains("SMARTSHEET_ACCESS_TOKEN"));
    }

    #[test]
    fn test_base_url_validation() {
        let mut config = valid_config();
        config.platform.base_url = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());

        config.platform.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.platform.base_url = "http://localhost:8080".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retry_validation() {
        let mut config = valid_config();
        config.platform.retry.max_retries = 0;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.sheet.retry.initial_delay_ms = 60_000;
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.sheet.retry.backoff_multiplier = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "daily".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults() {
        let config = VendorSyncConfig::default();
        assert_eq!(config.platform.base_url, "https://api.cybergrx.com");
        assert_eq!(config.sheet.base_url, "https://api.smartsheet.com/2.0");
        assert!(config.platform.skip_residual_risk);
        assert!(config.sync.create_missing && config.sync.submit_scoping && config.sync.write_back);
        assert!(!config.logging.local_enabled);
    }
}
