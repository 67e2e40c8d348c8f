//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VendorSyncConfig;
use super::secret::secret_string;
use crate::domain::errors::VendorSyncError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into VendorSyncConfig
/// 4. Applies environment variable overrides (VENDORSYNC_* prefix and the legacy names)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use vendorsync::config::loader::load_config;
///
/// let config = load_config("vendorsync.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VendorSyncConfig> {
    let mut config = parse_config(path)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        VendorSyncError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Reads and parses a configuration file without overrides or validation
///
/// Used by commands that adjust the configuration from CLI flags before validating it.
pub fn parse_config(path: impl AsRef<Path>) -> Result<VendorSyncConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VendorSyncError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VendorSyncError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    toml::from_str(&contents)
        .map_err(|e| VendorSyncError::Configuration(format!("Failed to parse TOML: {e}")))
}

fn env_var_re() -> &'static Regex {
    static ENV_VAR_RE: OnceLock<Regex> = OnceLock::new();
    ENV_VAR_RE.get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var regex"))
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
pub fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_re();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(VendorSyncError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Applies environment variable overrides
///
/// Variables follow the pattern `VENDORSYNC_<SECTION>_<KEY>`, for example
/// `VENDORSYNC_PLATFORM_BASE_URL`. The names `CYBERGRX_API`, `CYBERGRX_API_TOKEN`
/// and `SMARTSHEET_ACCESS_TOKEN` are honoured too; the prefixed form wins.
/// Finally the platform base url loses any trailing `/`.
pub fn apply_env_overrides(config: &mut VendorSyncConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("VENDORSYNC_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = env_bool("VENDORSYNC_APPLICATION_DRY_RUN") {
        config.application.dry_run = val;
    }

    // Sheet overrides
    if let Ok(val) = std::env::var("SMARTSHEET_ACCESS_TOKEN") {
        config.sheet.access_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("VENDORSYNC_SHEET_ACCESS_TOKEN") {
        config.sheet.access_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("VENDORSYNC_SHEET_BASE_URL") {
        config.sheet.base_url = val;
    }
    if let Some(val) = env_parse("VENDORSYNC_SHEET_SHEET_ID") {
        config.sheet.sheet_id = Some(val);
    }
    if let Ok(val) = std::env::var("VENDORSYNC_SHEET_SHEET_NAME") {
        config.sheet.sheet_name = Some(val);
    }
    if let Some(val) = env_parse("VENDORSYNC_SHEET_TIMEOUT_SECONDS") {
        config.sheet.timeout_seconds = val;
    }

    // Platform overrides
    if let Ok(val) = std::env::var("CYBERGRX_API") {
        config.platform.base_url = val;
    }
    if let Ok(val) = std::env::var("VENDORSYNC_PLATFORM_BASE_URL") {
        config.platform.base_url = val;
    }
    if let Ok(val) = std::env::var("CYBERGRX_API_TOKEN") {
        config.platform.api_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("VENDORSYNC_PLATFORM_API_TOKEN") {
        config.platform.api_token = secret_string(val);
    }
    if let Some(val) = env_bool("VENDORSYNC_PLATFORM_SKIP_RESIDUAL_RISK") {
        config.platform.skip_residual_risk = val;
    }
    if let Some(val) = env_parse("VENDORSYNC_PLATFORM_TIMEOUT_SECONDS") {
        config.platform.timeout_seconds = val;
    }

    // Sync overrides
    if let Some(val) = env_bool("VENDORSYNC_SYNC_CREATE_MISSING") {
        config.sync.create_missing = val;
    }
    if let Some(val) = env_bool("VENDORSYNC_SYNC_SUBMIT_SCOPING") {
        config.sync.submit_scoping = val;
    }
    if let Some(val) = env_bool("VENDORSYNC_SYNC_WRITE_BACK") {
        config.sync.write_back = val;
    }

    // Logging overrides
    if let Some(val) = env_bool("VENDORSYNC_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val;
    }
    if let Ok(val) = std::env::var("VENDORSYNC_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    config.platform.base_url = config.platform.base_url.trim_end_matches('/').to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("VS_LOADER_TEST_VAR", "test_value");
        let input = "token = \"${VS_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"");
        std::env::remove_var("VS_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("VS_LOADER_MISSING_VAR");
        let input = "token = \"${VS_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("VS_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("VS_LOADER_COMMENTED_VAR");
        let input = "# token = \"${VS_LOADER_COMMENTED_VAR}\"\nname = \"x\"";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_config_reads_sections() {
        let toml_content = r#"
[application]
log_level = "debug"

[sheet]
access_token = "sheet-token"
sheet_id = 4821

[platform]
api_token = "platform-token"
base_url = "https://api.example.com"

[sync]
write_back = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = parse_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.sheet.sheet_id.map(|id| id.value()), Some(4821));
        assert_eq!(config.platform.base_url, "https://api.example.com");
        assert!(!config.sync.write_back);
        assert!(config.sync.create_missing);
        assert!(config.validate().is_ok());
    }
}
