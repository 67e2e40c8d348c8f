//! Init command implementation
//!
//! Writes a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "vendorsync.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(()) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set sheet_id or sheet_name in {}", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - SMARTSHEET_ACCESS_TOKEN");
                println!("     - CYBERGRX_API_TOKEN");
                println!("  3. Validate configuration: vendorsync validate-config");
                println!("  4. Preview a sync: vendorsync sync --dry-run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Starter configuration with every section and its defaults
    pub fn generate_config() -> String {
        r#"# vendorsync configuration
# Keeps the vendor tracking sheet and the risk platform in step

[application]
log_level = "info"          # trace | debug | info | warn | error
dry_run = false

[sheet]
base_url = "https://api.smartsheet.com/2.0"
access_token = "${SMARTSHEET_ACCESS_TOKEN}"
# Either sheet_id or sheet_name (sheet_id wins when both are set)
# sheet_id = 1234567890
sheet_name = "Vendors"
timeout_seconds = 60

[sheet.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[platform]
base_url = "https://api.cybergrx.com"
api_token = "${CYBERGRX_API_TOKEN}"
skip_residual_risk = true
timeout_seconds = 300

[platform.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[sync]
create_missing = true       # create or link vendors the platform does not track
submit_scoping = true       # send profile answers for incomplete profiles
write_back = true           # copy platform risk data into the sheet

[logging]
local_enabled = false
local_path = "/var/log/vendorsync"
local_rotation = "daily"    # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VendorSyncConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_parses() {
        let contents = InitArgs::generate_config()
            .replace("${SMARTSHEET_ACCESS_TOKEN}", "sheet-token")
            .replace("${CYBERGRX_API_TOKEN}", "platform-token");

        let config: VendorSyncConfig = toml::from_str(&contents).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.sheet.sheet_name.as_deref(), Some("Vendors"));
        assert!(config.sync.write_back);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("vendorsync.toml");
        std::fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# existing");

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("[platform]"));
    }
}
