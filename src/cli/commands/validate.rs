//! Validate config command implementation
//!
//! Loads and validates the configuration file and prints what it resolved to.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Sheet API: {}", config.sheet.base_url);
        match (config.sheet.sheet_id, &config.sheet.sheet_name) {
            (Some(id), _) => println!("  Sheet: id {id}"),
            (None, Some(name)) => println!("  Sheet: \"{name}\""),
            (None, None) => {}
        }
        println!("  Platform API: {}", config.platform.base_url);
        println!("  Skip Residual Risk: {}", config.platform.skip_residual_risk);
        println!("  Create Missing: {}", config.sync.create_missing);
        println!("  Submit Scoping: {}", config.sync.submit_scoping);
        println!("  Write Back: {}", config.sync.write_back);
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();

        Ok(0)
    }
}
