//! Configuration management for vendorsync.
//!
//! # Overview
//!
//! vendorsync uses a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Environment overrides (`VENDORSYNC_<SECTION>_<KEY>`)
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use vendorsync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vendorsync.toml")?;
//!
//! println!("Platform: {}", config.platform.base_url);
//! println!("Dry run: {}", config.application.dry_run);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`SheetConfig`] - Tracking sheet connection and sheet selection
//! - [`PlatformConfig`] - Risk platform connection
//! - [`SyncConfig`] - Which sync steps run
//! - [`LoggingConfig`] - Optional JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [sheet]
//! access_token = "${SMARTSHEET_ACCESS_TOKEN}"
//! sheet_name = "Vendors"
//!
//! [platform]
//! api_token = "${CYBERGRX_API_TOKEN}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{apply_env_overrides, load_config, parse_config};
pub use schema::{
    ApplicationConfig, LoggingConfig, PlatformConfig, RetryConfig, SheetConfig, SyncConfig,
    VendorSyncConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
