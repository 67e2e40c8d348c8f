//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for vendorsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// vendorsync - Vendor risk sync tool
#[derive(Parser, Debug)]
#[command(name = "vendorsync")]
#[command(version, about, long_about = None)]
#[command(author = "Vendorsync Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "vendorsync.toml", env = "VENDORSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "VENDORSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sync the tracking sheet with the risk platform
    Sync(commands::sync::SyncArgs),

    /// Print normalized vendor records as JSON
    Normalize(commands::normalize::NormalizeArgs),

    /// Write the bulk-import workbook for vendors missing from the platform
    BulkImport(commands::bulk_import::BulkImportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
