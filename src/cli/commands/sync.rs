//! Sync command implementation
//!
//! Reconciles the tracking sheet with the risk platform.

use super::{load_with_selection, SheetSelection};
use crate::core::sync::{SyncCoordinator, SyncErrorType, SyncSummary};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    /// Dry run mode - log intended writes without performing them
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub sheet: SheetSelection,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        let mut config = match load_with_selection(config_path, &self.sheet) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No changes will be written to the platform or the sheet");
            println!();
        }

        let coordinator = match SyncCoordinator::new(config, shutdown_signal) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create sync coordinator");
                eprintln!("Failed to initialize sync: {e}");
                return Ok(5);
            }
        };

        println!("🚀 Starting sync...");
        println!();

        let summary = match coordinator.execute_sync().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("Sync failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        let exit_code = if summary.error_count(SyncErrorType::Interrupted) > 0 {
            println!("⚠️  Sync interrupted. Run the same command again to finish.");
            130
        } else if summary.is_successful() {
            println!("✅ Sync completed successfully!");
            0
        } else {
            println!("⚠️  Sync completed with errors");
            1
        };

        Ok(exit_code)
    }
}

fn print_summary(summary: &SyncSummary) {
    println!();
    println!("📊 Sync Summary:");
    println!("  Sheet rows: {}", summary.sheet_rows);
    println!("  Normalized: {}", summary.normalized);
    println!("  Failed normalization: {}", summary.failed);
    println!("  Platform records: {}", summary.remote_records);
    println!("  Missing from platform: {}", summary.missing);
    println!("  Matched: {}", summary.matched);
    println!("  Created: {}", summary.created);
    println!("  Linked: {}", summary.linked);
    println!("  Skipped: {}", summary.skipped);
    println!("  Scoping submitted: {}", summary.scoping_submitted);
    println!("  Rows updated: {}", summary.rows_updated);
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();

    if !summary.errors.is_empty() {
        println!("⚠️  Errors encountered:");
        for error in summary.errors.iter().take(20) {
            println!("  - {:?}: {}", error.error_type, error.message);
            if let Some(context) = &error.context {
                println!("    Context: {context}");
            }
        }
        if summary.errors.len() > 20 {
            println!("  ... and {} more errors", summary.errors.len() - 20);
        }
        println!();
    }
}
