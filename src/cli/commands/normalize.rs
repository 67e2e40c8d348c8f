//! Normalize command implementation
//!
//! Prints the normalized sheet vendors (or platform records) as JSON without
//! changing anything.

use super::{load_with_selection, SheetSelection};
use crate::core::sync::{SyncCoordinator, SyncSummary};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the normalize command
#[derive(Args, Debug, Default)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub sheet: SheetSelection,

    /// Normalize the platform's third parties instead of the sheet rows
    #[arg(long)]
    pub platform: bool,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_with_selection(config_path, &self.sheet) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                return Ok(2);
            }
        };

        let coordinator = SyncCoordinator::new(config, shutdown_signal)?;
        let mut summary = SyncSummary::new();

        let records = if self.platform {
            coordinator.load_remote_records(&mut summary).await?
        } else {
            coordinator.load_sheet_vendors(&mut summary).await?.vendors
        };

        println!("{}", serde_json::to_string_pretty(&records)?);

        for error in &summary.errors {
            eprintln!(
                "{}: {}",
                error.context.as_deref().unwrap_or("record"),
                error.message
            );
        }

        Ok(if summary.failed > 0 { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_config_is_configuration_error() {
        let (_tx, rx) = watch::channel(false);
        let code = NormalizeArgs::default()
            .execute("/nonexistent/vendorsync.toml", rx)
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
