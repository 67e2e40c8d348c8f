//! Bulk-import command implementation
//!
//! Writes the platform's bulk-import workbook for sheet vendors the platform does
//! not track yet.

use super::{load_with_selection, SheetSelection};
use crate::adapters::workbook::write_workbook;
use crate::core::bulk_import::{default_columns, BulkImportGrid};
use crate::core::sync::{custom_id_of, SyncCoordinator, SyncSummary};
use clap::Args;
use serde_json::Value;
use tokio::sync::watch;

/// Arguments for the bulk-import command
#[derive(Args, Debug)]
pub struct BulkImportArgs {
    #[command(flatten)]
    pub sheet: SheetSelection,

    /// Workbook to write
    #[arg(default_value = "profile-answers.xlsx")]
    pub filename: String,
}

impl BulkImportArgs {
    /// Execute the bulk-import command
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
        let (snapshot, plan) = coordinator.plan(&mut summary).await?;

        let missing = plan.missing_ids();
        let records: Vec<&Value> = snapshot
            .raw_records
            .iter()
            .filter(|record| custom_id_of(record).is_some_and(|id| missing.contains(&id)))
            .collect();

        let grid = BulkImportGrid::build(default_columns(), records.iter().copied());
        write_workbook(&grid, &self.filename)?;

        println!(
            "✅ Wrote {} vendor(s) missing from the platform to {}",
            records.len(),
            self.filename
        );

        Ok(if summary.failed > 0 { 1 } else { 0 })
    }
}
