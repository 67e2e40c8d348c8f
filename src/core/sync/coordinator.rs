//! Sync coordinator - main orchestrator for a sync run
//!
//! Loads the tracking sheet and the platform's third parties, reconciles the two, and
//! pushes the differences in both directions.

use crate::adapters::platform::{RiskPlatformClient, VendorStore};
use crate::adapters::sheet::{resolve_sheet_id, SheetSource, SheetWriter, SmartsheetClient};
use crate::config::VendorSyncConfig;
use crate::core::normalize::{
    normalize_row, platform_record_schema, row_to_record, vendor_intake_schema, HeaderMapping,
};
use crate::core::schema::{display_text, is_truthy, Spec};
use crate::core::sync::plan::{custom_id_of, row_update_for, vendor_label, SyncPlan};
use crate::core::sync::summary::{SyncError, SyncErrorType, SyncSummary};
use crate::domain::{Result, RowUpdate, SheetId, VendorSyncError};
use crate::{log_progress, log_record_skipped, log_sync_complete, log_sync_start};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Normalized contents of the tracking sheet
#[derive(Debug, Clone)]
pub struct SheetSnapshot {
    pub sheet_id: SheetId,
    pub sheet_name: String,

    /// Column mapping of the loaded sheet
    pub mapping: HeaderMapping,

    /// Raw records of every row, keyed by canonical field name
    pub raw_records: Vec<Value>,

    /// Vendors for the rows that normalized cleanly
    pub vendors: Vec<Value>,
}

/// What happened to a vendor missing from the platform
#[derive(Debug, Clone, PartialEq, Eq)]
enum MissingOutcome {
    Created,
    Linked,
    Skipped(String),
}

/// Sync coordinator
pub struct SyncCoordinator {
    config: VendorSyncConfig,
    sheets: Arc<dyn SheetSource>,
    writer: Arc<dyn SheetWriter>,
    store: Arc<dyn VendorStore>,
    intake_schema: Spec,
    platform_schema: Spec,
    shutdown: watch::Receiver<bool>,
}

impl SyncCoordinator {
    /// Create a coordinator talking to the configured sheet service and platform
    ///
    /// # Errors
    ///
    /// Fails when an HTTP client cannot be built or a schema is malformed
    pub fn new(config: VendorSyncConfig, shutdown: watch::Receiver<bool>) -> Result<Self> {
        let sheets = Arc::new(SmartsheetClient::new(config.sheet.clone())?);
        let store = Arc::new(RiskPlatformClient::new(config.platform.clone())?);

        Self::with_adapters(config, sheets.clone(), sheets, store, shutdown)
    }

    /// Create a coordinator over explicit adapters
    ///
    /// # Errors
    ///
    /// Fails when a schema is malformed
    pub fn with_adapters(
        config: VendorSyncConfig,
        sheets: Arc<dyn SheetSource>,
        writer: Arc<dyn SheetWriter>,
        store: Arc<dyn VendorStore>,
        shutdown: watch::Receiver<bool>,
    ) -> Result<Self> {
        let intake_schema = vendor_intake_schema();
        intake_schema.validate()?;
        let platform_schema = platform_record_schema();
        platform_schema.validate()?;

        Ok(Self {
            config,
            sheets,
            writer,
            store,
            intake_schema,
            platform_schema,
            shutdown,
        })
    }

    fn dry_run(&self) -> bool {
        self.config.application.dry_run
    }

    /// Record an interruption once and report whether the run must stop
    fn interrupted(&self, summary: &mut SyncSummary) -> bool {
        if !*self.shutdown.borrow() {
            return false;
        }

        if summary.error_count(SyncErrorType::Interrupted) == 0 {
            tracing::warn!("Shutdown requested, stopping sync");
            summary.add_error(SyncError::new(
                SyncErrorType::Interrupted,
                "Sync interrupted by shutdown signal",
            ));
        }
        true
    }

    /// The configured sheet id, or the id of the sheet with the configured name
    pub async fn resolve_sheet(&self) -> Result<SheetId> {
        if let Some(sheet_id) = self.config.sheet.sheet_id {
            return Ok(sheet_id);
        }

        match self.config.sheet.sheet_name.as_deref() {
            Some(name) if !name.trim().is_empty() => {
                resolve_sheet_id(self.sheets.as_ref(), name).await
            }
            _ => Err(VendorSyncError::Configuration(
                "Either sheet.sheet_id or sheet.sheet_name must be set".to_string(),
            )),
        }
    }

    /// Load the sheet and normalize every row
    ///
    /// Rows that fail normalization are recorded in `summary` and left out.
    pub async fn load_sheet_vendors(&self, summary: &mut SyncSummary) -> Result<SheetSnapshot> {
        let sheet_id = self.resolve_sheet().await?;
        let sheet = self.sheets.load_sheet(sheet_id).await?;
        let mapping = HeaderMapping::for_columns(&sheet.columns);

        summary.sheet_rows = sheet.rows.len();

        let mut raw_records = Vec::with_capacity(sheet.rows.len());
        let mut vendors = Vec::with_capacity(sheet.rows.len());

        for row in &sheet.rows {
            raw_records.push(row_to_record(row, &mapping));

            match normalize_row(row, &mapping, &self.intake_schema) {
                Ok(vendor) => vendors.push(vendor),
                Err(e) => {
                    tracing::warn!(row_id = %row.id, error = %e, "Failed to normalize sheet row");
                    summary.failed += 1;
                    summary.add_error(
                        SyncError::new(SyncErrorType::Normalization, e.to_string())
                            .with_context(format!("row_id={}", row.id)),
                    );
                }
            }
        }

        summary.normalized = vendors.len();

        tracing::info!(
            sheet = %sheet.name,
            rows = sheet.rows.len(),
            vendors = vendors.len(),
            "Loaded vendors from sheet"
        );

        Ok(SheetSnapshot {
            sheet_id,
            sheet_name: sheet.name,
            mapping,
            raw_records,
            vendors,
        })
    }

    /// Fetch every platform record and evaluate the platform schema over it
    ///
    /// Records that fail evaluation are recorded in `summary` and left out.
    pub async fn load_remote_records(&self, summary: &mut SyncSummary) -> Result<Vec<Value>> {
        let records = self.store.fetch_all().await?;
        summary.remote_records = records.len();

        let mut normalized = Vec::with_capacity(records.len());
        for record in &records {
            match self.platform_schema.evaluate(record) {
                Ok(outcome) => normalized.push(
                    outcome
                        .into_value()
                        .unwrap_or_else(|| Value::Object(Map::new())),
                ),
                Err(e) => {
                    let id = record.get("id").map(display_text).unwrap_or_default();
                    tracing::warn!(third_party_id = %id, error = %e, "Failed to normalize third party");
                    summary.failed += 1;
                    summary.add_error(
                        SyncError::new(SyncErrorType::Normalization, e.to_string())
                            .with_context(format!("third_party_id={id}")),
                    );
                }
            }
        }

        Ok(normalized)
    }

    /// Load both sides and match them up
    pub async fn plan(&self, summary: &mut SyncSummary) -> Result<(SheetSnapshot, SyncPlan)> {
        let mut snapshot = self.load_sheet_vendors(summary).await?;
        let remote = self.load_remote_records(summary).await?;

        let plan = SyncPlan::build(std::mem::take(&mut snapshot.vendors), &remote);
        summary.missing = plan.missing.len();
        summary.matched = plan.matched.len();

        Ok((snapshot, plan))
    }

    /// Execute the sync
    ///
    /// 1. Loads and normalizes the sheet
    /// 2. Fetches and normalizes the platform's third parties
    /// 3. Creates or links vendors the platform is missing
    /// 4. Submits scoping answers for incomplete profiles
    /// 5. Writes platform risk data back to the sheet
    ///
    /// Failures of individual vendors are recorded in the summary; only failing to
    /// load either side aborts the run.
    pub async fn execute_sync(&self) -> Result<SyncSummary> {
        let start_time = Instant::now();
        let mut summary = SyncSummary::new();
        summary.dry_run = self.dry_run();

        let sheet_label = match (self.config.sheet.sheet_id, &self.config.sheet.sheet_name) {
            (Some(id), _) => id.to_string(),
            (None, Some(name)) => name.clone(),
            (None, None) => String::new(),
        };
        log_sync_start!(sheet_label, self.dry_run());

        let (snapshot, plan) = self.plan(&mut summary).await?;

        if self.config.sync.create_missing && !plan.missing.is_empty() {
            tracing::info!(
                count = plan.missing.len(),
                "Sheet vendors need to be added to the platform"
            );
            self.process_missing_vendors(&plan.missing, &mut summary)
                .await;
        }

        if self.config.sync.submit_scoping && !self.interrupted(&mut summary) {
            let vendors: Vec<&Value> = plan.needs_scoping().collect();
            if !vendors.is_empty() {
                tracing::info!(
                    count = vendors.len(),
                    "Vendors have profile questions to answer on the platform"
                );
                self.process_profile_updates(&vendors, &mut summary).await;
            }
        }

        if self.config.sync.write_back
            && !plan.matched.is_empty()
            && !self.interrupted(&mut summary)
        {
            self.process_matched_vendors(&snapshot, &plan.matched, &mut summary)
                .await;
        }

        summary = summary.with_duration(start_time.elapsed());
        log_sync_complete!(summary.normalized, summary.duration);
        summary.log_summary();

        Ok(summary)
    }

    async fn process_missing_vendors(&self, missing: &[Value], summary: &mut SyncSummary) {
        let total = missing.len();

        for (index, vendor) in missing.iter().enumerate() {
            if self.interrupted(summary) {
                return;
            }
            log_progress!("create missing vendors", index + 1, total);

            let label = vendor_label(vendor);
            match self.reconcile_missing(vendor).await {
                Ok(MissingOutcome::Created) => summary.created += 1,
                Ok(MissingOutcome::Linked) => summary.linked += 1,
                Ok(MissingOutcome::Skipped(reason)) => {
                    log_record_skipped!(label, reason);
                    summary.skipped += 1;
                }
                Err(error) => {
                    tracing::error!(
                        vendor = %label,
                        error_type = ?error.error_type,
                        error = %error.message,
                        "Failed to reconcile missing vendor"
                    );
                    summary.add_error(error.with_context(format!("vendor={label}")));
                }
            }
        }
    }

    /// Create the vendor on the platform, or link it to the one third party matching it
    async fn reconcile_missing(
        &self,
        vendor: &Value,
    ) -> std::result::Result<MissingOutcome, SyncError> {
        let search_error = |e: VendorSyncError| SyncError::new(SyncErrorType::Search, e.to_string());

        let mut matches = match vendor.get("name").filter(|name| is_truthy(name)) {
            Some(name) => self
                .store
                .search_by_name(&display_text(name))
                .await
                .map_err(search_error)?,
            None => Vec::new(),
        };

        if matches.is_empty() {
            if let Some(url) = vendor.get("url").filter(|url| is_truthy(url)) {
                matches = self
                    .store
                    .search_by_domain(&display_text(url))
                    .await
                    .map_err(search_error)?;
            }
        }

        match matches.as_slice() {
            [] => self.create_vendor(vendor).await,
            [existing] => self.link_vendor(vendor, existing).await,
            many => Ok(MissingOutcome::Skipped(format!(
                "{} third parties match",
                many.len()
            ))),
        }
    }

    async fn create_vendor(
        &self,
        vendor: &Value,
    ) -> std::result::Result<MissingOutcome, SyncError> {
        if self.dry_run() {
            tracing::info!(vendor = %vendor_label(vendor), "Dry run: would create third party");
            return Ok(MissingOutcome::Created);
        }

        self.store
            .create(vendor)
            .await
            .map_err(|e| SyncError::new(SyncErrorType::Create, e.to_string()))?;

        tracing::info!(vendor = %vendor_label(vendor), "Created third party");
        Ok(MissingOutcome::Created)
    }

    async fn link_vendor(
        &self,
        vendor: &Value,
        existing: &Value,
    ) -> std::result::Result<MissingOutcome, SyncError> {
        if existing.get("custom_id").is_some_and(is_truthy) {
            return Ok(MissingOutcome::Skipped(
                "matching third party is linked to another row".to_string(),
            ));
        }

        let custom_id = custom_id_of(vendor).ok_or_else(|| {
            SyncError::new(SyncErrorType::Link, "sheet vendor has no custom_id")
        })?;
        let uri = existing
            .get("uri")
            .filter(|uri| is_truthy(uri))
            .map(display_text)
            .ok_or_else(|| SyncError::new(SyncErrorType::Link, "matching third party has no uri"))?;
        let metadata = vendor.get("custom_metadata").filter(|m| is_truthy(m));

        if self.dry_run() {
            tracing::info!(
                vendor = %vendor_label(vendor),
                uri = %uri,
                custom_id = %custom_id,
                "Dry run: would link third party"
            );
            return Ok(MissingOutcome::Linked);
        }

        let link_error = |e: VendorSyncError| SyncError::new(SyncErrorType::Link, e.to_string());

        self.store
            .put_custom_id(&uri, custom_id.as_str())
            .await
            .map_err(link_error)?;

        if let Some(metadata) = metadata {
            self.store
                .patch_custom_metadata(&uri, metadata)
                .await
                .map_err(link_error)?;
        }

        tracing::info!(vendor = %vendor_label(vendor), uri = %uri, "Linked third party");
        Ok(MissingOutcome::Linked)
    }

    async fn process_profile_updates(&self, vendors: &[&Value], summary: &mut SyncSummary) {
        let total = vendors.len();

        for (index, vendor) in vendors.iter().enumerate() {
            if self.interrupted(summary) {
                return;
            }
            log_progress!("submit scoping answers", index + 1, total);

            let label = vendor_label(vendor);
            let third_party_id = vendor
                .get(super::plan::PLATFORM_RECORD_KEY)
                .and_then(|grx| grx.get("id"))
                .filter(|id| is_truthy(id))
                .map(display_text);

            let Some(third_party_id) = third_party_id else {
                summary.add_error(
                    SyncError::new(SyncErrorType::Scoping, "third party has no id")
                        .with_context(format!("vendor={label}")),
                );
                continue;
            };
            let answers = vendor.get("third_party_scoping").unwrap_or(&Value::Null);

            if self.dry_run() {
                tracing::info!(
                    vendor = %label,
                    third_party_id = %third_party_id,
                    "Dry run: would submit scoping answers"
                );
                summary.scoping_submitted += 1;
                continue;
            }

            match self.store.put_scoping(&third_party_id, answers).await {
                Ok(()) => summary.scoping_submitted += 1,
                Err(e) => {
                    tracing::error!(vendor = %label, error = %e, "Failed to submit scoping answers");
                    summary.add_error(
                        SyncError::new(SyncErrorType::Scoping, e.to_string())
                            .with_context(format!("vendor={label}")),
                    );
                }
            }
        }
    }

    async fn process_matched_vendors(
        &self,
        snapshot: &SheetSnapshot,
        matched: &[Value],
        summary: &mut SyncSummary,
    ) {
        let total = matched.len();
        let mut updates: Vec<RowUpdate> = Vec::with_capacity(total);

        for (index, vendor) in matched.iter().enumerate() {
            log_progress!("compute risk updates", index + 1, total);
            if let Some(update) = row_update_for(vendor, &snapshot.mapping) {
                updates.push(update);
            }
        }

        if updates.is_empty() {
            tracing::info!("No write-back columns in sheet, nothing to update");
            return;
        }

        if self.dry_run() {
            tracing::info!(
                sheet_id = %snapshot.sheet_id,
                rows = updates.len(),
                "Dry run: would update sheet rows"
            );
            summary.rows_updated = updates.len();
            return;
        }

        let count = updates.len();
        match self.writer.update_rows(snapshot.sheet_id, updates).await {
            Ok(()) => {
                tracing::info!(sheet_id = %snapshot.sheet_id, rows = count, "Updated sheet rows");
                summary.rows_updated = count;
            }
            Err(e) => {
                tracing::error!(sheet_id = %snapshot.sheet_id, error = %e, "Failed to update sheet rows");
                summary.add_error(
                    SyncError::new(SyncErrorType::WriteBack, e.to_string())
                        .with_context(format!("sheet_id={}", snapshot.sheet_id)),
                );
            }
        }
    }
}
