//! Sync summary and reporting
//!
//! Counts what a sync run did and keeps every failure it recorded on the way.

use std::time::Duration;

/// Summary of a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncSummary {
    /// Rows loaded from the sheet
    pub sheet_rows: usize,

    /// Rows normalized into vendor records
    pub normalized: usize,

    /// Rows or platform records that failed normalization
    pub failed: usize,

    /// Records fetched from the platform
    pub remote_records: usize,

    /// Sheet vendors without a platform record
    pub missing: usize,

    /// Sheet vendors with a platform record
    pub matched: usize,

    /// Third parties created on the platform
    pub created: usize,

    /// Existing third parties linked to their sheet row
    pub linked: usize,

    /// Missing vendors left untouched (ambiguous or already linked elsewhere)
    pub skipped: usize,

    /// Scoping answers submitted
    pub scoping_submitted: usize,

    /// Sheet rows updated with platform data
    pub rows_updated: usize,

    /// Whether the run only logged its writes
    pub dry_run: bool,

    /// Duration of the run
    pub duration: Duration,

    /// Errors encountered during the run
    pub errors: Vec<SyncError>,
}

impl SyncSummary {
    /// Create a new empty sync summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Add an error
    pub fn add_error(&mut self, error: SyncError) {
        self.errors.push(error);
    }

    /// Check if the run completed without recording any error
    pub fn is_successful(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }

    /// Number of errors of one type
    pub fn error_count(&self, error_type: SyncErrorType) -> usize {
        self.errors
            .iter()
            .filter(|error| error.error_type == error_type)
            .count()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            sheet_rows = self.sheet_rows,
            normalized = self.normalized,
            failed = self.failed,
            remote_records = self.remote_records,
            missing = self.missing,
            matched = self.matched,
            created = self.created,
            linked = self.linked,
            skipped = self.skipped,
            scoping_submitted = self.scoping_submitted,
            rows_updated = self.rows_updated,
            dry_run = self.dry_run,
            duration_secs = self.duration.as_secs(),
            "Sync summary"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Sync completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Sync error"
                );
            }
        }
    }
}

/// Type of sync error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorType {
    /// A sheet row or platform record could not be normalized
    Normalization,
    /// Searching the platform failed
    Search,
    /// Creating a third party failed
    Create,
    /// Linking a third party to its sheet row failed
    Link,
    /// Submitting scoping answers failed
    Scoping,
    /// Writing rows back to the sheet failed
    WriteBack,
    /// The run was interrupted
    Interrupted,
}

/// Sync error with context
#[derive(Debug, Clone)]
pub struct SyncError {
    /// Type of error
    pub error_type: SyncErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., vendor name, row id)
    pub context: Option<String>,
}

impl SyncError {
    /// Create a new sync error
    pub fn new(error_type: SyncErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_summary_creation() {
        let summary = SyncSummary::new();

        assert_eq!(summary.sheet_rows, 0);
        assert_eq!(summary.created, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
        assert!(summary.errors.is_empty());
        assert!(summary.is_successful());
    }

    #[test]
    fn test_sync_summary_with_duration() {
        let summary = SyncSummary::new().with_duration(Duration::from_secs(45));
        assert_eq!(summary.duration, Duration::from_secs(45));
    }

    #[test]
    fn test_failed_rows_make_run_unsuccessful() {
        let mut summary = SyncSummary::new();
        summary.failed = 1;
        assert!(!summary.is_successful());
    }

    #[test]
    fn test_add_error_and_count() {
        let mut summary = SyncSummary::new();
        summary.add_error(SyncError::new(SyncErrorType::Create, "HTTP 400"));
        summary.add_error(
            SyncError::new(SyncErrorType::Link, "HTTP 500").with_context("vendor=Acme"),
        );
        summary.add_error(SyncError::new(SyncErrorType::Create, "HTTP 409"));

        assert!(!summary.is_successful());
        assert_eq!(summary.error_count(SyncErrorType::Create), 2);
        assert_eq!(summary.error_count(SyncErrorType::Scoping), 0);
        assert_eq!(summary.errors[1].context.as_deref(), Some("vendor=Acme"));
    }
}
