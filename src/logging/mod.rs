//! Logging and observability
//!
//! Structured logging on top of `tracing`:
//! - Configurable log levels (overridable through `RUST_LOG`)
//! - Optional local JSON log files with rotation
//! - Macros for the events every sync run emits
//!
//! # Example
//!
//! ```no_run
//! use vendorsync::logging::init_logging;
//! use vendorsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a sync run
///
/// # Example
///
/// ```no_run
/// use vendorsync::log_sync_start;
///
/// log_sync_start!("Vendors", false);
/// ```
#[macro_export]
macro_rules! log_sync_start {
    ($sheet:expr, $dry_run:expr) => {
        tracing::info!(
            sheet = %$sheet,
            dry_run = $dry_run,
            "Starting vendor sync"
        );
    };
}

/// Log the completion of a sync run
///
/// # Example
///
/// ```no_run
/// use vendorsync::log_sync_complete;
/// use std::time::Duration;
///
/// log_sync_complete!(42, Duration::from_secs(10));
/// ```
#[macro_export]
macro_rules! log_sync_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            vendors = $count,
            duration_ms = $duration.as_millis() as u64,
            "Vendor sync completed"
        );
    };
}

/// Log a vendor that was left untouched, with the reason
///
/// # Example
///
/// ```no_run
/// use vendorsync::log_record_skipped;
///
/// log_record_skipped!("Acme", "multiple third parties match");
/// ```
#[macro_export]
macro_rules! log_record_skipped {
    ($name:expr, $reason:expr) => {
        tracing::warn!(
            vendor = %$name,
            reason = %$reason,
            "Skipping vendor"
        );
    };
}

/// Log progress through a long-running stage
///
/// # Example
///
/// ```no_run
/// use vendorsync::log_progress;
///
/// log_progress!("create missing vendors", 10, 250);
/// ```
#[macro_export]
macro_rules! log_progress {
    ($stage:expr, $current:expr, $total:expr) => {
        tracing::debug!(
            stage = $stage,
            current = $current,
            total = $total,
            progress_pct = ($current as f64 / ($total as f64).max(1.0) * 100.0),
            "Sync progress"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use vendorsync::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, 2000u64, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Retrying request after error"
        );
    };
}
