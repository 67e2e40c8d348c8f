//! Sheet and platform reconciliation
//!
//! - [`SyncPlan`] - matches sheet vendors to platform records by custom id
//! - [`SyncCoordinator`] - runs a sync against the sheet and platform adapters
//! - [`SyncSummary`] - counts and errors of a run

pub mod coordinator;
pub mod plan;
pub mod summary;

pub use coordinator::{SheetSnapshot, SyncCoordinator};
pub use plan::{custom_id_of, row_update_for, vendor_label, SyncPlan, PLATFORM_RECORD_KEY};
pub use summary::{SyncError, SyncErrorType, SyncSummary};
