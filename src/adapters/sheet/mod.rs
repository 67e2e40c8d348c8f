//! Tracking sheet integration
//!
//! - [`SheetSource`] / [`SheetWriter`] - read and write access to sheets
//! - [`SmartsheetClient`] - REST implementation of both
//! - [`resolve_sheet_id`] - sheet lookup by name

pub mod client;
pub mod traits;

pub use client::SmartsheetClient;
pub use traits::{resolve_sheet_id, SheetSource, SheetWriter};
