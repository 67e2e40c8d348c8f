//! Domain models and types for vendorsync.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SheetId`], [`RowId`], [`ColumnId`], [`CustomId`])
//! - **Sheet models** ([`Sheet`], [`SheetRow`], [`RowUpdate`])
//! - **Error types** ([`VendorSyncError`], [`SheetError`], [`PlatformError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VendorSyncError>`]:
//!
//! ```rust,no_run
//! use vendorsync::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = vendorsync::config::load_config("vendorsync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod sheet;

pub use errors::{PlatformError, SheetError, VendorSyncError};
pub use ids::{ColumnId, CustomId, RowId, SheetId};
pub use result::Result;
pub use sheet::{CellUpdate, RowUpdate, Sheet, SheetCell, SheetColumn, SheetRow, SheetSummary};
