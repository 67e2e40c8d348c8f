//! External system integrations for vendorsync.
//!
//! This module provides adapters for the systems the sync talks to:
//!
//! - [`sheet`] - tracking sheet access (Smartsheet REST API)
//! - [`platform`] - risk platform third-party API
//! - [`workbook`] - xlsx rendering of the bulk-import template
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. The sync coordinator only sees the
//! [`sheet::SheetSource`], [`sheet::SheetWriter`] and [`platform::VendorStore`] traits.
//!
//! ```rust,no_run
//! use vendorsync::adapters::platform::{RiskPlatformClient, VendorStore};
//! use vendorsync::adapters::sheet::{resolve_sheet_id, SheetSource, SmartsheetClient};
//! use vendorsync::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vendorsync.toml")?;
//!
//! let sheets = SmartsheetClient::new(config.sheet.clone())?;
//! let sheet_id = resolve_sheet_id(&sheets, "Vendors").await?;
//! let sheet = sheets.load_sheet(sheet_id).await?;
//!
//! let platform = RiskPlatformClient::new(config.platform.clone())?;
//! let third_parties = platform.fetch_all().await?;
//! println!("{} rows, {} third parties", sheet.rows.len(), third_parties.len());
//! # Ok(())
//! # }
//! ```

pub mod platform;
pub(crate) mod retry;
pub mod sheet;
pub mod workbook;
