// Vendorsync - Vendor risk sync tool
// Copyright (c) 2025 Vendorsync Contributors
// Licensed under the MIT License

//! # vendorsync - Vendor risk sync
//!
//! vendorsync keeps a vendor tracking sheet and a third-party risk platform in step.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Normalizing** loosely-typed sheet rows and platform payloads into canonical
//!   vendor records with a declarative schema engine
//! - **Matching** sheet vendors to platform third parties by custom id
//! - **Creating or linking** vendors the platform does not track yet
//! - **Writing back** platform risk data to the sheet
//! - **Exporting** a bulk-import workbook for missing vendors
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (schema engine, normalization, sync, bulk import)
//! - [`adapters`] - External integrations (sheet service, risk platform, xlsx)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vendorsync::config::load_config;
//! use vendorsync::core::sync::SyncCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("vendorsync.toml")?;
//!
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!     let coordinator = SyncCoordinator::new(config, shutdown_rx)?;
//!
//!     let summary = coordinator.execute_sync().await?;
//!     println!("Updated {} rows", summary.rows_updated);
//!     Ok(())
//! }
//! ```
//!
//! ## Schemas
//!
//! Schemas are plain data: paths, coercer chains, fallback chains and nested mappings.
//!
//! ```rust
//! use vendorsync::core::schema::{Coercer, Outcome, Spec};
//! use vendorsync::{chain, coalesce, mapping};
//! use serde_json::json;
//!
//! let schema = mapping! {
//!     "name" => chain!["company_name", Coercer::Required],
//!     "first_name" => coalesce!["first_name", chain!["full_name", Coercer::split(false)]].or_omit(),
//! };
//!
//! let record = json!({"company_name": "Acme", "full_name": "Ann Lee"});
//! assert_eq!(
//!     schema.evaluate(&record).unwrap(),
//!     Outcome::Present(json!({"name": "Acme", "first_name": "Ann"}))
//! );
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error is [`domain::VendorSyncError`]:
//!
//! ```rust,no_run
//! use vendorsync::domain::VendorSyncError;
//!
//! fn example() -> Result<(), VendorSyncError> {
//!     let config = vendorsync::config::load_config("vendorsync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
