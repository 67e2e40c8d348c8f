//! Core business logic for vendorsync.
//!
//! # Modules
//!
//! - [`schema`] - declarative schema engine (paths, coercers, fallback chains)
//! - [`normalize`] - header mapping, static schemas and record normalization
//! - [`sync`] - sync planning and orchestration
//! - [`bulk_import`] - bulk-import template layout
//!
//! # Sync Workflow
//!
//! 1. **Load Sheet**: Resolve the sheet and normalize every row
//! 2. **Load Platform**: Fetch all third parties and normalize them
//! 3. **Plan**: Split sheet vendors into missing and matched by custom id
//! 4. **Create / Link**: Add missing vendors to the platform
//! 5. **Scoping**: Submit profile answers for incomplete profiles
//! 6. **Write Back**: Copy platform risk data into the sheet
//! 7. **Report**: Log the sync summary
//!
//! # Example
//!
//! ```rust,no_run
//! use vendorsync::config::load_config;
//! use vendorsync::core::sync::SyncCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("vendorsync.toml")?;
//!
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//! let coordinator = SyncCoordinator::new(config, shutdown_rx)?;
//!
//! let summary = coordinator.execute_sync().await?;
//!
//! println!("Created: {}", summary.created);
//! println!("Linked: {}", summary.linked);
//! println!("Rows updated: {}", summary.rows_updated);
//! # Ok(())
//! # }
//! ```

pub mod bulk_import;
pub mod normalize;
pub mod schema;
pub mod sync;
