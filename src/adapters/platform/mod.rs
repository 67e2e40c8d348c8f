//! Risk platform integration
//!
//! - [`VendorStore`] - the operations the sync needs
//! - [`RiskPlatformClient`] - REST implementation with timeout and retry

pub mod client;
pub mod traits;

pub use client::RiskPlatformClient;
pub use traits::VendorStore;
