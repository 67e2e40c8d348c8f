//! Domain error types
//!
//! This module defines the error hierarchy for vendorsync.
//! All errors are domain-specific and don't expose third-party types.

use crate::core::schema::SpecError;
use thiserror::Error;

/// Main vendorsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum VendorSyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Sheet service errors
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Risk platform errors
    #[error("Risk platform error: {0}")]
    Platform(#[from] PlatformError),

    /// A record could not be normalized
    #[error("Normalization error: {0}")]
    Normalization(#[from] SpecError),

    /// Sync process errors
    #[error("Sync error: {0}")]
    Sync(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Workbook output errors
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Sheet service errors
///
/// Errors that occur when reading or updating the tracking sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to connect to the sheet service
    #[error("Failed to connect to sheet service: {0}")]
    ConnectionFailed(String),

    /// Sheet not found or not uniquely identified
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Several sheets matched a lookup by name
    #[error("Unable to lookup a unique sheet ID, {count} sheets matched '{name}', set --sheet-id instead")]
    AmbiguousSheetName { name: String, count: usize },

    /// Invalid response from the sheet service
    #[error("Invalid response from sheet service: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Row update failed
    #[error("Failed to update rows: {0}")]
    UpdateFailed(String),
}

/// Risk platform errors
///
/// Errors that occur when interacting with the risk-assessment platform.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to connect to the platform
    #[error("Failed to connect to risk platform: {0}")]
    ConnectionFailed(String),

    /// Invalid response from the platform
    #[error("Invalid response from risk platform: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// A record required for a request is missing a field
    #[error("Record is missing required field '{0}'")]
    MissingField(String),
}

impl PlatformError {
    /// Whether retrying the request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlatformError::ConnectionFailed(_) | PlatformError::ServerError { .. }
        )
    }
}

impl SheetError {
    /// Whether retrying the request may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SheetError::ConnectionFailed(_) | SheetError::ServerError { .. }
        )
    }
}

impl VendorSyncError {
    /// Whether retrying the failed operation may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            VendorSyncError::Sheet(e) => e.is_retryable(),
            VendorSyncError::Platform(e) => e.is_retryable(),
            _ => false,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for VendorSyncError {
    fn from(err: std::io::Error) -> Self {
        VendorSyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for VendorSyncError {
    fn from(err: serde_json::Error) -> Self {
        VendorSyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VendorSyncError {
    fn from(err: toml::de::Error) -> Self {
        VendorSyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
