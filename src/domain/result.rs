//! Result type alias for vendorsync
//!
//! This module provides a convenient Result type alias that uses VendorSyncError
//! as the error type.

use super::errors::VendorSyncError;

/// Result type alias for vendorsync operations
///
/// # Examples
///
/// ```
/// use vendorsync::domain::result::Result;
/// use vendorsync::domain::errors::VendorSyncError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(VendorSyncError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, VendorSyncError>;
