//! Domain identifier types with validation
//!
//! Sheet identifiers are numeric on the sheet service; the custom id linking a sheet
//! row to a platform record is the row id rendered as a string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw numeric identifier
            pub fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric identifier
            pub fn value(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|e| format!("Invalid {} '{}': {}", $label, s, e))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a sheet on the sheet service
    SheetId,
    "sheet ID"
);

numeric_id!(
    /// Identifier of a row within a sheet
    RowId,
    "row ID"
);

numeric_id!(
    /// Identifier of a column within a sheet
    ColumnId,
    "column ID"
);

/// Custom identifier shared between a sheet row and its platform record
///
/// # Examples
///
/// ```
/// use vendorsync::domain::ids::{CustomId, RowId};
///
/// let custom_id = CustomId::from(RowId::new(4821));
/// assert_eq!(custom_id.as_str(), "4821");
/// assert_eq!(custom_id.row_id(), Some(RowId::new(4821)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomId(String);

impl CustomId {
    /// Creates a new CustomId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Custom ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the custom ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sheet row this custom ID points at, when it is numeric
    pub fn row_id(&self) -> Option<RowId> {
        self.0.parse().ok()
    }
}

impl From<RowId> for CustomId {
    fn from(row_id: RowId) -> Self {
        Self(row_id.to_string())
    }
}

impl fmt::Display for CustomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CustomId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CustomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
