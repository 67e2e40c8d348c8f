//! Evaluation outcomes and failures

use serde_json::Value;
use thiserror::Error;

/// Result of evaluating a spec against a value
///
/// `Omit` is never stored in an output record: a mapping drops the key instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A concrete value (which may be `null`)
    Present(Value),
    /// Leave the enclosing key out of the output
    Omit,
}

impl Outcome {
    /// Whether this is the omission signal
    pub fn is_omit(&self) -> bool {
        matches!(self, Outcome::Omit)
    }

    /// The value, or `None` when omitted
    pub fn into_value(self) -> Option<Value> {
        match self {
            Outcome::Present(value) => Some(value),
            Outcome::Omit => None,
        }
    }
}

impl From<Value> for Outcome {
    fn from(value: Value) -> Self {
        Outcome::Present(value)
    }
}

/// Failure while evaluating a spec
///
/// Recoverable failures make a fallback chain move on to its next alternative.
/// [`SpecError::InvalidDate`] and [`SpecError::Malformed`] are never recovered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    /// A path did not resolve
    #[error("path '{path}' could not be resolved")]
    PathNotFound { path: String },

    /// A coercer rejected its input
    #[error("{0}")]
    Failed(String),

    /// Every alternative of a fallback chain without a default failed
    #[error("no alternative produced a value: {}", .0.join("; "))]
    Exhausted(Vec<String>),

    /// A non-empty date did not match `YYYY-MM-DD`
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// The schema itself is unusable
    #[error("malformed schema: {0}")]
    Malformed(String),
}

impl SpecError {
    /// Whether a fallback chain may swallow this failure and try the next alternative
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpecError::PathNotFound { .. } | SpecError::Failed(_) | SpecError::Exhausted(_)
        )
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        SpecError::Failed(message.into())
    }
}
