//! Ordered fallback chains

use super::outcome::{Outcome, SpecError};
use super::spec::Spec;
use serde_json::Value;

/// What a fallback chain yields once every alternative has failed
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
    /// Fail with [`SpecError::Exhausted`]; an enclosing chain may recover from it
    NoDefault,
    /// Use this value
    DefaultTo(Value),
    /// Leave the field out
    OmitOnFailure,
}

/// Alternatives tried in order; the first one that does not fail wins
///
/// An alternative that yields the omission signal counts as a success.
///
/// # Examples
///
/// ```
/// use vendorsync::chain;
/// use vendorsync::core::schema::{Coalesce, Coercer, Outcome};
/// use serde_json::json;
///
/// let first_name = Coalesce::new([
///     chain!["first_name", Coercer::Required],
///     chain!["full_name", Coercer::split(false), Coercer::Required],
/// ])
/// .or_omit();
///
/// let outcome = first_name.evaluate(&json!({"full_name": "Ann Lee"})).unwrap();
/// assert_eq!(outcome, Outcome::Present(json!("Ann")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Coalesce {
    alternatives: Vec<Spec>,
    fallback: Fallback,
}

impl Coalesce {
    /// A chain without a default
    pub fn new<I, S>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Self {
            alternatives: alternatives.into_iter().map(Into::into).collect(),
            fallback: Fallback::NoDefault,
        }
    }

    /// Use `value` when every alternative fails
    pub fn default_to(mut self, value: impl Into<Value>) -> Self {
        self.fallback = Fallback::DefaultTo(value.into());
        self
    }

    /// Omit the field when every alternative fails
    pub fn or_omit(mut self) -> Self {
        self.fallback = Fallback::OmitOnFailure;
        self
    }

    /// The configured exhaustion behavior
    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    pub(crate) fn alternatives(&self) -> &[Spec] {
        &self.alternatives
    }

    /// Try every alternative against `target`
    ///
    /// Non-recoverable failures abort the chain immediately.
    pub fn evaluate(&self, target: &Value) -> Result<Outcome, SpecError> {
        let mut failures = Vec::new();

        for alternative in &self.alternatives {
            match alternative.apply(target) {
                Ok(outcome) => return Ok(outcome),
                Err(e) if e.is_recoverable() => failures.push(e.to_string()),
                Err(e) => return Err(e),
            }
        }

        match &self.fallback {
            Fallback::NoDefault => Err(SpecError::Exhausted(failures)),
            Fallback::DefaultTo(value) => Ok(Outcome::Present(value.clone())),
            Fallback::OmitOnFailure => Ok(Outcome::Omit),
        }
    }
}
