//! Schema nodes and their evaluator
//!
//! A [`Spec`] is plain data describing how to build an output value from an input
//! record. [`Spec::evaluate`] walks it recursively:
//!
//! - **Path**: look the path up in the current value
//! - **Coerce**: transform the current value
//! - **Chain**: run stages left to right, each on the previous stage's output
//! - **Coalesce**: try alternatives in order (see [`Coalesce`])
//! - **Mapping**: build an object; children that omit are left out
//! - **Each**: apply a spec to every element of a list
//!
//! At a field boundary (a mapping child, a list element, the top level) a path that
//! does not resolve yields `null` and the rest of its chain runs on that `null`. A
//! recoverable failure that reaches the boundary becomes an omission. Inside a
//! fallback alternative a missing path stays a failure, so the next alternative or
//! the default gets its turn.

use super::coalesce::Coalesce;
use super::coerce::Coercer;
use super::outcome::{Outcome, SpecError};
use super::path::Path;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// How a path that does not resolve is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Missing {
    Fail,
    Null,
}

/// One node of a schema tree
#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Path(Path),
    Coerce(Coercer),
    Chain(Vec<Spec>),
    Coalesce(Coalesce),
    Mapping(Vec<(String, Spec)>),
    Each(Box<Spec>),
}

/// Build a [`Spec::Chain`] from stages convertible into [`Spec`]
#[macro_export]
macro_rules! chain {
    ($($stage:expr),+ $(,)?) => {
        $crate::core::schema::Spec::Chain(vec![$($crate::core::schema::Spec::from($stage)),+])
    };
}

/// Build a [`Coalesce`](crate::core::schema::Coalesce) from alternatives convertible into [`Spec`]
#[macro_export]
macro_rules! coalesce {
    ($($alternative:expr),+ $(,)?) => {
        $crate::core::schema::Coalesce::new([$($crate::core::schema::Spec::from($alternative)),+])
    };
}

/// Build a [`Spec::Mapping`] from `key => spec` pairs, preserving their order
#[macro_export]
macro_rules! mapping {
    ($($key:expr => $spec:expr),* $(,)?) => {
        $crate::core::schema::Spec::Mapping(vec![
            $((::std::string::String::from($key), $crate::core::schema::Spec::from($spec))),*
        ])
    };
}

impl Spec {
    /// Apply `inner` to every element of a list
    pub fn each(inner: impl Into<Spec>) -> Self {
        Spec::Each(Box::new(inner.into()))
    }

    /// Evaluate against `target` with field-boundary semantics
    ///
    /// # Examples
    ///
    /// ```
    /// use vendorsync::{chain, mapping};
    /// use vendorsync::core::schema::{Coercer, Outcome};
    /// use serde_json::json;
    ///
    /// let spec = mapping! {
    ///     "name" => "company_name",
    ///     "address" => chain![
    ///         mapping! { "city" => chain!["address_city", Coercer::SkipFalsy] },
    ///         Coercer::SkipFalsy,
    ///     ],
    /// };
    ///
    /// let outcome = spec.evaluate(&json!({"company_name": "Acme"})).unwrap();
    /// assert_eq!(outcome, Outcome::Present(json!({"name": "Acme"})));
    /// ```
    pub fn evaluate(&self, target: &Value) -> Result<Outcome, SpecError> {
        self.apply_field(target)
    }

    /// Evaluate against several independent records
    ///
    /// Each record gets its own result so one bad record does not hide the others.
    pub fn evaluate_all<'a, I>(&self, targets: I) -> Vec<Result<Outcome, SpecError>>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        targets
            .into_iter()
            .map(|target| self.evaluate(target))
            .collect()
    }

    /// Reject schemas that can never evaluate sensibly
    pub fn validate(&self) -> Result<(), SpecError> {
        match self {
            Spec::Path(path) => {
                if path.has_empty_segment() {
                    return Err(SpecError::Malformed(format!(
                        "path '{path}' has an empty segment"
                    )));
                }
                Ok(())
            }
            Spec::Coerce(coercer) => coercer.check(),
            Spec::Chain(stages) => {
                if stages.is_empty() {
                    return Err(SpecError::Malformed("chain has no stages".to_string()));
                }
                stages.iter().try_for_each(Spec::validate)
            }
            Spec::Coalesce(coalesce) => {
                if coalesce.alternatives().is_empty() {
                    return Err(SpecError::Malformed(
                        "fallback chain has no alternatives".to_string(),
                    ));
                }
                coalesce.alternatives().iter().try_for_each(Spec::validate)
            }
            Spec::Mapping(fields) => {
                let mut seen = HashSet::new();
                for (key, spec) in fields {
                    if key.is_empty() {
                        return Err(SpecError::Malformed("mapping has an empty key".to_string()));
                    }
                    if !seen.insert(key.as_str()) {
                        return Err(SpecError::Malformed(format!(
                            "mapping declares '{key}' twice"
                        )));
                    }
                    spec.validate()?;
                }
                Ok(())
            }
            Spec::Each(inner) => inner.validate(),
        }
    }

    pub(crate) fn apply(&self, target: &Value) -> Result<Outcome, SpecError> {
        self.apply_with(target, Missing::Fail)
    }

    fn apply_with(&self, target: &Value, missing: Missing) -> Result<Outcome, SpecError> {
        match self {
            Spec::Path(path) => match path.resolve(target) {
                Some(value) => Ok(Outcome::Present(value)),
                None if missing == Missing::Null => Ok(Outcome::Present(Value::Null)),
                None => Err(SpecError::PathNotFound {
                    path: path.to_string(),
                }),
            },
            Spec::Coerce(coercer) => coercer.apply(target),
            Spec::Chain(stages) => {
                let mut current = target.clone();
                for stage in stages {
                    match stage.apply_with(&current, missing)? {
                        Outcome::Present(value) => current = value,
                        Outcome::Omit => return Ok(Outcome::Omit),
                    }
                }
                Ok(Outcome::Present(current))
            }
            Spec::Coalesce(coalesce) => coalesce.evaluate(target),
            Spec::Mapping(fields) => {
                let mut output = Map::new();
                for (key, spec) in fields {
                    if let Outcome::Present(value) = spec.apply_field(target)? {
                        output.insert(key.clone(), value);
                    }
                }
                Ok(Outcome::Present(Value::Object(output)))
            }
            Spec::Each(inner) => {
                let items: &[Value] = match target {
                    Value::Array(items) => items.as_slice(),
                    Value::Null => &[],
                    other => {
                        return Err(SpecError::failed(format!(
                            "expected a list, found {}",
                            kind_of(other)
                        )))
                    }
                };
                let mut output = Vec::with_capacity(items.len());
                for item in items {
                    if let Outcome::Present(value) = inner.apply_field(item)? {
                        output.push(value);
                    }
                }
                Ok(Outcome::Present(Value::Array(output)))
            }
        }
    }

    fn apply_field(&self, target: &Value) -> Result<Outcome, SpecError> {
        match self.apply_with(target, Missing::Null) {
            Err(e) if e.is_recoverable() => {
                tracing::trace!(error = %e, "Field omitted");
                Ok(Outcome::Omit)
            }
            other => other,
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

impl From<&str> for Spec {
    fn from(path: &str) -> Self {
        Spec::Path(Path::parse(path))
    }
}

impl From<String> for Spec {
    fn from(path: String) -> Self {
        Spec::Path(Path::parse(&path))
    }
}

impl From<Path> for Spec {
    fn from(path: Path) -> Self {
        Spec::Path(path)
    }
}

impl From<Coercer> for Spec {
    fn from(coercer: Coercer) -> Self {
        Spec::Coerce(coercer)
    }
}

impl From<Coalesce> for Spec {
    fn from(coalesce: Coalesce) -> Self {
        Spec::Coalesce(coalesce)
    }
}
