//! Declarative schema engine
//!
//! Schemas are trees of [`Spec`] nodes evaluated against loosely-typed JSON records.
//! Values that cannot be produced are either defaulted, omitted from the output,
//! or reported as a per-record [`SpecError`].

pub mod coalesce;
pub mod coerce;
pub mod email;
pub mod outcome;
pub mod path;
pub mod spec;
pub mod truthy;

pub use coalesce::{Coalesce, Fallback};
pub use coerce::{Coercer, EmailPart};
pub use email::{parse_email, ParsedEmail};
pub use outcome::{Outcome, SpecError};
pub use path::{resolve, Path};
pub use spec::Spec;
pub use truthy::{display_text, is_truthy};

use serde_json::Value;

/// Evaluate `spec` against `target`
///
/// Shorthand for [`Spec::evaluate`].
pub fn evaluate(target: &Value, spec: &Spec) -> Result<Outcome, SpecError> {
    spec.evaluate(target)
}
