//! Field coercers
//!
//! Each coercer maps one value to a new [`Outcome`] or fails with a recoverable
//! [`SpecError`]. The only hard failure is a malformed date in [`date_or_none`].

use super::email::parse_email;
use super::outcome::{Outcome, SpecError};
use super::truthy::{as_integer, display_text, is_truthy};
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Accepted scoping answers, matched by prefix in this order
pub const VALID_ANSWERS: [(&str, &str); 4] = [
    ("least", "Least"),
    ("minimal", "Minimal"),
    ("moderate", "Moderate"),
    ("significant", "Significant"),
];

/// Assessment tier labels and the order request each one stands for
///
/// Tier 1 is always validated, tier 3 never is.
pub const ASSESSMENT_TIERS: [(&str, Option<(u8, bool)>); 5] = [
    ("tier 1", Some((1, true))),
    ("tier 2", Some((2, false))),
    ("tier 2 validated", Some((2, true))),
    ("tier 3", Some((3, false))),
    ("no assessment", None),
];

/// Inherent risk label per recommended report tier
pub const INHERENT_RISK_LEVELS: [&str; 4] = [
    "Unconfirmed Exposure",
    "High Exposure",
    "Medium Exposure",
    "Low Exposure",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which piece of an email address [`email_metadata`] extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPart {
    Domain,
    FirstName,
    LastName,
}

/// A value transform usable as a spec stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coercer {
    Required,
    AsString,
    SkipFalsy,
    InsertHttp,
    Split { last: bool, separator: String },
    EmailMetadata(EmailPart),
    ValidateAnswer,
    ValidAssessmentOrder,
    DateOrNone,
    InherentRiskLevelFromTier,
    CategoryMatch(String),
}

impl Coercer {
    /// Split on a single space, keeping the first or last token
    pub fn split(last: bool) -> Self {
        Self::split_on(last, " ")
    }

    /// Split on `separator`, keeping the first or last token
    pub fn split_on(last: bool, separator: impl Into<String>) -> Self {
        Coercer::Split {
            last,
            separator: separator.into(),
        }
    }

    /// Select the entry of a tagged list whose `category` equals `category`
    pub fn category_match(category: impl Into<String>) -> Self {
        Coercer::CategoryMatch(category.into())
    }

    /// Apply the coercer to `value`
    pub fn apply(&self, value: &Value) -> Result<Outcome, SpecError> {
        match self {
            Coercer::Required => required(value).map(Outcome::Present),
            Coercer::AsString => Ok(Outcome::Present(as_string(value))),
            Coercer::SkipFalsy => Ok(skip_falsy(value)),
            Coercer::InsertHttp => Ok(Outcome::Present(insert_http(value))),
            Coercer::Split { last, separator } => split(value, *last, separator).map(Outcome::Present),
            Coercer::EmailMetadata(part) => email_metadata(value, *part).map(Outcome::Present),
            Coercer::ValidateAnswer => Ok(validate_answer(value)),
            Coercer::ValidAssessmentOrder => Ok(valid_assessment_order(value)),
            Coercer::DateOrNone => date_or_none(value).map(Outcome::Present),
            Coercer::InherentRiskLevelFromTier => {
                Ok(Outcome::Present(inherent_risk_level_from_tier(value)))
            }
            Coercer::CategoryMatch(category) => {
                Ok(Outcome::Present(category_match(value, category)))
            }
        }
    }

    pub(crate) fn check(&self) -> Result<(), SpecError> {
        match self {
            Coercer::Split { separator, .. } if separator.is_empty() => Err(SpecError::Malformed(
                "split separator cannot be empty".to_string(),
            )),
            Coercer::CategoryMatch(category) if category.trim().is_empty() => Err(
                SpecError::Malformed("category_match needs a category".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// Fails on a falsy value, passes anything else through
pub fn required(value: &Value) -> Result<Value, SpecError> {
    if !is_truthy(value) {
        return Err(SpecError::failed("Value was not defined"));
    }
    Ok(value.clone())
}

/// Renders a truthy value as a string; falsy values pass through untouched
pub fn as_string(value: &Value) -> Value {
    if !is_truthy(value) {
        return value.clone();
    }
    Value::String(display_text(value))
}

/// Maps falsy values to the omission signal
pub fn skip_falsy(value: &Value) -> Outcome {
    if is_truthy(value) {
        Outcome::Present(value.clone())
    } else {
        Outcome::Omit
    }
}

/// Prefixes `https://` onto a non-empty string that does not start with `http`
pub fn insert_http(value: &Value) -> Value {
    match value {
        Value::String(s) if !s.is_empty() && !s.starts_with("http") => {
            Value::String(format!("https://{s}"))
        }
        other => other.clone(),
    }
}

/// Splits a string and keeps its first or last token
///
/// Fails on falsy input and on input with fewer than two tokens.
pub fn split(value: &Value, last: bool, separator: &str) -> Result<Value, SpecError> {
    if !is_truthy(value) {
        return Err(SpecError::failed("Value was not defined"));
    }
    let text = display_text(value);
    let tokens: Vec<&str> = text.split(separator).collect();
    if tokens.len() < 2 {
        return Err(SpecError::failed("Value did not have 2 or more elements"));
    }
    let token = if last {
        tokens[tokens.len() - 1]
    } else {
        tokens[0]
    };
    Ok(Value::String(token.to_string()))
}

/// Extracts the domain, or a capitalized name token, from an email address
pub fn email_metadata(value: &Value, part: EmailPart) -> Result<Value, SpecError> {
    if !is_truthy(value) {
        return Err(SpecError::failed("Value was not defined"));
    }
    let parsed = parse_email(&display_text(value)).map_err(SpecError::Failed)?;

    let local = Value::String(parsed.local);
    let name = match part {
        EmailPart::Domain => return Ok(Value::String(parsed.domain)),
        EmailPart::FirstName => split(&local, false, ".")?,
        EmailPart::LastName => split(&local, true, ".")?,
    };
    Ok(Value::String(capitalize(&display_text(&name))))
}

/// Maps a free-text answer onto the fixed answer set by prefix
///
/// Falsy or unrecognized input is omitted rather than failing.
pub fn validate_answer(value: &Value) -> Outcome {
    if !is_truthy(value) {
        return Outcome::Omit;
    }
    let normalized = display_text(value).trim().to_lowercase();
    VALID_ANSWERS
        .iter()
        .find(|(key, _)| normalized.starts_with(key))
        .map(|(_, answer)| Outcome::Present(json!(answer)))
        .unwrap_or(Outcome::Omit)
}

/// Maps a tier label onto an assessment order request
///
/// `"no assessment"` yields `null`; falsy or unknown labels are omitted.
pub fn valid_assessment_order(value: &Value) -> Outcome {
    if !is_truthy(value) {
        return Outcome::Omit;
    }
    let normalized = display_text(value).trim().to_lowercase();
    ASSESSMENT_TIERS
        .iter()
        .find(|(label, _)| *label == normalized)
        .map(|(_, order)| match order {
            Some((tier, validated)) => json!({"tier": tier, "validated": validated}),
            None => Value::Null,
        })
        .map(Outcome::Present)
        .unwrap_or(Outcome::Omit)
}

/// Parses a `YYYY-MM-DD` date; falsy input yields `null`
///
/// The parsed date is rendered back in canonical form. A non-empty value in any other
/// format is a hard failure.
pub fn date_or_none(value: &Value) -> Result<Value, SpecError> {
    if !is_truthy(value) {
        return Ok(Value::Null);
    }
    let text = display_text(value);
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map(|date| Value::String(date.format(DATE_FORMAT).to_string()))
        .map_err(|e| SpecError::InvalidDate {
            value: text,
            reason: e.to_string(),
        })
}

/// Maps a recommended report tier onto its inherent risk label
///
/// Anything outside the table gets the tier 0 label.
pub fn inherent_risk_level_from_tier(value: &Value) -> Value {
    let label = as_integer(value)
        .and_then(|tier| usize::try_from(tier).ok())
        .and_then(|tier| INHERENT_RISK_LEVELS.get(tier))
        .unwrap_or(&INHERENT_RISK_LEVELS[0]);
    json!(label)
}

/// First entry of a list whose `category` equals `category`, else `null`
pub fn category_match(value: &Value, category: &str) -> Value {
    let Value::Array(entries) = value else {
        return Value::Null;
    };
    entries
        .iter()
        .find(|entry| entry.get("category").and_then(Value::as_str) == Some(category))
        .cloned()
        .unwrap_or(Value::Null)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
