//! Record normalization
//!
//! Runs a schema over a raw record and adds the `record_has_url_and_address` flag.

use super::header::{row_to_record, HeaderMapping};
use crate::core::schema::{is_truthy, Outcome, Spec, SpecError};
use crate::domain::SheetRow;
use serde_json::{Map, Value};

/// Name of the derived completeness flag
pub const URL_AND_ADDRESS_FLAG: &str = "record_has_url_and_address";

/// Normalize a raw record keyed by raw field identifiers
///
/// Identifiers are translated through `field_mapping` (column ids or titles);
/// identifiers it does not know are dropped.
///
/// # Arguments
///
/// * `raw` - Raw record, typically a sheet row keyed by column title
/// * `field_mapping` - Translation table from raw identifiers to canonical keys
/// * `schema` - Schema evaluated against the translated record
///
/// # Errors
///
/// Returns the hard failure of the schema (for example a malformed ingest date).
/// Absent fields never fail.
///
/// # Examples
///
/// ```
/// use vendorsync::core::normalize::{normalize, vendor_intake_schema, HeaderMapping};
/// use serde_json::json;
///
/// let raw = json!({"Vendor Name": "Acme", "Vendor URL": "acme.com"});
/// let vendor = normalize(&raw, &HeaderMapping::standard(), &vendor_intake_schema()).unwrap();
/// assert_eq!(vendor["name"], json!("Acme"));
/// assert_eq!(vendor["record_has_url_and_address"], json!(false));
/// ```
pub fn normalize(
    raw: &Value,
    field_mapping: &HeaderMapping,
    schema: &Spec,
) -> Result<Value, SpecError> {
    let mut translated = Map::new();

    if let Value::Object(fields) = raw {
        for (identifier, value) in fields {
            if let Some(key) = field_mapping.translate(identifier) {
                translated.insert(key.to_string(), value.clone());
            }
        }
    }

    normalize_record(&Value::Object(translated), schema)
}

/// Normalize a record already keyed by canonical field names
pub fn normalize_record(record: &Value, schema: &Spec) -> Result<Value, SpecError> {
    let mut normalized = match schema.evaluate(record)? {
        Outcome::Present(Value::Object(map)) => map,
        Outcome::Present(other) => {
            return Err(SpecError::Malformed(format!(
                "record schema must produce an object, produced {other}"
            )))
        }
        Outcome::Omit => Map::new(),
    };

    let flag = has_url_and_address(&normalized);
    normalized.insert(URL_AND_ADDRESS_FLAG.to_string(), Value::Bool(flag));
    Ok(Value::Object(normalized))
}

/// Normalize one sheet row using a mapping built from the sheet's columns
pub fn normalize_row(
    row: &SheetRow,
    mapping: &HeaderMapping,
    schema: &Spec,
) -> Result<Value, SpecError> {
    normalize_record(&row_to_record(row, mapping), schema)
}

/// Whether a normalized record carries a url and a complete address
pub fn record_has_url_and_address(record: &Value) -> bool {
    record.as_object().is_some_and(has_url_and_address)
}

fn has_url_and_address(record: &Map<String, Value>) -> bool {
    let has_url = record.get("url").is_some_and(is_truthy);
    let has_address = record
        .get("address")
        .and_then(Value::as_object)
        .is_some_and(|address| address.contains_key("city") && address.contains_key("country"));

    has_url && has_address
}
