//! Sheet header mapping
//!
//! Translates sheet column titles (and, once a sheet is loaded, column ids) into the
//! canonical field keys the intake schema reads.

use super::schemas::WRITE_BACK_COLUMNS;
use crate::domain::{ColumnId, SheetColumn, SheetRow};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Intake column titles and the canonical key each one feeds
pub const INTAKE_HEADERS: [(&str, &str); 28] = [
    ("Vendor Name", "company_name"),
    ("Vendor URL", "company_url"),
    ("Vendor HQ City", "address_city"),
    ("Vendor HQ Country", "address_country"),
    ("Vendor Owner", "internal_vendor_owner"),
    ("Description", "internal_description"),
    ("Location", "internal_location"),
    ("Vendor Contact Name", "third_party_contact_name"),
    ("Vendor Contact First Name", "third_party_contact_first_name"),
    ("Vendor Contact Last Name", "third_party_contact_last_name"),
    ("Vendor Contact Email", "third_party_contact_email"),
    ("Vendor Contact Phone", "third_party_contact_phone"),
    ("Order Assessment Tier", "assessment_order"),
    ("Critical/Support", "meta_is_critical_or_support"),
    ("RTO", "meta_rto"),
    ("Data Sensitivity", "meta_data_sensitivity"),
    ("Legal/Regulatory Compliance", "meta_compliance"),
    ("Technology Risk", "meta_tech_risk"),
    ("Influence", "meta_influence"),
    ("Digital Identities", "profile_digital_identities"),
    ("People", "profile_people"),
    ("Data", "profile_data"),
    ("Applications", "profile_applications"),
    ("Devices", "profile_devices"),
    ("Network Access", "profile_networks"),
    ("Facilities", "profile_facilities"),
    ("Business Process", "profile_business_process"),
    ("Ingest Date", "ingest_date"),
];

/// Bidirectional title/column-id to canonical-key table
#[derive(Debug, Clone, Default)]
pub struct HeaderMapping {
    by_title: HashMap<String, String>,
    by_column: HashMap<ColumnId, String>,
    columns_by_key: HashMap<String, ColumnId>,
}

impl HeaderMapping {
    /// The static title table: intake headers plus the write-back columns
    pub fn standard() -> Self {
        let by_title = INTAKE_HEADERS
            .iter()
            .map(|(title, key)| (title.to_string(), key.to_string()))
            .chain(
                WRITE_BACK_COLUMNS
                    .iter()
                    .map(|column| (column.title.to_string(), column.key.to_string())),
            )
            .collect();

        Self {
            by_title,
            by_column: HashMap::new(),
            columns_by_key: HashMap::new(),
        }
    }

    /// Resolve every column of a loaded sheet
    ///
    /// Known titles map to their canonical key; any other title maps to its
    /// snake_case form (see [`snake_case`]).
    pub fn for_columns(columns: &[SheetColumn]) -> Self {
        let mut mapping = Self::standard();

        for column in columns {
            let key = mapping
                .by_title
                .get(&column.title)
                .cloned()
                .unwrap_or_else(|| snake_case(&column.title));

            tracing::trace!(column_id = %column.id, title = %column.title, key = %key, "Mapped column");
            mapping.by_column.insert(column.id, key.clone());
            mapping.columns_by_key.insert(key, column.id);
        }

        mapping
    }

    /// Canonical key for a column id
    pub fn key_for_column(&self, column_id: ColumnId) -> Option<&str> {
        self.by_column.get(&column_id).map(String::as_str)
    }

    /// Column id carrying a canonical key, if the sheet has one
    pub fn column_for_key(&self, key: &str) -> Option<ColumnId> {
        self.columns_by_key.get(key).copied()
    }

    /// Translate a raw field identifier: a column id first, then a column title
    pub fn translate(&self, identifier: &str) -> Option<&str> {
        identifier
            .parse::<ColumnId>()
            .ok()
            .and_then(|id| self.key_for_column(id))
            .or_else(|| self.by_title.get(identifier).map(String::as_str))
    }
}

/// Snake-case a column title after dropping every non-alphanumeric character
///
/// Each uppercase letter after the first character starts a new word, so
/// `"Vendor Tier"` becomes `vendor_tier` and `"RTO"` becomes `r_t_o`.
pub fn snake_case(title: &str) -> String {
    let mut chars = title.chars().filter(char::is_ascii_alphanumeric);
    let mut out = String::new();

    if let Some(first) = chars.next() {
        out.push(first.to_ascii_lowercase());
    }
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Build the raw record for a sheet row
///
/// Cells in columns the mapping does not know are skipped. The row id becomes the
/// record's `custom_id`.
pub fn row_to_record(row: &SheetRow, mapping: &HeaderMapping) -> Value {
    let mut record = Map::new();

    for cell in &row.cells {
        match mapping.key_for_column(cell.column_id) {
            Some(key) => {
                record.insert(key.to_string(), cell.value.clone());
            }
            None => {
                tracing::trace!(row_id = %row.id, column_id = %cell.column_id, "Skipping unmapped cell");
            }
        }
    }

    record.insert("custom_id".to_string(), Value::String(row.id.to_string()));
    Value::Object(record)
}
