//! Sync planning
//!
//! Splits the normalized sheet vendors into those the platform does not know yet and
//! those it does, and builds the sheet row updates for the latter.

use crate::core::normalize::{HeaderMapping, WRITE_BACK_COLUMNS};
use crate::core::schema::{display_text, is_truthy, resolve};
use crate::domain::{CellUpdate, CustomId, RowUpdate};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Key under which a matched vendor carries its platform record
pub const PLATFORM_RECORD_KEY: &str = "grx";

/// The custom id of a record, when it carries a usable one
pub fn custom_id_of(record: &Value) -> Option<CustomId> {
    record
        .get("custom_id")
        .filter(|value| is_truthy(value))
        .and_then(|value| CustomId::new(display_text(value)).ok())
}

/// Name used in logs and error context
pub fn vendor_label(vendor: &Value) -> String {
    match vendor.get("name") {
        Some(name) if is_truthy(name) => display_text(name),
        _ => custom_id_of(vendor)
            .map(|id| format!("row {id}"))
            .unwrap_or_else(|| "<unnamed vendor>".to_string()),
    }
}

/// Sheet vendors split by whether the platform already tracks them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncPlan {
    /// Vendors whose custom id no platform record carries
    pub missing: Vec<Value>,

    /// Vendors with a platform record, attached under [`PLATFORM_RECORD_KEY`]
    pub matched: Vec<Value>,
}

impl SyncPlan {
    /// Match sheet vendors to platform records by custom id
    pub fn build(sheet_vendors: Vec<Value>, remote_records: &[Value]) -> Self {
        let remote_by_id: HashMap<CustomId, &Value> = remote_records
            .iter()
            .filter_map(|record| custom_id_of(record).map(|id| (id, record)))
            .collect();

        let mut plan = SyncPlan::default();

        for mut vendor in sheet_vendors {
            let remote = custom_id_of(&vendor).and_then(|id| remote_by_id.get(&id).copied());

            match (remote, vendor.as_object_mut()) {
                (Some(remote), Some(fields)) => {
                    fields.insert(PLATFORM_RECORD_KEY.to_string(), remote.clone());
                    plan.matched.push(vendor);
                }
                _ => plan.missing.push(vendor),
            }
        }

        tracing::debug!(
            missing = plan.missing.len(),
            matched = plan.matched.len(),
            remote_ids = remote_by_id.len(),
            "Built sync plan"
        );

        plan
    }

    /// Custom ids of every vendor the plan considers missing
    pub fn missing_ids(&self) -> HashSet<CustomId> {
        self.missing.iter().filter_map(custom_id_of).collect()
    }

    /// Matched vendors with an incomplete platform profile and scoping answers to send
    pub fn needs_scoping(&self) -> impl Iterator<Item = &Value> {
        self.matched.iter().filter(|vendor| {
            let complete = resolve(vendor, "grx.is_profile_complete", Value::Null);
            !is_truthy(&complete) && vendor.get("third_party_scoping").is_some_and(is_truthy)
        })
    }
}

/// Row update copying the matched platform data into the vendor's sheet row
///
/// Only write-back columns present in the sheet get a cell. A missing value is
/// written as an empty string, which clears the cell. Returns `None` when the vendor
/// has no numeric row id or the sheet has none of the columns.
pub fn row_update_for(vendor: &Value, mapping: &HeaderMapping) -> Option<RowUpdate> {
    let row_id = custom_id_of(vendor)?.row_id()?;

    let cells: Vec<CellUpdate> = WRITE_BACK_COLUMNS
        .iter()
        .filter_map(|column| {
            let column_id = mapping.column_for_key(column.key)?;
            let value = match resolve(vendor, column.path, Value::Null) {
                Value::Null => Value::String(String::new()),
                value => value,
            };
            Some(CellUpdate { column_id, value })
        })
        .collect();

    if cells.is_empty() {
        return None;
    }

    Some(RowUpdate { id: row_id, cells })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ColumnId, RowId, SheetColumn};
    use serde_json::json;

    fn remote(custom_id: Value, complete: bool) -> Value {
        json!({"id": "tp-1", "custom_id": custom_id, "is_profile_complete": complete, "impact": "High"})
    }

    #[test]
    fn test_custom_id_of() {
        assert_eq!(custom_id_of(&json!({"custom_id": "42"})).unwrap().as_str(), "42");
        assert_eq!(custom_id_of(&json!({"custom_id": 42})).unwrap().as_str(), "42");
        assert!(custom_id_of(&json!({"custom_id": ""})).is_none());
        assert!(custom_id_of(&json!({"custom_id": null})).is_none());
        assert!(custom_id_of(&json!({})).is_none());
    }

    #[test]
    fn test_build_splits_missing_and_matched() {
        let sheet = vec![
            json!({"name": "Acme", "custom_id": "1"}),
            json!({"name": "Globex", "custom_id": "2"}),
        ];
        let remote_records = vec![remote(json!("1"), true), remote(json!(null), false)];

        let plan = SyncPlan::build(sheet, &remote_records);

        assert_eq!(plan.missing.len(), 1);
        assert_eq!(plan.missing[0]["name"], "Globex");
        assert_eq!(plan.matched.len(), 1);
        assert_eq!(plan.matched[0]["grx"]["impact"], "High");
        assert_eq!(plan.missing_ids(), HashSet::from([CustomId::new("2").unwrap()]));
    }

    #[test]
    fn test_vendor_without_custom_id_is_missing() {
        let plan = SyncPlan::build(vec![json!({"name": "Acme"})], &[remote(json!("1"), true)]);
        assert_eq!(plan.missing.len(), 1);
        assert!(plan.matched.is_empty());
    }

    #[test]
    fn test_needs_scoping() {
        let sheet = vec![
            json!({"name": "A", "custom_id": "1", "third_party_scoping": {"data": "Significant"}}),
            json!({"name": "B", "custom_id": "2", "third_party_scoping": {"data": "Limited"}}),
            json!({"name": "C", "custom_id": "3"}),
        ];
        let remote_records = vec![
            remote(json!("1"), false),
            remote(json!("2"), true),
            remote(json!("3"), false),
        ];

        let plan = SyncPlan::build(sheet, &remote_records);
        let names: Vec<&Value> = plan.needs_scoping().map(|v| &v["name"]).collect();
        assert_eq!(names, vec![&json!("A")]);
    }

    #[test]
    fn test_vendor_label() {
        assert_eq!(vendor_label(&json!({"name": "Acme"})), "Acme");
        assert_eq!(vendor_label(&json!({"custom_id": "7"})), "row 7");
        assert_eq!(vendor_label(&json!({})), "<unnamed vendor>");
    }

    #[test]
    fn test_row_update_for_present_columns_only() {
        let mapping = HeaderMapping::for_columns(&[
            SheetColumn {
                id: ColumnId::new(10),
                title: "Impact".to_string(),
            },
            SheetColumn {
                id: ColumnId::new(11),
                title: "Likelihood".to_string(),
            },
        ]);
        let vendor = json!({"custom_id": "101", "grx": {"impact": "High", "likelihood": null}});

        let update = row_update_for(&vendor, &mapping).unwrap();

        assert_eq!(update.id, RowId::new(101));
        assert_eq!(
            update.cells,
            vec![
                CellUpdate {
                    column_id: ColumnId::new(10),
                    value: json!("High"),
                },
                CellUpdate {
                    column_id: ColumnId::new(11),
                    value: json!(""),
                },
            ]
        );
    }

    #[test]
    fn test_row_update_for_requires_numeric_row_and_columns() {
        let mapping = HeaderMapping::for_columns(&[SheetColumn {
            id: ColumnId::new(10),
            title: "Impact".to_string(),
        }]);

        assert!(row_update_for(&json!({"custom_id": "abc", "grx": {}}), &mapping).is_none());
        assert!(row_update_for(&json!({"custom_id": "5"}), &HeaderMapping::default()).is_none());
    }
}
