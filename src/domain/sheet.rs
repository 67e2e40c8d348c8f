//! Tracking sheet models
//!
//! These mirror the sheet service's JSON representation (camelCase fields) so the
//! adapter can deserialize responses straight into them.

use super::ids::{ColumnId, RowId, SheetId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A sheet with its column layout and rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub id: SheetId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<SheetColumn>,
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

impl Sheet {
    /// Find a column by its exact title
    pub fn column_by_title(&self, title: &str) -> Option<&SheetColumn> {
        self.columns.iter().find(|c| c.title == title)
    }
}

/// Sheet listing entry (no rows or columns)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub id: SheetId,
    pub name: String,
}

/// A column header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetColumn {
    pub id: ColumnId,
    pub title: String,
}

/// One sheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    pub id: RowId,
    #[serde(default)]
    pub cells: Vec<SheetCell>,
}

impl SheetRow {
    /// Creates a row from `(column, value)` pairs
    pub fn new(id: RowId, cells: impl IntoIterator<Item = (ColumnId, Value)>) -> Self {
        Self {
            id,
            cells: cells
                .into_iter()
                .map(|(column_id, value)| SheetCell { column_id, value })
                .collect(),
        }
    }
}

/// One cell of a row; blank cells carry `null`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetCell {
    pub column_id: ColumnId,
    #[serde(default)]
    pub value: Value,
}

/// Update of a single existing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowUpdate {
    pub id: RowId,
    pub cells: Vec<CellUpdate>,
}

/// New value for one cell in a [`RowUpdate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdate {
    pub column_id: ColumnId,
    pub value: Value,
}
