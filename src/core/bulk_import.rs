//! Bulk-import template layout
//!
//! Lays vendor records out as the grid of the platform's bulk-import workbook. Each
//! record takes one row, except that a list value expands downward over several rows.
//! The next record starts below its tallest expansion.

use crate::core::schema::{display_text, resolve};
use serde_json::Value;

/// Narrowest column width, in characters
pub const MIN_COLUMN_WIDTH: usize = 9;

/// Widest column width, in characters
pub const MAX_COLUMN_WIDTH: usize = 125;

/// Header cell colour of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFill {
    #[default]
    Grey,
    /// Required columns, drawn with a white font
    Blue,
    Orange,
}

impl HeaderFill {
    /// Fill colour as `0xRRGGBB`
    pub fn rgb(self) -> u32 {
        match self {
            HeaderFill::Grey => 0xC9C9C9,
            HeaderFill::Blue => 0x0065B8,
            HeaderFill::Orange => 0xFFB802,
        }
    }

    pub fn white_font(self) -> bool {
        matches!(self, HeaderFill::Blue)
    }
}

/// One template column: its header, the record path feeding it, and its colour
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkImportColumn {
    pub header: String,
    pub key: String,
    pub fill: HeaderFill,
}

impl BulkImportColumn {
    pub fn new(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            key: key.into(),
            fill: HeaderFill::Grey,
        }
    }

    pub fn with_fill(mut self, fill: HeaderFill) -> Self {
        self.fill = fill;
        self
    }
}

/// Columns of the third-party bulk-import template, read from raw sheet records
pub fn default_columns() -> Vec<BulkImportColumn> {
    vec![
        BulkImportColumn::new("Third Party Legal or DBA Name", "company_name")
            .with_fill(HeaderFill::Blue),
        BulkImportColumn::new("Website Name URL", "company_url").with_fill(HeaderFill::Blue),
        BulkImportColumn::new("Third Party HQ City", "address_city"),
        BulkImportColumn::new("Third Party HQ Country", "address_country"),
    ]
}

/// The laid-out template: data cells below the header row, plus column widths
#[derive(Debug, Clone, PartialEq)]
pub struct BulkImportGrid {
    pub columns: Vec<BulkImportColumn>,

    /// Data rows (header excluded); `None` leaves the cell empty
    pub rows: Vec<Vec<Option<String>>>,

    /// Width of each column in characters
    pub widths: Vec<usize>,
}

impl BulkImportGrid {
    /// Lay out `records` under `columns`
    pub fn build<'a, I>(columns: Vec<BulkImportColumn>, records: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut rows: Vec<Vec<Option<String>>> = Vec::new();

        for record in records {
            let start = rows.len();

            for (index, column) in columns.iter().enumerate() {
                let cells = match resolve(record, &column.key, Value::Null) {
                    Value::Null => continue,
                    Value::Array(items) => items.iter().map(cell_text).collect(),
                    value => vec![cell_text(&value)],
                };

                for (offset, cell) in cells.into_iter().enumerate() {
                    let row = grow_to(&mut rows, start + offset, columns.len());
                    row[index] = cell;
                }
            }

            // a record with nothing to write still takes its row
            grow_to(&mut rows, start, columns.len());
        }

        let widths = column_widths(&columns, &rows);

        Self {
            columns,
            rows,
            widths,
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.header.as_str())
    }
}

fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        value => Some(display_text(value)),
    }
}

fn grow_to(rows: &mut Vec<Vec<Option<String>>>, index: usize, width: usize) -> &mut Vec<Option<String>> {
    while rows.len() <= index {
        rows.push(vec![None; width]);
    }
    &mut rows[index]
}

fn column_widths(columns: &[BulkImportColumn], rows: &[Vec<Option<String>>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let longest = rows
                .iter()
                .filter_map(|row| row[index].as_deref())
                .map(|text| text.chars().count())
                .chain(std::iter::once(column.header.chars().count()))
                .max()
                .unwrap_or(0);

            (longest + 1).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_columns() -> Vec<BulkImportColumn> {
        vec![
            BulkImportColumn::new("Name", "name").with_fill(HeaderFill::Blue),
            BulkImportColumn::new("Domains", "domains"),
        ]
    }

    #[test]
    fn test_default_columns() {
        let columns = default_columns();
        assert_eq!(columns.len(), 4);
        assert_eq!(columns[0].key, "company_name");
        assert_eq!(columns[1].fill, HeaderFill::Blue);
        assert_eq!(columns[3].fill, HeaderFill::Grey);
    }

    #[test]
    fn test_one_row_per_scalar_record() {
        let records = [json!({"name": "Acme", "domains": "acme.com"}), json!({"name": "Globex"})];
        let grid = BulkImportGrid::build(two_columns(), &records);

        assert_eq!(
            grid.rows,
            vec![
                vec![Some("Acme".to_string()), Some("acme.com".to_string())],
                vec![Some("Globex".to_string()), None],
            ]
        );
    }

    #[test]
    fn test_lists_expand_downward() {
        let records = [
            json!({"name": "Acme", "domains": ["acme.com", "acme.io", "acme.dev"]}),
            json!({"name": "Globex", "domains": null}),
        ];
        let grid = BulkImportGrid::build(two_columns(), &records);

        assert_eq!(grid.rows.len(), 4);
        assert_eq!(grid.rows[0][0].as_deref(), Some("Acme"));
        assert_eq!(grid.rows[2][1].as_deref(), Some("acme.dev"));
        assert_eq!(grid.rows[1][0], None);
        assert_eq!(grid.rows[3][0].as_deref(), Some("Globex"));
    }

    #[test]
    fn test_empty_record_takes_a_row() {
        let records = [json!({}), json!({"name": "Acme"})];
        let grid = BulkImportGrid::build(two_columns(), &records);

        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[1][0].as_deref(), Some("Acme"));
    }

    #[test]
    fn test_column_widths_are_clamped() {
        let long = "x".repeat(300);
        let records = [json!({"name": "Acme", "domains": long})];
        let grid = BulkImportGrid::build(two_columns(), &records);

        assert_eq!(grid.widths, vec![MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH]);

        let records = [json!({"name": "Initech Incorporated"})];
        let grid = BulkImportGrid::build(two_columns(), &records);
        assert_eq!(grid.widths[0], 21);
    }

    #[test]
    fn test_header_fill_colours() {
        assert_eq!(HeaderFill::default(), HeaderFill::Grey);
        assert_eq!(HeaderFill::Blue.rgb(), 0x0065B8);
        assert!(HeaderFill::Blue.white_font());
        assert!(!HeaderFill::Orange.white_font());
    }
}
