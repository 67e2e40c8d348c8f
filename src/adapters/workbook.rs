//! Bulk-import workbook rendering

use crate::core::bulk_import::{BulkImportGrid, HeaderFill};
use crate::domain::{Result, VendorSyncError};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook, XlsxError};
use std::path::Path;

/// Name of the worksheet holding the template
pub const WORKSHEET_NAME: &str = "Third Parties";

impl From<XlsxError> for VendorSyncError {
    fn from(err: XlsxError) -> Self {
        VendorSyncError::Workbook(err.to_string())
    }
}

fn header_format(fill: HeaderFill) -> Format {
    let format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(fill.rgb()));

    if fill.white_font() {
        format.set_font_color(Color::White)
    } else {
        format
    }
}

/// Render `grid` as an xlsx workbook at `path`
///
/// # Errors
///
/// Returns an error if a cell cannot be written or the file cannot be saved
pub fn write_workbook(grid: &BulkImportGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    let wrap = Format::new().set_text_wrap();

    for (col, column) in grid.columns.iter().enumerate() {
        let col = column_index(col)?;
        worksheet.write_string_with_format(0, col, &column.header, &header_format(column.fill))?;
    }

    for (index, row) in grid.rows.iter().enumerate() {
        let row_num = u32::try_from(index + 1)
            .map_err(|_| VendorSyncError::Workbook(format!("row {index} out of range")))?;

        for (col, cell) in row.iter().enumerate() {
            if let Some(text) = cell {
                worksheet.write_string_with_format(row_num, column_index(col)?, text, &wrap)?;
            }
        }
    }

    for (col, width) in grid.widths.iter().enumerate() {
        worksheet.set_column_width(column_index(col)?, *width as f64)?;
    }

    workbook.save(path)?;

    tracing::info!(
        path = %path.display(),
        rows = grid.rows.len(),
        "Wrote bulk-import workbook"
    );

    Ok(())
}

fn column_index(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| VendorSyncError::Workbook(format!("column {col} out of range")))
}
