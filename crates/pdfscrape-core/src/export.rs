//! Excel export of line-item tables.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use rust_xlsxwriter::{Format, Workbook};
use tracing::debug;

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::line_item::{LineItem, LineItemTable, COLUMNS};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Spreadsheet path for a PDF: same directory, same stem, `.xlsx` extension.
pub fn output_path_for(pdf_path: &Path) -> PathBuf {
    pdf_path.with_extension("xlsx")
}

/// Write the table to `path`, replacing any existing file.
///
/// The header row holds the column names; every value is written as a
/// string so amounts keep their decimal commas.
pub fn write_xlsx(table: &LineItemTable, path: &Path, config: &ExportConfig) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&config.sheet_name)?;

    let header_format = if config.bold_header {
        Format::new().set_bold()
    } else {
        Format::new()
    };

    for (col, name) in (0u16..).zip(COLUMNS) {
        worksheet.write_string_with_format(0, col, name, &header_format)?;
    }

    for (row, fields) in (1u32..).zip(table.rows()) {
        for (col, value) in (0u16..).zip(fields) {
            worksheet.write_string(row, col, value)?;
        }
    }

    worksheet.autofit();
    workbook.save(path)?;

    debug!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

/// Read a spreadsheet written by [`write_xlsx`] back into a table.
pub fn read_xlsx(path: &Path) -> Result<LineItemTable> {
    let mut workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e: XlsxError| ExportError::Read(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ExportError::Read("workbook has no sheets".to_string()))?
        .map_err(|e| ExportError::Read(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    if header != COLUMNS {
        return Err(ExportError::Header(header));
    }

    let items = rows
        .map(|row| {
            let mut fields: [String; 6] = Default::default();
            for (slot, cell) in fields.iter_mut().zip(row) {
                *slot = cell_to_string(cell);
            }
            LineItem::from_fields(fields)
        })
        .collect();

    Ok(LineItemTable::new(items))
}

fn cell_to_string(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
