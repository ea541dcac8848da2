//! Concatenation of table rows across all pages of a document.

use std::path::Path;

use tracing::{debug, warn};

use super::{PdfTableExtractor, TableSource};
use crate::error::{Result, ScrapeError};
use crate::models::config::TableSettings;

/// Collect the first-cell text of every table row, page by page.
///
/// Pages are visited in ascending order and rows keep their order within a
/// page. Fails with [`ScrapeError::NoTable`] when no page yields a row.
pub fn collect_rows<S: TableSource + ?Sized>(source: &S) -> Result<Vec<String>> {
    let mut rows = Vec::new();

    for page in source.page_numbers() {
        match source.extract_table(page)? {
            Some(table) if !table.rows.is_empty() => {
                debug!("Page {}: table with {} rows", page, table.rows.len());
                rows.extend(table.first_cells());
            }
            _ => debug!("Page {}: no table", page),
        }
    }

    if rows.is_empty() {
        warn!("Unable to extract any table from PDF file.");
        return Err(ScrapeError::NoTable);
    }

    Ok(rows)
}

/// Open the PDF at `path`, collect its table rows and release the document.
pub fn extract_raw_rows(path: &Path, settings: &TableSettings) -> Result<Vec<String>> {
    let extractor = PdfTableExtractor::open(path, settings)?;
    collect_rows(&extractor)
}
