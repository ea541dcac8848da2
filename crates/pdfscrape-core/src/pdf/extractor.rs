//! Table extraction from PDF documents using pdfplumber.

use std::path::Path;

use pdfplumber::{Pdf, PdfErrorKind, Strategy, TableSettings as FinderSettings};
use tracing::debug;

use super::{RawTable, Result, TableSource};
use crate::error::PdfError;
use crate::models::config::TableSettings;

/// Locates the best-guess table on each page of a loaded document.
pub struct PdfTableExtractor {
    pdf: Pdf,
    settings: FinderSettings,
}

impl PdfTableExtractor {
    /// Read and parse the file; the file handle is released before returning.
    pub fn open(path: &Path, settings: &TableSettings) -> Result<Self> {
        let pdf = Pdf::open_file(path, None)
            .map_err(|e| open_error(&path.display().to_string(), e))?;
        Self::from_pdf(pdf, settings)
    }

    /// Load a PDF from bytes.
    pub fn from_bytes(data: &[u8], settings: &TableSettings) -> Result<Self> {
        let pdf = Pdf::open_bytes(data, None).map_err(|e| open_error("<memory>", e))?;
        Self::from_pdf(pdf, settings)
    }

    fn from_pdf(pdf: Pdf, settings: &TableSettings) -> Result<Self> {
        let page_count = pdf.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self {
            pdf,
            settings: finder_settings(settings),
        })
    }

    pub fn page_count(&self) -> usize {
        self.pdf.page_count()
    }
}

/// Ruled ("lines") detection with the configured tolerances on both axes.
fn finder_settings(settings: &TableSettings) -> FinderSettings {
    FinderSettings {
        strategy: Strategy::Lattice,
        snap_tolerance: settings.snap_tolerance,
        snap_x_tolerance: settings.snap_tolerance,
        snap_y_tolerance: settings.snap_tolerance,
        join_tolerance: settings.join_tolerance,
        join_x_tolerance: settings.join_tolerance,
        join_y_tolerance: settings.join_tolerance,
        intersection_tolerance: settings.intersection_tolerance,
        intersection_x_tolerance: settings.intersection_tolerance,
        intersection_y_tolerance: settings.intersection_tolerance,
        text_tolerance: settings.text_tolerance,
        text_x_tolerance: settings.text_tolerance,
        text_y_tolerance: settings.text_tolerance,
        edge_min_length: settings.edge_min_length,
        ..FinderSettings::default()
    }
}

fn open_error(source: &str, err: pdfplumber::PdfError) -> PdfError {
    match err.kind() {
        PdfErrorKind::PasswordRequired | PdfErrorKind::InvalidPassword => PdfError::Encrypted,
        _ => PdfError::Parse(format!("{}: {}", source, err)),
    }
}

impl TableSource for PdfTableExtractor {
    fn page_numbers(&self) -> Vec<u32> {
        (1..=self.pdf.page_count() as u32).collect()
    }

    fn extract_table(&self, page: u32) -> Result<Option<RawTable>> {
        let index = page
            .checked_sub(1)
            .map(|i| i as usize)
            .filter(|&i| i < self.pdf.page_count())
            .ok_or(PdfError::InvalidPage(page))?;

        let pdf_page = self.pdf.page(index).map_err(|e| PdfError::Content {
            page,
            reason: e.to_string(),
        })?;

        let table = pdf_page.extract_table(&self.settings);
        debug!(
            "Page {}: {} chars, {}",
            page,
            pdf_page.chars().len(),
            match &table {
                Some(rows) => format!("table with {} rows", rows.len()),
                None => "no table".to_string(),
            }
        );
        Ok(table.map(RawTable::from))
    }
}
