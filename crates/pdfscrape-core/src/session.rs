//! Upload/export controller holding the currently selected PDF.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, ScrapeError};
use crate::export::{output_path_for, write_xlsx};
use crate::invoice::{PatternRowParser, RowParser};
use crate::models::config::{ScraperConfig, TableSettings};
use crate::models::line_item::LineItemTable;
use crate::pdf::extract_raw_rows;

/// Outcome of a successful export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Spreadsheet that was written.
    pub output_path: PathBuf,
    /// The exported table, for the preview grid.
    pub table: LineItemTable,
}

/// Extract and parse every line item of the PDF at `path`.
pub fn scrape_pdf(path: &Path, settings: &TableSettings) -> Result<LineItemTable> {
    let rows = extract_raw_rows(path, settings)?;
    debug!("Extracted {} raw rows from {}", rows.len(), path.display());
    PatternRowParser::new().parse_rows(&rows)
}

/// Tracks the uploaded PDF between the upload and export actions.
#[derive(Debug, Clone, Default)]
pub struct Session {
    selected: Option<PathBuf>,
    config: ScraperConfig,
}

impl Session {
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            selected: None,
            config,
        }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// The currently selected PDF, if any.
    pub fn selected(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// Select a PDF for export.
    ///
    /// Paths without a `.pdf` extension (any case) are rejected and the
    /// previous selection is kept.
    pub fn upload(&mut self, path: impl Into<PathBuf>) -> Result<&Path> {
        let path = path.into();
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

        if !is_pdf {
            debug!("Rejected upload of {}", path.display());
            return Err(ScrapeError::NotPdf(path));
        }

        info!("Uploaded: {}", path.display());
        let selected = self.selected.insert(path);
        Ok(selected.as_path())
    }

    /// Extract the selected PDF and write `<stem>.xlsx` next to it.
    ///
    /// Nothing is read or written when no PDF is selected. Extraction is
    /// all-or-nothing: on any failure no spreadsheet is written.
    pub fn export(&self) -> Result<ExportOutcome> {
        let pdf_path = self.selected.as_deref().ok_or(ScrapeError::NoFileSelected)?;

        let table = scrape_pdf(pdf_path, &self.config.pdf)?;
        let output_path = output_path_for(pdf_path);
        write_xlsx(&table, &output_path, &self.config.export)?;

        info!(
            "Converted {} to {} ({} rows)",
            pdf_path.display(),
            output_path.display(),
            table.len()
        );
        Ok(ExportOutcome { output_path, table })
    }
}
