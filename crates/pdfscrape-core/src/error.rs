//! Error types for the pdfscrape-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pdfscrape library.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Export was requested before a PDF was uploaded.
    #[error("No PDF file uploaded.")]
    NoFileSelected,

    /// The chosen file does not carry a `.pdf` extension.
    #[error("Please upload a PDF file. ({})", .0.display())]
    NotPdf(PathBuf),

    /// No page of the document produced a table.
    #[error("Unable to extract any table from PDF file.")]
    NoTable,

    /// A table row does not decompose into the six line-item fields.
    #[error("row {index} does not match the expected six-field pattern: {row:?}")]
    RowMismatch { index: usize, row: String },

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Spreadsheet export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ScrapeError {
    /// Short title for the notification shown to the user.
    pub fn title(&self) -> &'static str {
        match self {
            ScrapeError::NoFileSelected | ScrapeError::NotPdf(_) => "Error",
            ScrapeError::NoTable => "No table found",
            ScrapeError::RowMismatch { .. } => "Unrecognised row",
            ScrapeError::Pdf(_) => "PDF error",
            ScrapeError::Export(_) => "Export failed",
            ScrapeError::Io(_) => "File error",
            ScrapeError::Config(_) => "Invalid configuration",
        }
    }

    /// Message shown to the user in an error dialog.
    pub fn user_message(&self) -> String {
        match self {
            ScrapeError::NotPdf(_) => "Please upload a PDF file.".to_string(),
            ScrapeError::RowMismatch { index, row } => format!(
                "Row {} of the extracted table could not be split into \
                 Artikelnr, Aantal, Omschrijving, Prijs per stuk, Korting and Regeltotaal:\n\n{}",
                index + 1,
                row
            ),
            other => other.to_string(),
        }
    }
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to load or interpret a page.
    #[error("failed to read page {page}: {reason}")]
    Content { page: u32, reason: String },

    /// The PDF needs a password to be opened.
    #[error("PDF is password protected")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to writing or reading spreadsheets.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The workbook could not be built or saved.
    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// The workbook could not be opened or read.
    #[error("failed to read workbook: {0}")]
    Read(String),

    /// The workbook does not have the expected header row.
    #[error("unexpected header row: {0:?}")]
    Header(Vec<String>),
}

/// Result type for the pdfscrape library.
pub type Result<T> = std::result::Result<T, ScrapeError>;
