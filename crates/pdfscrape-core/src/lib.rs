//! Core library for scraping invoice line items from PDF files.
//!
//! This crate provides:
//! - Best-guess table per PDF page (pdfplumber)
//! - Fixed-pattern parsing of table rows into six line-item fields
//! - Excel export and read-back of the parsed table
//! - A session controller tying upload and export together

pub mod error;
pub mod export;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod session;

pub use error::{ExportError, PdfError, Result, ScrapeError};
pub use export::{output_path_for, read_xlsx, write_xlsx};
pub use invoice::{parse_row, PatternRowParser, RowParser};
pub use models::config::ScraperConfig;
pub use models::line_item::{LineItem, LineItemTable, SortOrder, COLUMNS};
pub use pdf::{PdfTableExtractor, RawTable, TableSource};
pub use session::{scrape_pdf, ExportOutcome, Session};
