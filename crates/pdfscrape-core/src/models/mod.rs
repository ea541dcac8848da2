//! Data models for line items and configuration.

pub mod config;
pub mod line_item;

pub use config::{ExportConfig, ScraperConfig, TableSettings, UiConfig};
pub use line_item::{parse_dutch_amount, LineItem, LineItemTable, SortOrder, COLUMNS};
