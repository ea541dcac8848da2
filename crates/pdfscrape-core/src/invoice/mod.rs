//! Line-item row parsing.

pub mod patterns;
mod row;

pub use row::{parse_row, PatternRowParser};

use crate::error::Result;
use crate::models::line_item::{LineItem, LineItemTable};

/// Trait for turning raw table rows into line items.
pub trait RowParser {
    /// Decompose one raw row, or `None` when it does not match.
    fn parse_row(&self, row: &str) -> Option<LineItem>;

    /// Parse every row; the first non-matching row aborts the whole batch.
    fn parse_rows<S: AsRef<str>>(&self, rows: &[S]) -> Result<LineItemTable>;
}
