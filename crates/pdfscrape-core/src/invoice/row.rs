//! Fixed-pattern decomposition of a flattened table row.

use tracing::{debug, trace};

use super::patterns::LINE_ITEM_ROW;
use super::RowParser;
use crate::error::{Result, ScrapeError};
use crate::models::line_item::{LineItem, LineItemTable};

/// Split a raw row into its six fields, or `None` when it does not match.
pub fn parse_row(row: &str) -> Option<LineItem> {
    let caps = LINE_ITEM_ROW.captures(row)?;
    let field = |i: usize| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string());

    Some(LineItem::from_fields([
        field(1),
        field(2),
        field(3),
        field(4),
        field(5),
        field(6),
    ]))
}

/// Row parser backed by [`LINE_ITEM_ROW`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRowParser;

impl PatternRowParser {
    pub fn new() -> Self {
        Self
    }
}

impl RowParser for PatternRowParser {
    fn parse_row(&self, row: &str) -> Option<LineItem> {
        parse_row(row)
    }

    fn parse_rows<S: AsRef<str>>(&self, rows: &[S]) -> Result<LineItemTable> {
        let mut items = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            match self.parse_row(row) {
                Some(item) => {
                    trace!("Row {}: {:?}", index, item.fields());
                    items.push(item);
                }
                None => {
                    debug!("{}\nRow {} does not split into 6 fields.", row, index);
                    return Err(ScrapeError::RowMismatch {
                        index,
                        row: row.to_string(),
                    });
                }
            }
        }

        debug!("Parsed {} line items", items.len());
        Ok(LineItemTable::new(items))
    }
}
