//! PDF processing module: best-guess table per page and row collection.

mod aggregate;
mod extractor;

pub use aggregate::{collect_rows, extract_raw_rows};
pub use extractor::PdfTableExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// The best-guess table of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    /// Cell text per row, top to bottom. Blank cells hold `Some("")`;
    /// `None` marks a grid position covered by a spanning cell.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Text of the first cell of every row, empty when the cell is blank.
    pub fn first_cells(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.first().cloned().flatten().unwrap_or_default())
            .collect()
    }
}

impl From<Vec<Vec<Option<String>>>> for RawTable {
    fn from(rows: Vec<Vec<Option<String>>>) -> Self {
        Self::new(rows)
    }
}

/// Trait for anything that yields one best-guess table per page.
pub trait TableSource {
    /// Page numbers (1-indexed) in document order.
    fn page_numbers(&self) -> Vec<u32>;

    /// The best-guess table of a page, `None` when the page has none.
    fn extract_table(&self, page: u32) -> Result<Option<RawTable>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_cells() {
        let table = RawTable::from(vec![
            vec![Some("A1 1,00 Een".to_string()), Some("x".to_string())],
            vec![Some(String::new()), Some("y".to_string())],
            vec![None, Some("z".to_string())],
            vec![],
        ]);

        assert_eq!(table.first_cells(), vec!["A1 1,00 Een", "", "", ""]);
    }
}
