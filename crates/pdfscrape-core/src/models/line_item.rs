//! Invoice line items and the table they are exported as.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column names of the exported table, in field order.
pub const COLUMNS: [&str; 6] = [
    "Artikelnr",
    "Aantal",
    "Omschrijving",
    "Prijs per stuk",
    "Korting",
    "Regeltotaal",
];

/// One parsed invoice row.
///
/// Values are kept exactly as they appear in the PDF; the typed accessors
/// interpret them on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Article number.
    pub article_number: String,
    /// Quantity, e.g. `2` or `1,00`.
    pub quantity: String,
    /// Free-text description.
    pub description: String,
    /// Unit price, e.g. `10,50`.
    pub unit_price: String,
    /// Discount, e.g. `5 %`.
    pub discount: String,
    /// Line total, e.g. `20,00`.
    pub line_total: String,
}

impl LineItem {
    /// Build a line item from the six fields in column order.
    pub fn from_fields(fields: [String; 6]) -> Self {
        let [article_number, quantity, description, unit_price, discount, line_total] = fields;
        Self {
            article_number,
            quantity,
            description,
            unit_price,
            discount,
            line_total,
        }
    }

    /// The six fields in column order.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.article_number.as_str(),
            self.quantity.as_str(),
            self.description.as_str(),
            self.unit_price.as_str(),
            self.discount.as_str(),
            self.line_total.as_str(),
        ]
    }

    /// Field by column index.
    pub fn field(&self, column: usize) -> Option<&str> {
        self.fields().get(column).copied()
    }

    pub fn quantity_value(&self) -> Option<Decimal> {
        parse_dutch_amount(&self.quantity)
    }

    pub fn unit_price_value(&self) -> Option<Decimal> {
        parse_dutch_amount(&self.unit_price)
    }

    /// Discount as a whole percentage.
    pub fn discount_percent(&self) -> Option<u32> {
        self.discount.trim_end_matches('%').trim().parse().ok()
    }

    pub fn line_total_value(&self) -> Option<Decimal> {
        parse_dutch_amount(&self.line_total)
    }
}

/// Parse an amount written with a decimal comma (`1.234,56`, `10,50`, `2`).
pub fn parse_dutch_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '.' | ' ' | '\u{00a0}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Sort direction for the preview grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Ordered line items with the fixed column set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemTable {
    items: Vec<LineItem>,
}

impl LineItemTable {
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    /// Column names, identical for every table.
    pub fn columns(&self) -> &'static [&'static str; 6] {
        &COLUMNS
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows as plain string arrays, in table order.
    pub fn rows(&self) -> impl Iterator<Item = [&str; 6]> {
        self.items.iter().map(LineItem::fields)
    }

    /// Row indices ordered by one column, leaving the table itself untouched.
    ///
    /// Amount columns compare numerically when both values parse; the sort is
    /// stable so equal values keep their table order.
    pub fn sorted_indices(&self, column: usize, order: SortOrder) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.items.len()).collect();
        if column >= COLUMNS.len() {
            return indices;
        }

        indices.sort_by(|&a, &b| {
            let ord = compare_column(&self.items[a], &self.items[b], column);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });
        indices
    }
}

impl From<Vec<LineItem>> for LineItemTable {
    fn from(items: Vec<LineItem>) -> Self {
        Self::new(items)
    }
}

/// Numeric value of an amount column, `None` for text columns and for
/// values that do not parse.
fn column_value(item: &LineItem, column: usize) -> Option<Decimal> {
    match column {
        1 => item.quantity_value(),
        3 => item.unit_price_value(),
        4 => item.discount_percent().map(Decimal::from),
        5 => item.line_total_value(),
        _ => None,
    }
}

/// Total order per column: in amount columns parsed values come first in
/// numeric order, unparsed ones after them in string order.
fn compare_column(a: &LineItem, b: &LineItem, column: usize) -> Ordering {
    match (column_value(a, column), column_value(b, column)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.field(column).cmp(&b.field(column)),
    }
}
