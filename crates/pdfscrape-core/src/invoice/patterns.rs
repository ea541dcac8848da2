//! Regex patterns for invoice line-item rows.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Artikelnr, Aantal, Omschrijving, Prijs per stuk, Korting, Regeltotaal.
    // Anchored at the start only; trailing text after the total is ignored.
    // The quantity may be a bare integer as well as a decimal-comma amount.
    pub static ref LINE_ITEM_ROW: Regex = Regex::new(
        r"^(\S+)\s+(\d+(?:,\d{2})?)\s+(.+?)\s+(\d+,\d{2})\s+(\d+ %)\s+(\d+,\d{2})"
    ).unwrap();
}
