//! End-to-end tests on generated invoice PDFs.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use pdfscrape_core::models::config::TableSettings;
use pdfscrape_core::pdf::{collect_rows, extract_raw_rows};
use pdfscrape_core::{
    read_xlsx, scrape_pdf, PdfTableExtractor, ScrapeError, Session, TableSource,
};

const TABLE_TOP: i64 = 700;
const ROW_HEIGHT: i64 = 20;
const TABLE_LEFT: i64 = 50;
const COLUMN_SPLIT: i64 = 470;
const TABLE_RIGHT: i64 = 545;

/// Which rulings are drawn around the line items.
#[derive(Clone, Copy, PartialEq)]
enum Rules {
    /// Full grid: row rules plus left, middle and right column rules.
    Grid,
    /// Row rules only, no column rules.
    HorizontalOnly,
    /// No rulings at all.
    Unruled,
}

/// How text is encoded in the content streams.
#[derive(Clone, Copy, PartialEq)]
enum Font {
    /// Standard Helvetica with single-byte codes.
    Helvetica,
    /// Type0 font with Identity-H two-byte codes and a ToUnicode map.
    Type0,
}

const TO_UNICODE: &str = "\
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0020> <007E> <0020>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

fn add_font(doc: &mut Document, font: Font) -> ObjectId {
    match font {
        Font::Helvetica => doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        }),
        Font::Type0 => {
            let to_unicode_id =
                doc.add_object(Stream::new(dictionary! {}, TO_UNICODE.as_bytes().to_vec()));
            let descendant_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "CIDFontType2",
                "BaseFont" => "InvoiceSans",
                "CIDSystemInfo" => dictionary! {
                    "Registry" => Object::string_literal("Adobe"),
                    "Ordering" => Object::string_literal("Identity"),
                    "Supplement" => 0,
                },
                "DW" => 500,
                "CIDToGIDMap" => "Identity",
            });
            doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type0",
                "BaseFont" => "InvoiceSans",
                "Encoding" => "Identity-H",
                "DescendantFonts" => vec![Object::Reference(descendant_id)],
                "ToUnicode" => Object::Reference(to_unicode_id),
            })
        }
    }
}

fn encode_text(font: Font, text: &str) -> Object {
    match font {
        Font::Helvetica => Object::String(text.as_bytes().to_vec(), StringFormat::Literal),
        Font::Type0 => {
            let bytes = text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect();
            Object::String(bytes, StringFormat::Hexadecimal)
        }
    }
}

fn text_ops(font: Font, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("Td", vec![x.into(), y.into()]),
        Operation::new("Tj", vec![encode_text(font, text)]),
        Operation::new("ET", vec![]),
    ]
}

fn line_ops(x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<Operation> {
    vec![
        Operation::new("m", vec![x0.into(), y0.into()]),
        Operation::new("l", vec![x1.into(), y1.into()]),
        Operation::new("S", vec![]),
    ]
}

fn page_ops(index: usize, rows: &[&str], rules: Rules, font: Font) -> Vec<Operation> {
    let mut operations = vec![Operation::new("w", vec![Object::Real(0.5)])];
    operations.extend(text_ops(
        font,
        TABLE_LEFT,
        780,
        &format!("Factuur 2024-017 pagina {}", index + 1),
    ));

    let table_bottom = TABLE_TOP - rows.len() as i64 * ROW_HEIGHT;
    for (i, row) in rows.iter().enumerate() {
        let band_top = TABLE_TOP - i as i64 * ROW_HEIGHT;
        operations.extend(text_ops(font, TABLE_LEFT + 5, band_top - 14, row));
        operations.extend(text_ops(font, COLUMN_SPLIT + 5, band_top - 14, &format!("p{}", index + 1)));
    }

    if rules != Rules::Unruled && !rows.is_empty() {
        for i in 0..=rows.len() as i64 {
            let y = TABLE_TOP - i * ROW_HEIGHT;
            operations.extend(line_ops(TABLE_LEFT, y, TABLE_RIGHT, y));
        }
        if rules == Rules::Grid {
            for x in [TABLE_LEFT, COLUMN_SPLIT, TABLE_RIGHT] {
                operations.extend(line_ops(x, TABLE_TOP, x, table_bottom));
            }
        }
    }

    operations.extend(text_ops(font, 400, 100, "Totaal excl. BTW 123,45"));
    operations
}

/// One page per entry; each row is the first cell of a two-column table.
fn build_invoice(pages: &[Vec<&str>], rules: Rules, font: Font) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = add_font(&mut doc, font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for (index, rows) in pages.iter().enumerate() {
        let content = Content {
            operations: page_ops(index, rows, rules, font),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict: Dictionary = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn write_invoice(dir: &TempDir, name: &str, pages: &[Vec<&str>], rules: Rules, font: Font) -> PathBuf {
    let path = dir.path().join(name);
    build_invoice(pages, rules, font).save(&path).unwrap();
    path
}

fn two_page_invoice() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "A1001 2 Widget Blue 10,50 5 % 20,00",
            "A1002 1,00 Widget Rood 11,00 0 % 11,00",
            "B-77 3,00 Bout M8 x 40 0,35 10 % 0,95",
        ],
        vec![
            "C300 10 Kabelbinder 200 mm 0,05 0 % 0,50",
            "C301 1,00 Verzendkosten 6,95 0 % 6,95",
            "0042 2,00 Moer M8 0,10 0 % 0,20",
        ],
    ]
}

#[test]
fn test_rows_from_two_pages_in_order() {
    let dir = TempDir::new().unwrap();
    let pages = two_page_invoice();
    let path = write_invoice(&dir, "factuur.pdf", &pages, Rules::Grid, Font::Helvetica);

    let rows = extract_raw_rows(&path, &TableSettings::default()).unwrap();
    let expected: Vec<&str> = pages.iter().flatten().copied().collect();
    assert_eq!(rows, expected);
}

#[test]
fn test_page_table_keeps_every_column() {
    let dir = TempDir::new().unwrap();
    let path = write_invoice(&dir, "factuur.pdf", &two_page_invoice(), Rules::Grid, Font::Helvetica);
    let extractor = PdfTableExtractor::open(&path, &TableSettings::default()).unwrap();

    assert_eq!(extractor.page_numbers(), vec![1, 2]);

    let table = extractor.extract_table(2).unwrap().unwrap();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(
        table.rows[0],
        vec![
            Some("C300 10 Kabelbinder 200 mm 0,05 0 % 0,50".to_string()),
            Some("p2".to_string()),
        ]
    );
}

#[test]
fn test_type0_font_invoice() {
    let dir = TempDir::new().unwrap();
    let pages = two_page_invoice();
    let path = write_invoice(&dir, "cid.pdf", &pages, Rules::Grid, Font::Type0);

    let table = scrape_pdf(&path, &TableSettings::default()).unwrap();
    assert_eq!(table.len(), 6);
    assert_eq!(
        table.items()[0].fields(),
        ["A1001", "2", "Widget Blue", "10,50", "5 %", "20,00"]
    );
    assert_eq!(
        table.items()[4].fields(),
        ["C301", "1,00", "Verzendkosten", "6,95", "0 %", "6,95"]
    );
}

#[test]
fn test_export_two_page_invoice() {
    let dir = TempDir::new().unwrap();
    let path = write_invoice(&dir, "factuur.pdf", &two_page_invoice(), Rules::Grid, Font::Helvetica);

    let mut session = Session::default();
    session.upload(&path).unwrap();
    let outcome = session.export().unwrap();

    assert_eq!(outcome.output_path, dir.path().join("factuur.xlsx"));
    assert_eq!(outcome.table.len(), 6);
    assert_eq!(
        outcome.table.items()[0].fields(),
        ["A1001", "2", "Widget Blue", "10,50", "5 %", "20,00"]
    );
    assert_eq!(outcome.table.items()[5].article_number, "0042");

    let written = read_xlsx(&outcome.output_path).unwrap();
    assert_eq!(written, outcome.table);
}

#[test]
fn test_export_twice_overwrites_with_same_content() {
    let dir = TempDir::new().unwrap();
    let path = write_invoice(&dir, "factuur.pdf", &two_page_invoice(), Rules::Grid, Font::Helvetica);

    let mut session = Session::default();
    session.upload(&path).unwrap();

    let first = session.export().unwrap();
    let first_read = read_xlsx(&first.output_path).unwrap();
    let second = session.export().unwrap();
    let second_read = read_xlsx(&second.output_path).unwrap();

    assert_eq!(first.output_path, second.output_path);
    assert_eq!(first_read, second_read);
}

#[test]
fn test_no_table_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = write_invoice(&dir, "los.pdf", &two_page_invoice(), Rules::Unruled, Font::Helvetica);

    let mut session = Session::default();
    session.upload(&path).unwrap();

    assert!(matches!(session.export(), Err(ScrapeError::NoTable)));
    assert!(!dir.path().join("los.xlsx").exists());
}

#[test]
fn test_row_rules_without_columns_are_not_a_table() {
    let dir = TempDir::new().unwrap();
    let path = write_invoice(
        &dir,
        "strepen.pdf",
        &two_page_invoice(),
        Rules::HorizontalOnly,
        Font::Helvetica,
    );

    assert!(matches!(
        scrape_pdf(&path, &TableSettings::default()),
        Err(ScrapeError::NoTable)
    ));
}

#[test]
fn test_malformed_row_aborts_export() {
    let dir = TempDir::new().unwrap();
    let pages = vec![vec![
        "A1001 2 Widget Blue 10,50 5 % 20,00",
        "A1001 2 Widget Blue 10,50 5 20,00",
    ]];
    let path = write_invoice(&dir, "fout.pdf", &pages, Rules::Grid, Font::Helvetica);

    match scrape_pdf(&path, &TableSettings::default()) {
        Err(ScrapeError::RowMismatch { index, row }) => {
            assert_eq!(index, 1);
            assert_eq!(row, "A1001 2 Widget Blue 10,50 5 20,00");
        }
        other => panic!("expected row mismatch, got {:?}", other),
    }

    let mut session = Session::default();
    session.upload(&path).unwrap();
    assert!(session.export().is_err());
    assert!(!dir.path().join("fout.xlsx").exists());
}

#[test]
fn test_captured_header_row_is_a_mismatch() {
    let dir = TempDir::new().unwrap();
    let pages = vec![vec![
        "Artikelnr Aantal Omschrijving Prijs per stuk Korting Regeltotaal",
        "A1001 2 Widget Blue 10,50 5 % 20,00",
    ]];
    let path = write_invoice(&dir, "kop.pdf", &pages, Rules::Grid, Font::Helvetica);

    assert!(matches!(
        scrape_pdf(&path, &TableSettings::default()),
        Err(ScrapeError::RowMismatch { index: 0, .. })
    ));
}

#[test]
fn test_collect_rows_from_extractor() {
    let dir = TempDir::new().unwrap();
    let pages = vec![vec![], vec!["A1 1,00 Een 1,00 0 % 1,00"]];
    let path = write_invoice(&dir, "half.pdf", &pages, Rules::Grid, Font::Helvetica);

    let extractor = PdfTableExtractor::open(Path::new(&path), &TableSettings::default()).unwrap();
    assert_eq!(collect_rows(&extractor).unwrap(), vec!["A1 1,00 Een 1,00 0 % 1,00"]);
}
