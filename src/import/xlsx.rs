//! Spreadsheet row source backed by calamine.
//!
//! Reads the four index columns (Entry, Pages, Book, Description) from a
//! named worksheet. Sheet row 1 is the header and is skipped. Positions
//! are absolute: column A is always Entry, even if the used range of the
//! sheet starts further right or further down.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::IndexRow;
use crate::util::{format_number, non_blank};

/// Number of positional fields every data row must provide.
pub const INDEX_COLUMNS: usize = 4;

/// Lazy iterator over the data rows of one worksheet.
///
/// Yields every row of the used range in sheet order; fully blank rows come
/// through as [`IndexRow::default`]. After the first error the iterator is
/// exhausted.
#[derive(Debug)]
pub struct SheetRows {
    range: Range<Data>,
    /// Absolute (row, column) of the range's top-left cell.
    origin: (usize, usize),
    next: usize,
}

/// Open `sheet_name` in the workbook at `path` and return its data rows.
///
/// Any format calamine detects from the extension is accepted (xlsx,
/// xlsm, xlsb, xls, ods).
pub fn open_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<SheetRows> {
    let path = path.as_ref();
    let mut workbook = open_workbook_auto(path)?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(Error::MissingSheet {
            sheet: sheet_name.to_string(),
            available,
        });
    }

    let range = workbook.worksheet_range(sheet_name)?;
    info!(
        path = %path.display(),
        sheet = sheet_name,
        height = range.height(),
        width = range.width(),
        "opened worksheet"
    );
    Ok(SheetRows::from_range(range))
}

/// Read and materialize every data row of a worksheet.
pub fn read_rows<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Vec<IndexRow>> {
    open_sheet(path, sheet_name)?.collect()
}

impl SheetRows {
    /// Iterate the data rows of an already loaded range.
    pub fn from_range(range: Range<Data>) -> Self {
        let origin = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));
        // The header is absolute sheet row 0; skip it only if the range
        // actually covers it.
        let next = if origin.0 == 0 { 1 } else { 0 };
        Self {
            range,
            origin,
            next,
        }
    }

    /// Positional fields available per row (columns A through the last
    /// used column).
    pub fn field_count(&self) -> usize {
        if self.range.is_empty() {
            0
        } else {
            self.origin.1 + self.range.width()
        }
    }

    /// Text of the cell at a relative row and absolute column.
    fn cell(&self, row: usize, col: usize) -> Option<String> {
        let rel_col = col.checked_sub(self.origin.1)?;
        self.range.get((row, rel_col)).and_then(cell_text)
    }
}

impl Iterator for SheetRows {
    type Item = Result<IndexRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.range.height() {
            return None;
        }
        let rel_row = self.next;
        self.next += 1;
        // 1-based, as shown in spreadsheet applications
        let sheet_row = self.origin.0 + rel_row + 1;

        let fields = self.field_count();
        if fields < INDEX_COLUMNS {
            self.next = self.range.height();
            return Some(Err(Error::MalformedRow {
                row: sheet_row,
                fields,
            }));
        }

        let row = IndexRow {
            entry: self.cell(rel_row, 0),
            pages: self.cell(rel_row, 1),
            book: self.cell(rel_row, 2),
            description: self.cell(rel_row, 3),
        };
        if row.is_blank() {
            debug!(row = sheet_row, "blank row");
        }
        Some(Ok(row))
    }
}

impl std::iter::FusedIterator for SheetRows {}

/// Convert a cell to index text. Blank cells, and text that is only
/// whitespace, are `None`.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => non_blank(s),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_number(*f)),
        Data::Bool(b) => Some(b.to_string()),
        other => non_blank(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(cells: &[(u32, u32, Data)]) -> Range<Data> {
        let max_row = cells.iter().map(|c| c.0).max().unwrap_or(0);
        let max_col = cells.iter().map(|c| c.1).max().unwrap_or(0);
        let min_row = cells.iter().map(|c| c.0).min().unwrap_or(0);
        let min_col = cells.iter().map(|c| c.1).min().unwrap_or(0);
        let mut range = Range::new((min_row, min_col), (max_row, max_col));
        for (row, col, value) in cells {
            range.set_value((*row, *col), value.clone());
        }
        range
    }

    fn text(s: &str) -> Data {
        Data::String(s.to_string())
    }

    fn header() -> Vec<(u32, u32, Data)> {
        vec![
            (0, 0, text("Entry")),
            (0, 1, text("Pages")),
            (0, 2, text("Book")),
            (0, 3, text("Description")),
        ]
    }

    #[test]
    fn test_skips_header_row() {
        let mut cells = header();
        cells.extend([
            (1, 0, text("Zebra")),
            (1, 1, Data::Float(5.0)),
            (1, 2, text("BookA")),
            (1, 3, text("desc")),
            (2, 0, text("apple")),
            (2, 1, text("1,2")),
            (2, 2, text("BookB")),
        ]);

        let rows: Vec<_> = SheetRows::from_range(sheet(&cells))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            IndexRow::new("Zebra")
                .with_pages("5")
                .with_book("BookA")
                .with_description("desc")
        );
        assert_eq!(rows[1].entry(), Some("apple"));
        assert_eq!(rows[1].pages(), Some("1,2"));
        assert_eq!(rows[1].description, None);
    }

    #[test]
    fn test_numbers_and_blanks() {
        let mut cells = header();
        cells.extend([
            (1, 0, text("Ant")),
            (1, 1, Data::Int(12)),
            (1, 2, text("   ")),
            (2, 0, text("Bee")),
            (2, 1, Data::Float(7.5)),
        ]);

        let rows: Vec<_> = SheetRows::from_range(sheet(&cells))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows[0].pages(), Some("12"));
        assert_eq!(rows[0].book, None);
        assert_eq!(rows[1].pages(), Some("7.5"));
    }

    #[test]
    fn test_blank_rows_are_kept() {
        let mut cells = header();
        cells.extend([(1, 0, text("Ant")), (2, 0, text("  ")), (3, 0, text("Bee"))]);

        let rows: Vec<_> = SheetRows::from_range(sheet(&cells))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].entry(), Some("Ant"));
        assert!(rows[1].is_blank());
        assert_eq!(rows[1], IndexRow::default());
        assert_eq!(rows[2].entry(), Some("Bee"));
    }

    #[test]
    fn test_too_few_columns_is_malformed() {
        let cells = vec![
            (0, 0, text("Entry")),
            (0, 1, text("Pages")),
            (0, 2, text("Book")),
            (1, 0, text("Ant")),
            (2, 0, text("Bee")),
        ];

        let mut rows = SheetRows::from_range(sheet(&cells));
        match rows.next() {
            Some(Err(Error::MalformedRow { row, fields })) => {
                assert_eq!(row, 2);
                assert_eq!(fields, 3);
            }
            other => panic!("expected malformed row, got {other:?}"),
        }
        assert!(rows.next().is_none());
    }

    #[test]
    fn test_range_not_starting_at_a1() {
        // Header row is empty, data starts at B3: column A stays Entry.
        let cells = vec![
            (2, 1, text("12")),
            (2, 2, text("BookA")),
            (2, 3, text("desc")),
        ];

        let rows: Vec<_> = SheetRows::from_range(sheet(&cells))
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entry, None);
        assert_eq!(rows[0].pages(), Some("12"));
        assert_eq!(rows[0].book(), Some("BookA"));
    }

    #[test]
    fn test_empty_sheet_yields_nothing() {
        let rows: Vec<_> = SheetRows::from_range(Range::empty()).collect();
        assert!(rows.is_empty());
    }
}
