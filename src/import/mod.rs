//! Readers.
//!
//! - `xlsx`: the index spreadsheet, as a lazy sequence of [`IndexRow`]s
//! - `docx`: a written index document, as a [`DocumentOutline`]
//!
//! [`IndexRow`]: crate::model::IndexRow
//! [`DocumentOutline`]: crate::model::DocumentOutline

mod docx;
mod xlsx;

pub use docx::{read_outline, read_outline_from};
pub use xlsx::{INDEX_COLUMNS, SheetRows, open_sheet, read_rows};
