//! # bookdex
//!
//! Turns a book-index spreadsheet into a formatted Word document.
//!
//! ## Features
//!
//! - Read index rows (Entry, Pages, Book, Description) from an `.xlsx` sheet
//! - Sort entries case-insensitively and group them by first letter
//! - Render each entry as bordered, non-splittable tables
//! - Insert page breaks before entries that would not fit the page
//! - Write a deterministic `.docx`, atomically
//! - Read a written index back as a [`DocumentOutline`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookdex::{IndexConfig, generate_index};
//!
//! let report = generate_index(&IndexConfig::new("Index.xlsx", "Index.docx"))?;
//! println!("{} entries in {} groups", report.rows, report.groups);
//! # Ok::<(), bookdex::Error>(())
//! ```
//!
//! ## Working with Rows
//!
//! The pipeline stages are usable on their own:
//!
//! ```
//! use bookdex::IndexRow;
//! use bookdex::config::RenderConfig;
//! use bookdex::transform::build_document;
//!
//! let rows = vec![
//!     IndexRow::new("Zebra").with_pages("5").with_book("BookA"),
//!     IndexRow::new("apple").with_pages("1,2").with_book("BookB"),
//! ];
//! let doc = build_document(rows, &RenderConfig::default());
//! assert_eq!(doc.headings(), vec!["Aa", "Zz"]);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod transform;
pub(crate) mod util;

use std::path::PathBuf;

use tracing::info;

pub use config::{IndexConfig, RenderConfig, TableLayout};
pub use error::{Error, ErrorKind, Result};
pub use export::{DocxExporter, Exporter, export_to_path};
pub use import::{read_outline, read_rows};
pub use model::{DocumentOutline, IndexDocument, IndexRow};

/// Summary of one [`generate_index`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct IndexReport {
    /// Data rows read, blank rows included (header excluded).
    pub rows: usize,
    /// Letter groups emitted, counting the heading-less group of rows
    /// without an entry (0 when grouping is off).
    pub groups: usize,
    pub tables: usize,
    pub page_breaks: usize,
    pub output: PathBuf,
}

/// Read the configured sheet, build the index document and write it.
///
/// The destination is replaced only when the whole document was written.
pub fn generate_index(config: &IndexConfig) -> Result<IndexReport> {
    let rows = transform::sort_rows(read_rows(&config.input_path, &config.sheet_name)?);
    let row_count = rows.len();
    let groups = if config.render.grouping {
        transform::group_rows(&rows).len()
    } else {
        0
    };

    let mut doc = transform::build_document(rows, &config.render);
    doc.settings.title = config
        .input_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned());

    export_to_path(&DocxExporter::new(), &doc, &config.output_path)?;

    let report = IndexReport {
        rows: row_count,
        groups,
        tables: doc.tables().count(),
        page_breaks: doc.page_breaks(),
        output: config.output_path.clone(),
    };
    info!(
        rows = report.rows,
        groups = report.groups,
        page_breaks = report.page_breaks,
        "index generated"
    );
    Ok(report)
}
