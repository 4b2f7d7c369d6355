//! Export module for writing index documents.
//!
//! Provides the `Exporter` trait, the DOCX implementation, and
//! [`export_to_path`], which writes through a temporary file so a failed
//! run never leaves a partial document at the destination.
//!
//! # Example
//!
//! ```no_run
//! use bookdex::IndexRow;
//! use bookdex::config::RenderConfig;
//! use bookdex::export::{DocxExporter, export_to_path};
//! use bookdex::transform::build_document;
//!
//! let rows = vec![IndexRow::new("Ant").with_pages("12").with_book("Insects")];
//! let doc = build_document(rows, &RenderConfig::default());
//! export_to_path(&DocxExporter::new(), &doc, "index.docx")?;
//! # Ok::<(), bookdex::Error>(())
//! ```

use std::io::{Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::Result;
use crate::model::IndexDocument;

mod docx;

pub use docx::{DocxConfig, DocxExporter};

/// Trait for exporting documents to specific formats.
///
/// Exporters use a builder pattern where configuration is held in the struct,
/// and the `export` method writes to any `Write + Seek` destination.
pub trait Exporter {
    /// Export the document to the provided writer.
    ///
    /// The writer can be:
    /// - `std::fs::File` for disk output
    /// - `std::io::Cursor<Vec<u8>>` for seekable in-memory output
    /// - Any other type implementing `Write + Seek`
    fn export<W: Write + Seek>(&self, doc: &IndexDocument, writer: &mut W) -> Result<()>;
}

/// Export `doc` to `path` atomically.
///
/// The package is written to a temporary file next to `path`, flushed,
/// and renamed over `path` only on success. On error the temporary file
/// is removed and `path` is left as it was.
pub fn export_to_path<E: Exporter, P: AsRef<Path>>(
    exporter: &E,
    doc: &IndexDocument,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    exporter.export(doc, tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;

    info!(path = %path.display(), blocks = doc.blocks.len(), "wrote document");
    Ok(())
}
