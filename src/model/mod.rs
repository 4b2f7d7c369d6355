//! Core data model.
//!
//! This module contains:
//! - Index rows and letter groups (the input side)
//! - The in-memory document (blocks, paragraphs, tables)
//! - A flat structural outline used for inspection and comparison

mod document;
mod outline;
mod row;

// Re-export input types
pub use row::{IndexRow, LetterGroup, page_text};

// Re-export document types
pub use document::{
    Align, Block, Border, BorderStyle, Borders, DocumentSettings, IndexDocument, PageGeometry,
    Paragraph, Run, Table, TableCell, TableRow, VAlign,
};

// Re-export outline types
pub use outline::{DocumentOutline, OutlineBlock};
