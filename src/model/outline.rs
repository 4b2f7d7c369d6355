//! Structural outline of an index document.
//!
//! Flattens a document into page breaks, paragraph text and table cell
//! text. Built either from an in-memory [`IndexDocument`] or by reading a
//! written `.docx` back (see [`crate::import::read_outline`]), so the two
//! can be compared.

use super::document::{Align, Block, IndexDocument};

/// A document's content as plain structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct DocumentOutline {
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub title: Option<String>,
    pub blocks: Vec<OutlineBlock>,
}

/// An atomic outline block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum OutlineBlock {
    PageBreak,
    Paragraph {
        text: String,
        #[cfg_attr(feature = "cli", serde(skip_serializing_if = "std::ops::Not::not"))]
        centered: bool,
    },
    Table {
        rows: Vec<Vec<String>>,
    },
}

impl DocumentOutline {
    /// Number of tables.
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, OutlineBlock::Table { .. }))
            .count()
    }

    /// Text of centered paragraphs, in order.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                OutlineBlock::Paragraph {
                    text,
                    centered: true,
                } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render as indented plain text, one block per line.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        if let Some(ref title) = self.title {
            out.push_str(&format!("Title: {title}\n"));
        }
        for block in &self.blocks {
            match block {
                OutlineBlock::PageBreak => out.push_str("--- page break ---\n"),
                OutlineBlock::Paragraph { text, centered } => {
                    if *centered {
                        out.push_str(&format!("== {text} ==\n"));
                    } else if !text.is_empty() {
                        out.push_str(&format!("{text}\n"));
                    }
                }
                OutlineBlock::Table { rows } => {
                    for row in rows {
                        out.push_str(&format!("| {} |\n", row.join(" | ")));
                    }
                }
            }
        }
        out
    }
}

impl From<&IndexDocument> for DocumentOutline {
    fn from(doc: &IndexDocument) -> Self {
        let blocks = doc
            .blocks
            .iter()
            .map(|block| match block {
                Block::PageBreak => OutlineBlock::PageBreak,
                Block::Paragraph(p) => OutlineBlock::Paragraph {
                    text: p.text(),
                    centered: p.align == Align::Center,
                },
                Block::Table(t) => OutlineBlock::Table { rows: t.text_rows() },
            })
            .collect();

        Self {
            title: doc.settings.title.clone(),
            blocks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::{Paragraph, Run, Table, TableCell, TableRow};

    #[test]
    fn test_outline_from_document() {
        let mut doc = IndexDocument::default();
        doc.push(Block::PageBreak);
        doc.push(Block::Paragraph(
            Paragraph::with_run(Run::new("Aa")).centered(),
        ));
        let mut table = Table::new("TableGrid", vec![100]);
        table
            .rows
            .push(TableRow::new(vec![TableCell::new(Paragraph::with_run(
                Run::new("Ant"),
            ))]));
        doc.push(Block::Table(table));
        doc.push(Block::Paragraph(Paragraph::empty()));

        let outline = DocumentOutline::from(&doc);
        assert_eq!(outline.table_count(), 1);
        assert_eq!(outline.headings(), vec!["Aa"]);
        assert_eq!(
            outline.to_text(),
            "--- page break ---\n== Aa ==\n| Ant |\n"
        );
    }
}
