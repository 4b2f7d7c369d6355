//! Index row → document tables.

use crate::config::{RenderConfig, TableLayout};
use crate::model::{Block, IndexRow, Paragraph, Run, Table, TableCell, TableRow, VAlign};

use super::paginate::{estimate_paragraph_height, estimate_table_height};
use super::style::{GRID_STYLE_ID, TableStyler, apply_grid_style};

/// Everything emitted for one index row.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    /// Entry table: headword, optional description. In the combined
    /// layout it also holds the book and page cells.
    pub primary: Table,
    /// Book / page table (split layout only).
    pub detail: Option<Table>,
    /// Empty paragraph separating this entry from the next.
    pub trailer: Paragraph,
}

impl RenderedEntry {
    /// Estimated height of all emitted content, in twips.
    pub fn estimated_height(&self, body_size_pt: f32) -> u32 {
        estimate_table_height(&self.primary, body_size_pt)
            + self
                .detail
                .as_ref()
                .map_or(0, |t| estimate_table_height(t, body_size_pt))
            + estimate_paragraph_height(&self.trailer, body_size_pt)
    }

    /// Document blocks in output order.
    pub fn into_blocks(self) -> Vec<Block> {
        let mut blocks = vec![Block::Table(self.primary)];
        if let Some(detail) = self.detail {
            blocks.push(Block::Table(detail));
        }
        blocks.push(Block::Paragraph(self.trailer));
        blocks
    }
}

/// Render one row with the configured layout.
pub fn render_entry(row: &IndexRow, config: &RenderConfig) -> RenderedEntry {
    match config.layout {
        TableLayout::Split => render_split(row, config),
        TableLayout::Combined => render_combined(row, config),
    }
}

/// Centered, bold letter-group heading that stays with the first entry.
pub fn render_heading(text: &str, config: &RenderConfig) -> Paragraph {
    let mut heading =
        Paragraph::with_run(Run::new(text).bold().size(config.heading_size_pt)).centered();
    heading.keep_next = true;
    heading
}

fn render_split(row: &IndexRow, config: &RenderConfig) -> RenderedEntry {
    let width = config.page.text_width();
    let left = width * 3 / 5;
    let columns = vec![left, width - left];

    let mut primary = Table::new(GRID_STYLE_ID, columns.clone());
    primary
        .rows
        .push(TableRow::new(vec![entry_cell(row, config).spanning(2)]));
    if let Some(cell) = description_cell(row) {
        primary.rows.push(TableRow::new(vec![cell.spanning(2)]));
    }
    apply_grid_style(&mut primary);

    let mut detail = Table::new(GRID_STYLE_ID, columns);
    detail.rows.push(TableRow::new(vec![
        text_cell(row.book_text(), true),
        text_cell(row.page_text(), true),
    ]));
    apply_grid_style(&mut detail);
    detail.set_vertical_alignment(0, 0, VAlign::Center);
    detail.set_vertical_alignment(0, 1, VAlign::Center);

    RenderedEntry {
        primary,
        detail: Some(detail),
        trailer: Paragraph::empty(),
    }
}

fn render_combined(row: &IndexRow, config: &RenderConfig) -> RenderedEntry {
    let width = config.page.text_width();
    let side = width / 5;
    let columns = vec![width - 2 * side, side, side];

    let mut table = Table::new(GRID_STYLE_ID, columns);
    table.rows.push(TableRow::new(vec![
        entry_cell(row, config),
        text_cell(row.page_text(), false),
        text_cell(row.book_text(), false),
    ]));
    if let Some(cell) = description_cell(row) {
        table.rows.push(TableRow::new(vec![cell.spanning(3)]));
    }
    apply_grid_style(&mut table);
    table.set_vertical_alignment(0, 1, VAlign::Center);
    table.set_vertical_alignment(0, 2, VAlign::Center);

    RenderedEntry {
        primary: table,
        detail: None,
        trailer: Paragraph::empty(),
    }
}

fn entry_cell(row: &IndexRow, config: &RenderConfig) -> TableCell {
    match row.entry() {
        Some(entry) => TableCell::new(Paragraph::with_run(
            Run::new(entry).bold().size(config.entry_size_pt),
        )),
        None => TableCell::empty(),
    }
}

fn description_cell(row: &IndexRow) -> Option<TableCell> {
    row.description()
        .map(|d| TableCell::new(Paragraph::with_run(Run::new(d))))
}

fn text_cell(text: Option<String>, bold: bool) -> TableCell {
    match text {
        Some(text) => {
            let run = Run::new(text);
            TableCell::new(Paragraph::with_run(if bold { run.bold() } else { run }))
        }
        None => TableCell::empty(),
    }
}
