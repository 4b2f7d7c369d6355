//! Rows → document.
//!
//! - `sort`: case-insensitive stable ordering
//! - `group`: letter-group boundaries
//! - `render`: per-row tables
//! - `paginate`: page-break avoidance
//! - `style`: the table styling seam
//!
//! [`build_document`] runs them as a single fold over the sorted rows. The
//! fold state (current letter, page budget) is an explicit value passed
//! from row to row.

mod group;
mod paginate;
mod render;
mod sort;
mod style;

pub use group::{GroupBoundary, GroupTracker, group_rows};
pub use paginate::{
    PageBudget, Placement, TWIPS_PER_POINT, estimate_paragraph_height, estimate_table_height,
    points_to_twips,
};
pub use render::{RenderedEntry, render_entry, render_heading};
pub use sort::sort_rows;
pub use style::{GRID_STYLE_ID, TableStyler, apply_grid_style};

use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::model::{Block, IndexDocument, IndexRow};

/// State carried from one row to the next.
#[derive(Debug, Clone)]
struct PipelineState {
    tracker: GroupTracker,
    budget: PageBudget,
}

impl PipelineState {
    fn new(config: &RenderConfig) -> Self {
        Self {
            tracker: GroupTracker::new(),
            budget: PageBudget::new(&config.page),
        }
    }

    fn page_break(&mut self, doc: &mut IndexDocument) {
        doc.push(Block::PageBreak);
        self.budget.reset();
    }

    /// Emit one row (and the group heading it opens, if any).
    fn place(mut self, row: &IndexRow, config: &RenderConfig, doc: &mut IndexDocument) -> Self {
        if config.grouping
            && let Some(boundary) = self.tracker.observe(row)
        {
            debug!(letter = %boundary.letter, "letter group");
            self.page_break(doc);
            if let Some(text) = boundary.heading() {
                let heading = render_heading(&text, config);
                self.budget
                    .consume(estimate_paragraph_height(&heading, config.body_size_pt));
                doc.push(Block::Paragraph(heading));
            }
        }

        let entry = render_entry(row, config);
        let primary_height = estimate_table_height(&entry.primary, config.body_size_pt);
        match self.budget.place(primary_height) {
            Placement::Fits => {}
            Placement::BreakBefore => {
                debug!(
                    entry = row.entry().unwrap_or_default(),
                    height = primary_height,
                    remaining = self.budget.remaining(),
                    "page break before entry"
                );
                self.page_break(doc);
            }
            Placement::Oversized => {
                warn!(
                    entry = row.entry().unwrap_or_default(),
                    height = primary_height,
                    available = self.budget.available(),
                    "entry is taller than a page"
                );
            }
        }

        self.budget
            .consume_entry(entry.estimated_height(config.body_size_pt));
        doc.blocks.extend(entry.into_blocks());
        self
    }
}

/// Sort, group, render and paginate `rows` into a document.
pub fn build_document(rows: Vec<IndexRow>, config: &RenderConfig) -> IndexDocument {
    let sorted = sort_rows(rows);
    let mut doc = IndexDocument::new(config.document_settings());

    sorted
        .iter()
        .fold(PipelineState::new(config), |state, row| {
            state.place(row, config, &mut doc)
        });

    debug!(
        rows = sorted.len(),
        blocks = doc.blocks.len(),
        page_breaks = doc.page_breaks(),
        "document built"
    );
    doc
}
