//! Page-break avoidance.
//!
//! The estimate is deliberately rough: the height of a table is taken to
//! be the sum of the font sizes of every run in every cell. Wrapping,
//! column widths, cell padding and empty cells are not considered.

use crate::model::{PageGeometry, Paragraph, Table};

/// Twips per typographic point.
pub const TWIPS_PER_POINT: f32 = 20.0;

pub fn points_to_twips(points: f32) -> u32 {
    (points * TWIPS_PER_POINT).round().max(0.0) as u32
}

/// Estimated rendered height of a table, in twips.
///
/// Runs without an explicit size count at `body_size_pt`.
pub fn estimate_table_height(table: &Table, body_size_pt: f32) -> u32 {
    let points: f32 = table
        .cells()
        .flat_map(|cell| cell.runs())
        .map(|run| run.size_pt.unwrap_or(body_size_pt))
        .sum();
    points_to_twips(points)
}

/// Estimated height of a body paragraph: its largest run, or one body
/// line when it has no runs.
pub fn estimate_paragraph_height(paragraph: &Paragraph, body_size_pt: f32) -> u32 {
    let points = paragraph
        .runs
        .iter()
        .map(|run| run.size_pt.unwrap_or(body_size_pt))
        .fold(body_size_pt, f32::max);
    points_to_twips(points)
}

/// Space left on the current page.
///
/// `consumed` only grows until [`PageBudget::reset`] is called at a page
/// break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBudget {
    available: u32,
    consumed: u32,
    entries: usize,
}

/// What to do with content about to be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Fits in the remaining space.
    Fits,
    /// Does not fit; start a new page first.
    BreakBefore,
    /// Does not fit even on an empty page. Placed where it is.
    Oversized,
}

impl PageBudget {
    pub fn new(page: &PageGeometry) -> Self {
        Self {
            available: page.text_height(),
            consumed: 0,
            entries: 0,
        }
    }

    /// Body height of an empty page.
    pub fn available(&self) -> u32 {
        self.available
    }

    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    pub fn remaining(&self) -> u32 {
        self.available.saturating_sub(self.consumed)
    }

    /// True until the first entry is placed on this page. Headings do not
    /// count: breaking between a heading and its first entry would strand
    /// the heading.
    pub fn is_fresh(&self) -> bool {
        self.entries == 0
    }

    /// Decide where an entry whose first table is `height` twips tall goes.
    pub fn place(&self, height: u32) -> Placement {
        if height <= self.remaining() {
            Placement::Fits
        } else if self.is_fresh() {
            Placement::Oversized
        } else {
            Placement::BreakBefore
        }
    }

    /// Account for a heading or other non-entry content.
    pub fn consume(&mut self, height: u32) {
        self.consumed = self.consumed.saturating_add(height);
    }

    /// Account for a placed entry.
    pub fn consume_entry(&mut self, height: u32) {
        self.consume(height);
        self.entries += 1;
    }

    /// Start a new page.
    pub fn reset(&mut self) {
        self.consumed = 0;
        self.entries = 0;
    }
}
