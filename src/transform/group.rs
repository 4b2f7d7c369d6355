//! Letter-group boundary detection over sorted rows.

use crate::model::{IndexRow, LetterGroup};
use crate::util::{first_letter, letter_heading};

/// Tracks the current first letter while rows are visited in order.
///
/// Owned by the caller and threaded through the per-row step; there is no
/// shared "current letter".
#[derive(Debug, Clone, Default)]
pub struct GroupTracker {
    current: Option<String>,
}

/// A new letter group starts at the observed row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBoundary {
    /// Uppercase first letter, or `""` for rows without an entry.
    pub letter: String,
}

impl GroupBoundary {
    /// Divider heading text (`"Aa"`); `None` for the empty-letter group.
    pub fn heading(&self) -> Option<String> {
        letter_heading(&self.letter)
    }
}

impl GroupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visit the next row. Returns a boundary when its first letter
    /// differs from the previous row's; the first row always starts one.
    pub fn observe(&mut self, row: &IndexRow) -> Option<GroupBoundary> {
        let letter = first_letter(row.entry());
        if self.current.as_deref() == Some(letter.as_str()) {
            return None;
        }
        self.current = Some(letter.clone());
        Some(GroupBoundary { letter })
    }

    /// Letter of the group currently open, if any row has been seen.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

/// Split sorted rows into contiguous letter groups.
pub fn group_rows(rows: &[IndexRow]) -> Vec<LetterGroup> {
    let mut tracker = GroupTracker::new();
    let mut groups: Vec<LetterGroup> = Vec::new();

    for row in rows {
        if let Some(boundary) = tracker.observe(row) {
            groups.push(LetterGroup {
                letter: boundary.letter,
                rows: Vec::new(),
            });
        }
        if let Some(group) = groups.last_mut() {
            group.rows.push(row.clone());
        }
    }

    groups
}
