//! Case-insensitive, stable ordering of index rows.

use crate::model::IndexRow;
use crate::util::sort_key;

/// Sort rows by casefolded entry. Rows without an entry come first; rows
/// with equal keys keep their input order.
pub fn sort_rows(mut rows: Vec<IndexRow>) -> Vec<IndexRow> {
    // sort_by_cached_key is stable and folds each entry once.
    rows.sort_by_cached_key(|row| sort_key(row.entry()));
    rows
}
