//! Table styling seam.
//!
//! The renderer styles tables only through [`TableStyler`], so it never
//! touches a particular document object model directly. The in-memory
//! [`Table`] implements it; the DOCX exporter turns the result into
//! `tblBorders`, `cantSplit`, `keepNext` and `vAlign` markup.

use crate::model::{Border, Borders, Table, VAlign};

/// Style id of the bordered grid table style written to `styles.xml`.
pub const GRID_STYLE_ID: &str = "TableGrid";

/// Styling capabilities the renderer needs from a table.
pub trait TableStyler {
    /// Set the table's outer and inner borders.
    fn set_borders(&mut self, borders: Borders);

    /// Keep the table together: rows may not break across pages, and
    /// each contained paragraph stays with the next.
    fn prevent_page_split(&mut self);

    /// Vertically align the content of one cell. Out-of-range positions
    /// are ignored.
    fn set_vertical_alignment(&mut self, row: usize, cell: usize, align: VAlign);
}

impl TableStyler for Table {
    fn set_borders(&mut self, borders: Borders) {
        self.borders = Some(borders);
    }

    fn prevent_page_split(&mut self) {
        self.cant_split = true;
        for cell in self.cells_mut() {
            for paragraph in &mut cell.paragraphs {
                paragraph.keep_next = true;
            }
        }
    }

    fn set_vertical_alignment(&mut self, row: usize, cell: usize, align: VAlign) {
        if let Some(c) = self.rows.get_mut(row).and_then(|r| r.cells.get_mut(cell)) {
            c.v_align = Some(align);
        }
    }
}

/// Single-line borders on every edge, kept together across pages.
pub fn apply_grid_style<S: TableStyler>(table: &mut S) {
    table.set_borders(Borders::all(Border::SINGLE));
    table.prevent_page_split();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BorderStyle, Paragraph, Run, TableCell, TableRow};

    fn two_by_two() -> Table {
        let mut table = Table::new(GRID_STYLE_ID, vec![100, 100]);
        for _ in 0..2 {
            table.rows.push(TableRow::new(vec![
                TableCell::new(Paragraph::with_run(Run::new("x"))),
                TableCell::empty(),
            ]));
        }
        table
    }

    #[test]
    fn test_grid_style() {
        let mut table = two_by_two();
        apply_grid_style(&mut table);

        let borders = table.borders.unwrap();
        assert_eq!(borders.top.style, BorderStyle::Single);
        assert_eq!(borders.right, Border::SINGLE);
        assert!(table.cant_split);
        assert!(
            table
                .cells()
                .flat_map(|c| c.paragraphs.iter())
                .all(|p| p.keep_next)
        );
    }

    #[test]
    fn test_vertical_alignment_targets_one_cell() {
        let mut table = two_by_two();
        table.set_vertical_alignment(1, 0, VAlign::Center);
        table.set_vertical_alignment(5, 5, VAlign::Center);

        assert_eq!(table.rows[1].cells[0].v_align, Some(VAlign::Center));
        assert_eq!(table.rows[0].cells[0].v_align, None);
        assert_eq!(table.rows[1].cells[1].v_align, None);
    }
}
