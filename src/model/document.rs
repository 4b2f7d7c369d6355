//! In-memory word-processing document.
//!
//! A deliberately small block model: page breaks, paragraphs of runs, and
//! tables of cells. It carries exactly what the index layout needs and
//! what the DOCX exporter knows how to write.

/// Page size and reserved space, in twips (1/20 pt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: u32,
    pub height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    /// Space kept free for the page header.
    pub header: u32,
    /// Space kept free for the page footer.
    pub footer: u32,
}

impl PageGeometry {
    /// US Letter, 1" margins, 0.5" header and footer.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 12_240,
        height: 15_840,
        margin_top: 1_440,
        margin_bottom: 1_440,
        margin_left: 1_440,
        margin_right: 1_440,
        header: 720,
        footer: 720,
    };

    /// ISO A4, 1" margins, 0.5" header and footer.
    pub const A4: PageGeometry = PageGeometry {
        width: 11_906,
        height: 16_838,
        ..PageGeometry::LETTER
    };

    /// Width available to body text.
    pub fn text_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }

    /// Height available to body content on an empty page.
    pub fn text_height(&self) -> u32 {
        self.height
            .saturating_sub(self.margin_top)
            .saturating_sub(self.margin_bottom)
            .saturating_sub(self.header)
            .saturating_sub(self.footer)
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry::LETTER
    }
}

/// Document-wide defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSettings {
    pub font_family: String,
    pub body_size_pt: f32,
    pub page: PageGeometry,
    /// Written to the package core properties when set.
    pub title: Option<String>,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            body_size_pt: 11.0,
            page: PageGeometry::default(),
            title: None,
        }
    }
}

/// A complete document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexDocument {
    pub settings: DocumentSettings,
    pub blocks: Vec<Block>,
}

impl IndexDocument {
    pub fn new(settings: DocumentSettings) -> Self {
        Self {
            settings,
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// All tables, in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Text of every centered paragraph (the letter-group headings).
    pub fn headings(&self) -> Vec<String> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) if p.align == Align::Center => Some(p.text()),
                _ => None,
            })
            .collect()
    }

    /// Number of explicit page breaks.
    pub fn page_breaks(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::PageBreak))
            .count()
    }
}

/// Top-level document content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    PageBreak,
    Paragraph(Paragraph),
    Table(Table),
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// Vertical alignment of a table cell's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A paragraph: a sequence of runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Align,
    /// Keep this paragraph on the same page as the next one.
    pub keep_next: bool,
}

impl Paragraph {
    /// An empty paragraph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A paragraph with a single run.
    pub fn with_run(run: Run) -> Self {
        Self {
            runs: vec![run],
            ..Default::default()
        }
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }
}

/// A span of text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    /// Font size in points; `None` uses the document default.
    pub size_pt: Option<f32>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, size_pt: f32) -> Self {
        self.size_pt = Some(size_pt);
        self
    }
}

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    None,
    Single,
}

/// One border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    /// Line width in eighths of a point.
    pub size: u8,
}

impl Border {
    /// Thin single line (1/2 pt), the grid default.
    pub const SINGLE: Border = Border {
        style: BorderStyle::Single,
        size: 4,
    };
}

/// Borders around and inside a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Borders {
    pub top: Border,
    pub left: Border,
    pub bottom: Border,
    pub right: Border,
    pub inside_h: Border,
    pub inside_v: Border,
}

impl Borders {
    /// The same line on every edge, inside lines included.
    pub fn all(border: Border) -> Self {
        Self {
            top: border,
            left: border,
            bottom: border,
            right: border,
            inside_h: border,
            inside_v: border,
        }
    }
}

/// A table with a fixed column grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Table style id, e.g. `"TableGrid"`.
    pub style_id: String,
    /// Column widths in twips.
    pub columns: Vec<u32>,
    pub rows: Vec<TableRow>,
    pub borders: Option<Borders>,
    /// Rows may not break across pages.
    pub cant_split: bool,
}

impl Table {
    /// Create an empty table over the given column grid.
    pub fn new(style_id: impl Into<String>, columns: Vec<u32>) -> Self {
        Self {
            style_id: style_id.into(),
            columns,
            rows: Vec::new(),
            borders: None,
            cant_split: false,
        }
    }

    /// Number of grid columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Cells of every row, in order.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().flat_map(|r| r.cells.iter())
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.rows.iter_mut().flat_map(|r| r.cells.iter_mut())
    }

    /// Cell text, row by row.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(TableCell::text).collect())
            .collect()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }
}

/// A table cell, possibly spanning several grid columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    /// Number of grid columns covered.
    pub grid_span: u16,
    pub v_align: Option<VAlign>,
}

impl TableCell {
    /// A cell holding one paragraph.
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
            grid_span: 1,
            v_align: None,
        }
    }

    /// A cell with no text. Still holds one (empty) paragraph, as every
    /// WordprocessingML cell must.
    pub fn empty() -> Self {
        Self::new(Paragraph::empty())
    }

    pub fn spanning(mut self, columns: u16) -> Self {
        self.grid_span = columns;
        self
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.paragraphs.iter().flat_map(|p| p.runs.iter())
    }
}
