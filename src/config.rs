//! Run configuration.
//!
//! Plain structs with defaults and builder-style setters. The CLI fills
//! them from its arguments; library callers build them directly.

use std::path::PathBuf;

use crate::model::{DocumentSettings, PageGeometry};

/// Sheet read when none is given.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// How an index entry is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum TableLayout {
    /// Entry table (entry, optional description) followed by a separate
    /// two-column detail table (book, pages).
    #[default]
    Split,
    /// One three-column table: entry | pages | book, with the description
    /// merged across the row below.
    Combined,
}

/// Rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub layout: TableLayout,
    /// Start each first letter on a new page under an "Aa" heading.
    pub grouping: bool,
    pub font_family: String,
    pub body_size_pt: f32,
    /// Entry headword size.
    pub entry_size_pt: f32,
    /// Letter-group heading size.
    pub heading_size_pt: f32,
    pub page: PageGeometry,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: TableLayout::Split,
            grouping: true,
            font_family: "Calibri".to_string(),
            body_size_pt: 11.0,
            entry_size_pt: 12.0,
            heading_size_pt: 26.0,
            page: PageGeometry::LETTER,
        }
    }
}

impl RenderConfig {
    /// Document-wide settings implied by these options.
    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            font_family: self.font_family.clone(),
            body_size_pt: self.body_size_pt,
            page: self.page,
            title: None,
        }
    }
}

/// Everything one run needs: where to read, where to write, how to render.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexConfig {
    pub input_path: PathBuf,
    pub sheet_name: String,
    pub output_path: PathBuf,
    pub render: RenderConfig,
}

impl IndexConfig {
    /// Configuration with default sheet name and rendering.
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            output_path: output_path.into(),
            render: RenderConfig::default(),
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.render.layout = layout;
        self
    }

    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.render.grouping = grouping;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.render.font_family = font_family.into();
        self
    }

    pub fn with_page(mut self, page: PageGeometry) -> Self {
        self.render.page = page;
        self
    }

    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}
