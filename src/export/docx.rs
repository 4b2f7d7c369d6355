//! DOCX exporter.
//!
//! Writes a minimal WordprocessingML package: content types, package and
//! document relationships, `styles.xml` (document defaults and the grid
//! table style), `document.xml`, and core/app properties.

use std::io::{Seek, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::model::{
    Align, Block, Border, BorderStyle, Borders, DocumentSettings, IndexDocument, Paragraph, Run,
    Table, TableCell, VAlign,
};
use crate::transform::GRID_STYLE_ID;
use crate::util::escape_xml;

use super::Exporter;

/// Configuration for DOCX export.
#[derive(Debug, Clone, Default)]
pub struct DocxConfig {
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

/// DOCX format exporter.
///
/// Output is deterministic: the same document always produces the same
/// bytes (entry timestamps are fixed).
///
/// # Example
///
/// ```no_run
/// use bookdex::model::IndexDocument;
/// use bookdex::export::{DocxExporter, Exporter};
/// use std::fs::File;
///
/// let doc = IndexDocument::default();
/// let mut file = File::create("output.docx")?;
/// DocxExporter::new().export(&doc, &mut file)?;
/// # Ok::<(), bookdex::Error>(())
/// ```
pub struct DocxExporter {
    config: DocxConfig,
}

impl DocxExporter {
    /// Create a new exporter with default configuration.
    pub fn new() -> Self {
        Self {
            config: DocxConfig::default(),
        }
    }

    /// Configure the exporter with custom settings.
    pub fn with_config(mut self, config: DocxConfig) -> Self {
        self.config = config;
        self
    }
}

impl Default for DocxExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter for DocxExporter {
    fn export<W: Write + Seek>(&self, doc: &IndexDocument, writer: &mut W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);

        let compression_level = self.config.compression_level.unwrap_or(6);
        let deflated = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(compression_level as i64))
            .last_modified_time(zip::DateTime::default());

        let parts: [(&str, String); 7] = [
            ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
            ("_rels/.rels", PACKAGE_RELS_XML.to_string()),
            ("docProps/core.xml", generate_core(&doc.settings)),
            ("docProps/app.xml", APP_XML.to_string()),
            ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
            ("word/styles.xml", generate_styles(&doc.settings)),
            ("word/document.xml", generate_document(doc)),
        ];

        for (name, content) in &parts {
            zip.start_file(*name, deflated)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()?;
        Ok(())
    }
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
</Types>
"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>
"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>
"#;

const APP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
  <Application>bookdex</Application>
</Properties>
"#;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Generate docProps/core.xml.
fn generate_core(settings: &DocumentSettings) -> String {
    let mut core = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
"#,
    );
    if let Some(ref title) = settings.title {
        core.push_str(&format!("  <dc:title>{}</dc:title>\n", escape_xml(title)));
    }
    core.push_str("  <dc:creator>bookdex</dc:creator>\n");
    core.push_str("</cp:coreProperties>\n");
    core
}

/// Generate word/styles.xml: document defaults, Normal, and the grid
/// table style.
fn generate_styles(settings: &DocumentSettings) -> String {
    let font = escape_xml(&settings.font_family);
    let size = half_points(settings.body_size_pt);
    let grid = borders_xml(&Borders::all(Border::SINGLE));

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="{W_NS}">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
  <w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/><w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>
  <w:style w:type="table" w:styleId="{GRID_STYLE_ID}"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:uiPriority w:val="59"/><w:tblPr>{grid}</w:tblPr></w:style>
</w:styles>
"#
    )
}

/// Generate word/document.xml.
fn generate_document(doc: &IndexDocument) -> String {
    let mut xml = String::new();
    xml.push_str(&format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"{W_NS}\">\n<w:body>\n"
    ));

    for block in &doc.blocks {
        match block {
            Block::PageBreak => xml.push_str("<w:p><w:r><w:br w:type=\"page\"/></w:r></w:p>\n"),
            Block::Paragraph(p) => {
                write_paragraph(&mut xml, p);
                xml.push('\n');
            }
            Block::Table(t) => write_table(&mut xml, t),
        }
    }

    // A body may not end in a table.
    if matches!(doc.blocks.last(), Some(Block::Table(_))) {
        xml.push_str("<w:p/>\n");
    }

    let page = &doc.settings.page;
    xml.push_str(&format!(
        "<w:sectPr><w:pgSz w:w=\"{}\" w:h=\"{}\"/><w:pgMar w:top=\"{}\" w:right=\"{}\" w:bottom=\"{}\" w:left=\"{}\" w:header=\"{}\" w:footer=\"{}\" w:gutter=\"0\"/></w:sectPr>\n",
        page.width,
        page.height,
        page.margin_top,
        page.margin_right,
        page.margin_bottom,
        page.margin_left,
        page.header,
        page.footer
    ));
    xml.push_str("</w:body>\n</w:document>\n");
    xml
}

fn write_paragraph(xml: &mut String, p: &Paragraph) {
    if p.runs.is_empty() && !p.keep_next && p.align == Align::Left {
        xml.push_str("<w:p/>");
        return;
    }

    xml.push_str("<w:p>");
    if p.keep_next || p.align != Align::Left {
        xml.push_str("<w:pPr>");
        if p.keep_next {
            xml.push_str("<w:keepNext/>");
        }
        if p.align == Align::Center {
            xml.push_str("<w:jc w:val=\"center\"/>");
        }
        xml.push_str("</w:pPr>");
    }
    for run in &p.runs {
        write_run(xml, run);
    }
    xml.push_str("</w:p>");
}

fn write_run(xml: &mut String, run: &Run) {
    xml.push_str("<w:r>");
    if run.bold || run.size_pt.is_some() {
        xml.push_str("<w:rPr>");
        if run.bold {
            xml.push_str("<w:b/><w:bCs/>");
        }
        if let Some(size) = run.size_pt {
            let size = half_points(size);
            xml.push_str(&format!("<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"));
        }
        xml.push_str("</w:rPr>");
    }
    write_run_text(xml, &run.text);
    xml.push_str("</w:r>");
}

/// Run text with line breaks as `<w:br/>` and tabs as `<w:tab/>`.
fn write_run_text(xml: &mut String, text: &str) {
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        for (j, segment) in line.split('\t').enumerate() {
            if j > 0 {
                xml.push_str("<w:tab/>");
            }
            if !segment.is_empty() {
                xml.push_str(&format!(
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape_xml(segment)
                ));
            }
        }
    }
}

fn write_table(xml: &mut String, table: &Table) {
    let total: u32 = table.columns.iter().sum();

    xml.push_str("<w:tbl><w:tblPr>");
    xml.push_str(&format!(
        "<w:tblStyle w:val=\"{}\"/><w:tblW w:w=\"{total}\" w:type=\"dxa\"/>",
        escape_xml(&table.style_id)
    ));
    if let Some(ref borders) = table.borders {
        xml.push_str(&borders_xml(borders));
    }
    xml.push_str("<w:tblLayout w:type=\"fixed\"/>");
    xml.push_str(
        "<w:tblLook w:val=\"04A0\" w:firstRow=\"1\" w:lastRow=\"0\" w:firstColumn=\"1\" w:lastColumn=\"0\" w:noHBand=\"0\" w:noVBand=\"1\"/>",
    );
    xml.push_str("</w:tblPr><w:tblGrid>");
    for width in &table.columns {
        xml.push_str(&format!("<w:gridCol w:w=\"{width}\"/>"));
    }
    xml.push_str("</w:tblGrid>\n");

    for row in &table.rows {
        xml.push_str("<w:tr>");
        if table.cant_split {
            xml.push_str("<w:trPr><w:cantSplit/></w:trPr>");
        }
        let mut column = 0;
        for cell in &row.cells {
            let span = usize::from(cell.grid_span.max(1));
            let width: u32 = table.columns.iter().skip(column).take(span).sum();
            write_cell(xml, cell, width);
            column += span;
        }
        xml.push_str("</w:tr>\n");
    }
    xml.push_str("</w:tbl>\n");
}

fn write_cell(xml: &mut String, cell: &TableCell, width: u32) {
    xml.push_str("<w:tc><w:tcPr>");
    xml.push_str(&format!("<w:tcW w:w=\"{width}\" w:type=\"dxa\"/>"));
    if cell.grid_span > 1 {
        xml.push_str(&format!("<w:gridSpan w:val=\"{}\"/>", cell.grid_span));
    }
    if let Some(align) = cell.v_align {
        let val = match align {
            VAlign::Top => "top",
            VAlign::Center => "center",
            VAlign::Bottom => "bottom",
        };
        xml.push_str(&format!("<w:vAlign w:val=\"{val}\"/>"));
    }
    xml.push_str("</w:tcPr>");

    if cell.paragraphs.is_empty() {
        // Every cell needs at least one paragraph.
        xml.push_str("<w:p/>");
    }
    for p in &cell.paragraphs {
        write_paragraph(xml, p);
    }
    xml.push_str("</w:tc>");
}

fn borders_xml(borders: &Borders) -> String {
    let mut xml = String::from("<w:tblBorders>");
    for (name, border) in [
        ("top", &borders.top),
        ("left", &borders.left),
        ("bottom", &borders.bottom),
        ("right", &borders.right),
        ("insideH", &borders.inside_h),
        ("insideV", &borders.inside_v),
    ] {
        match border.style {
            BorderStyle::None => xml.push_str(&format!("<w:{name} w:val=\"nil\"/>")),
            BorderStyle::Single => xml.push_str(&format!(
                "<w:{name} w:val=\"single\" w:sz=\"{}\" w:space=\"0\" w:color=\"auto\"/>",
                border.size
            )),
        }
    }
    xml.push_str("</w:tblBorders>");
    xml
}

/// Font size in the half-point units WordprocessingML uses.
fn half_points(size_pt: f32) -> u32 {
    (size_pt * 2.0).round().max(1.0) as u32
}
