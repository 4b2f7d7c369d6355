//! Read a written index document back into a [`DocumentOutline`].
//!
//! Only the WordprocessingML subset the exporter produces is understood:
//! body paragraphs (with centering and page breaks), and tables of
//! paragraphs. Formatting beyond that is ignored.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::model::{DocumentOutline, OutlineBlock};

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PART: &str = "docProps/core.xml";

/// Read the outline of the `.docx` file at `path`.
pub fn read_outline<P: AsRef<Path>>(path: P) -> Result<DocumentOutline> {
    let file = File::open(path)?;
    read_outline_from(file)
}

/// Read the outline of a `.docx` package from any seekable reader.
pub fn read_outline_from<R: Read + Seek>(reader: R) -> Result<DocumentOutline> {
    let mut archive = ZipArchive::new(reader)?;

    let document = match read_part(&mut archive, DOCUMENT_PART)? {
        Some(xml) => xml,
        None => {
            return Err(Error::InvalidDocument(format!(
                "missing {DOCUMENT_PART}"
            )));
        }
    };
    let blocks = parse_body(&document)?;

    let title = match read_part(&mut archive, CORE_PART)? {
        Some(xml) => parse_title(&xml)?,
        None => None,
    };

    Ok(DocumentOutline { title, blocks })
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut bytes = Vec::new();
    entry.read_to_end(&mut bytes)?;
    Ok(Some(String::from_utf8(bytes)?))
}

#[derive(Default)]
struct ParagraphState {
    text: String,
    centered: bool,
    page_break: bool,
}

/// Walk `word/document.xml` and collect top-level blocks.
fn parse_body(xml: &str) -> Result<Vec<OutlineBlock>> {
    let mut reader = Reader::from_str(xml);

    let mut blocks = Vec::new();
    let mut table: Option<Vec<Vec<String>>> = None;
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<Vec<String>> = None;
    let mut paragraph: Option<ParagraphState> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"tbl" => table = Some(Vec::new()),
                b"tr" => row = Some(Vec::new()),
                b"tc" => cell = Some(Vec::new()),
                b"p" => paragraph = Some(ParagraphState::default()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match local_name(e.name().as_ref()) {
                b"p" => finish_paragraph(
                    ParagraphState::default(),
                    &mut cell,
                    &mut blocks,
                ),
                b"jc" => {
                    if let Some(ref mut p) = paragraph
                        && attr_value(&e, b"val").as_deref() == Some("center")
                    {
                        p.centered = true;
                    }
                }
                b"br" => {
                    if let Some(ref mut p) = paragraph {
                        match attr_value(&e, b"type").as_deref() {
                            Some("page") => p.page_break = true,
                            Some("column") => {}
                            _ => p.text.push('\n'),
                        }
                    }
                }
                b"tab" => {
                    if let Some(ref mut p) = paragraph {
                        p.text.push('\t');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text && let Some(ref mut p) = paragraph {
                    p.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text && let Some(ref mut p) = paragraph {
                    let entity = String::from_utf8_lossy(e.as_ref());
                    if let Some(resolved) = resolve_entity(&entity) {
                        p.text.push(resolved);
                    }
                }
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(p) = paragraph.take() {
                        finish_paragraph(p, &mut cell, &mut blocks);
                    }
                }
                b"tc" => {
                    if let (Some(paragraphs), Some(cells)) = (cell.take(), row.as_mut()) {
                        cells.push(paragraphs.join("\n"));
                    }
                }
                b"tr" => {
                    if let (Some(cells), Some(rows)) = (row.take(), table.as_mut()) {
                        rows.push(cells);
                    }
                }
                b"tbl" => {
                    if let Some(rows) = table.take() {
                        blocks.push(OutlineBlock::Table { rows });
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(blocks)
}

fn finish_paragraph(
    p: ParagraphState,
    cell: &mut Option<Vec<String>>,
    blocks: &mut Vec<OutlineBlock>,
) {
    if let Some(paragraphs) = cell {
        paragraphs.push(p.text);
    } else if p.page_break && p.text.is_empty() {
        blocks.push(OutlineBlock::PageBreak);
    } else {
        blocks.push(OutlineBlock::Paragraph {
            text: p.text,
            centered: p.centered,
        });
    }
}

/// Pull `dc:title` out of the core properties part.
fn parse_title(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    let mut in_title = false;
    let mut title = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if local_name(e.name().as_ref()) == b"title" => in_title = true,
            Ok(Event::End(e)) if local_name(e.name().as_ref()) == b"title" => break,
            Ok(Event::Text(e)) if in_title => {
                title.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) if in_title => {
                if let Some(c) = resolve_entity(&String::from_utf8_lossy(e.as_ref())) {
                    title.push(c);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    Ok(if title.is_empty() { None } else { Some(title) })
}

fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == name)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Resolve a named or numeric character reference.
fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => Some('\''),
        "quot" => Some('"'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>
<w:p><w:r><w:br w:type="page"/></w:r></w:p>
<w:p><w:pPr><w:keepNext/><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t xml:space="preserve">Aa</w:t></w:r></w:p>
<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/></w:tblPr>
<w:tr><w:tc><w:p><w:r><w:t>Ants &amp; Aphids</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>Book: B</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>
</w:tbl>
<w:p/>
<w:sectPr/>
</w:body>
</w:document>"#;

    #[test]
    fn test_parse_body() {
        let blocks = parse_body(BODY).unwrap();
        assert_eq!(
            blocks,
            vec![
                OutlineBlock::PageBreak,
                OutlineBlock::Paragraph {
                    text: "Aa".to_string(),
                    centered: true,
                },
                OutlineBlock::Table {
                    rows: vec![
                        vec!["Ants & Aphids".to_string()],
                        vec!["Book: B".to_string(), String::new()],
                    ],
                },
                OutlineBlock::Paragraph {
                    text: String::new(),
                    centered: false,
                },
            ]
        );
    }

    #[test]
    fn test_line_breaks_and_tabs_in_cells() {
        let xml = r#"<w:document xmlns:w="w"><w:body><w:tbl><w:tr><w:tc><w:p><w:r><w:t>line one</w:t><w:br/><w:t>line two</w:t><w:tab/><w:t>end</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body></w:document>"#;
        let blocks = parse_body(xml).unwrap();
        assert_eq!(
            blocks,
            vec![OutlineBlock::Table {
                rows: vec![vec!["line one\nline two\tend".to_string()]],
            }]
        );
    }

    #[test]
    fn test_parse_title() {
        let xml = r#"<cp:coreProperties xmlns:cp="x" xmlns:dc="y"><dc:title>Index &amp; More</dc:title></cp:coreProperties>"#;
        assert_eq!(parse_title(xml).unwrap().as_deref(), Some("Index & More"));
        assert_eq!(parse_title("<cp:coreProperties/>").unwrap(), None);
    }

    #[test]
    fn test_resolve_entity() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("#38"), Some('&'));
        assert_eq!(resolve_entity("#x26"), Some('&'));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_missing_document_part() {
        use std::io::{Cursor, Write};
        use zip::write::SimpleFileOptions;

        let mut buf = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buf);
            zip.start_file("hello.txt", SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hi").unwrap();
            zip.finish().unwrap();
        }
        buf.set_position(0);

        match read_outline_from(buf) {
            Err(Error::InvalidDocument(msg)) => assert!(msg.contains("word/document.xml")),
            other => panic!("expected invalid document, got {other:?}"),
        }
    }
}
