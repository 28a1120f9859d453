//! Section table extraction from PPTX files.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slides_core::{Error, Result, Section, SectionTable};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Path of the presentation part inside the archive.
const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Reads section metadata from PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Read the section table of a PPTX file.
    ///
    /// Decks without sections yield an empty table.
    pub fn read_sections<R: Read + Seek>(&self, reader: R) -> Result<SectionTable> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let content = self.read_file_from_archive(&mut archive, PRESENTATION_PART)?;
        let table = parse_sections(&content)?;
        log::debug!("Found {} sections", table.len());
        Ok(table)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A `<p14:section>` before its slide ids are mapped to deck positions.
#[derive(Debug, Default)]
struct RawSection {
    name: String,
    slide_ids: Vec<String>,
}

/// Parse the section list out of `ppt/presentation.xml`.
///
/// Slide order comes from the top-level `sldIdLst`; each section lists the
/// ids of its slides in the `p14:sectionLst` extension.
fn parse_sections(xml: &str) -> Result<SectionTable> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut deck_order: Vec<String> = Vec::new();
    let mut raw_sections: Vec<RawSection> = Vec::new();
    let mut current: Option<RawSection> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"section" => {
                current = Some(RawSection {
                    name: attribute(e, b"name")?.unwrap_or_default(),
                    slide_ids: Vec::new(),
                });
            }
            Ok(Event::Empty(ref e)) if local_name(e.name().as_ref()) == b"section" => {
                raw_sections.push(RawSection {
                    name: attribute(e, b"name")?.unwrap_or_default(),
                    slide_ids: Vec::new(),
                });
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"section" => {
                if let Some(section) = current.take() {
                    raw_sections.push(section);
                }
            }
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                if let Some(id) = attribute(e, b"id")? {
                    match current.as_mut() {
                        Some(section) => section.slide_ids.push(id),
                        None => deck_order.push(id),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(place_sections(&deck_order, raw_sections))
}

/// Map each section's slide ids onto 1-based deck positions.
///
/// An empty section starts right after the previous one.
fn place_sections(deck_order: &[String], raw_sections: Vec<RawSection>) -> SectionTable {
    let mut table = SectionTable::new();
    let mut next_slide: u32 = 1;

    for raw in raw_sections {
        let positions: Vec<u32> = raw
            .slide_ids
            .iter()
            .filter_map(|id| match deck_order.iter().position(|d| d == id) {
                Some(pos) => Some(pos as u32 + 1),
                None => {
                    log::warn!("Section {:?} refers to unknown slide id {}", raw.name, id);
                    None
                }
            })
            .collect();

        let first_slide = positions.iter().copied().min().unwrap_or(next_slide);
        let slide_count = positions.len() as u32;
        next_slide = first_slide + slide_count;

        table.push(Section::new(raw.name, first_slide, slide_count));
    }

    table
}

/// Read an attribute by local name, unescaping its value.
fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes().flatten() {
        if local_name(attr.key.as_ref()) == name {
            let value = attr
                .unescape_value()
                .map_err(|e| Error::XmlError(format!("Invalid attribute value: {}", e)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    const WITH_SECTIONS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <p:sldIdLst>
    <p:sldId id="256" r:id="rId2"/>
    <p:sldId id="257" r:id="rId3"/>
    <p:sldId id="258" r:id="rId4"/>
    <p:sldId id="259" r:id="rId5"/>
    <p:sldId id="260" r:id="rId6"/>
  </p:sldIdLst>
  <p:sldSz cx="12192000" cy="6858000"/>
  <p:extLst>
    <p:ext uri="{521415D9-36F7-43E2-AB2F-B90AF26B5E84}">
      <p14:sectionLst xmlns:p14="http://schemas.microsoft.com/office/powerpoint/2010/main">
        <p14:section name="Intro &amp; Welcome" id="{A1}">
          <p14:sldIdLst>
            <p14:sldId id="256"/>
            <p14:sldId id="257"/>
          </p14:sldIdLst>
        </p14:section>
        <p14:section name="Empty" id="{A2}">
          <p14:sldIdLst/>
        </p14:section>
        <p14:section name="Body" id="{A3}">
          <p14:sldIdLst>
            <p14:sldId id="258"/>
            <p14:sldId id="259"/>
            <p14:sldId id="260"/>
          </p14:sldIdLst>
        </p14:section>
      </p14:sectionLst>
    </p:ext>
  </p:extLst>
</p:presentation>"#;

    const WITHOUT_SECTIONS: &str = r#"<p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">
  <p:sldIdLst><p:sldId id="256"/><p:sldId id="257"/></p:sldIdLst>
</p:presentation>"#;

    fn pptx_with(presentation_xml: &str) -> Cursor<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(PRESENTATION_PART, FileOptions::default())
            .unwrap();
        writer.write_all(presentation_xml.as_bytes()).unwrap();
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);
        cursor
    }

    #[test]
    fn test_parse_sections() {
        let table = parse_sections(WITH_SECTIONS).unwrap();
        let sections: Vec<_> = table.iter().cloned().collect();

        assert_eq!(
            sections,
            vec![
                Section::new("Intro & Welcome", 1, 2),
                Section::new("Empty", 3, 0),
                Section::new("Body", 3, 3),
            ]
        );
    }

    #[test]
    fn test_parse_without_sections() {
        assert!(parse_sections(WITHOUT_SECTIONS).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_slide_ids_are_ignored() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:p14="p14">
  <p:sldIdLst><p:sldId id="300"/></p:sldIdLst>
  <p14:sectionLst>
    <p14:section name="Ghost"><p14:sldIdLst><p14:sldId id="999"/></p14:sldIdLst></p14:section>
    <p14:section name="Real"><p14:sldIdLst><p14:sldId id="300"/></p14:sldIdLst></p14:section>
  </p14:sectionLst>
</p:presentation>"#;
        let table = parse_sections(xml).unwrap();
        assert_eq!(table.section(0).unwrap(), &Section::new("Ghost", 1, 0));
        assert_eq!(table.section(1).unwrap(), &Section::new("Real", 1, 1));
    }

    #[test]
    fn test_read_sections_from_archive() {
        let table = PptxParser::new()
            .read_sections(pptx_with(WITH_SECTIONS))
            .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.section(2).unwrap().first_slide, 3);
    }

    #[test]
    fn test_missing_presentation_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("docProps/app.xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<Properties/>").unwrap();
        let mut cursor = writer.finish().unwrap();
        cursor.set_position(0);

        let err = PptxParser::new().read_sections(cursor).unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = PptxParser::new()
            .read_sections(Cursor::new(b"not a pptx".to_vec()))
            .unwrap_err();
        assert!(matches!(err, Error::ZipError(_)));
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p14:section"), b"section");
        assert_eq!(local_name(b"p:sldId"), b"sldId");
        assert_eq!(local_name(b"sldId"), b"sldId");
    }
}
