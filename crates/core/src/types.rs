//! Domain types for selecting and copying exported slides.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// What the user asked to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionRequest {
    /// Slides `from` through `to`; `to` defaults to `from`.
    ExplicitRange { from: u32, to: Option<u32> },

    /// Every slide of a section, by zero-based section index.
    Section { index: usize },

    /// A single slide.
    SingleSlide { index: u32 },
}

impl SelectionRequest {
    /// Numeric tag embedded in destination filenames.
    ///
    /// Sections use their own index so copies of different sections never
    /// overwrite each other; everything else uses 0.
    pub fn prefix(&self) -> usize {
        match self {
            Self::Section { index } => *index,
            Self::ExplicitRange { .. } | Self::SingleSlide { .. } => 0,
        }
    }
}

/// A named run of slides within a presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Display name of the section.
    pub name: String,

    /// 1-based index of the first slide in the section.
    pub first_slide: u32,

    /// Number of slides in the section.
    pub slide_count: u32,
}

impl Section {
    /// Create a new section.
    pub fn new(name: impl Into<String>, first_slide: u32, slide_count: u32) -> Self {
        Self {
            name: name.into(),
            first_slide,
            slide_count,
        }
    }
}

/// Sections of a presentation in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTable {
    sections: Vec<Section>,
}

impl SectionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Look up a section by zero-based index.
    pub fn section(&self, index: usize) -> Result<&Section> {
        self.sections.get(index).ok_or(Error::SectionOutOfRange {
            index,
            available: self.sections.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

impl FromIterator<Section> for SectionTable {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}

/// Inclusive range of 1-based slide indices, always `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlideRange {
    from: u32,
    to: u32,
}

impl SlideRange {
    /// Create a range, rejecting `to < from`.
    pub fn new(from: u32, to: u32) -> Result<Self> {
        if to < from {
            return Err(Error::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// A range covering exactly one slide.
    pub fn single(index: u32) -> Self {
        Self {
            from: index,
            to: index,
        }
    }

    pub fn first(&self) -> u32 {
        self.from
    }

    pub fn last(&self) -> u32 {
        self.to
    }

    /// Number of slide indices covered.
    pub fn len(&self) -> usize {
        (self.to - self.from) as usize + 1
    }

    /// Never true; present for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Slide indices in ascending order.
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.from..=self.to
    }
}

/// Result of a single copy attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    SourceMissing,
    CopyFailed(String),
}

/// A copy attempt for one slide index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyEntry {
    /// 1-based slide index.
    pub index: u32,

    /// Exported image the copy was read from.
    pub source: PathBuf,

    /// File the copy was (or would have been) written to.
    pub destination: PathBuf,

    pub outcome: CopyOutcome,
}

/// Ordered record of every copy attempt in one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReport {
    pub entries: Vec<CopyEntry>,
}

impl CopyReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an attempt.
    pub fn push(&mut self, entry: CopyEntry) {
        self.entries.push(entry);
    }

    /// Outcomes in slide order.
    pub fn outcomes(&self) -> Vec<&CopyOutcome> {
        self.entries.iter().map(|e| &e.outcome).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slides copied successfully.
    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, CopyOutcome::Copied))
    }

    /// Number of slides whose exported image was absent.
    pub fn missing(&self) -> usize {
        self.count(|o| matches!(o, CopyOutcome::SourceMissing))
    }

    /// Number of slides whose copy failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, CopyOutcome::CopyFailed(_)))
    }

    fn count(&self, pred: impl Fn(&CopyOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary).
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix() {
        assert_eq!(SelectionRequest::Section { index: 3 }.prefix(), 3);
        assert_eq!(
            SelectionRequest::ExplicitRange { from: 2, to: None }.prefix(),
            0
        );
        assert_eq!(SelectionRequest::SingleSlide { index: 9 }.prefix(), 0);
    }

    #[test]
    fn test_slide_range_rejects_reversed() {
        assert!(matches!(
            SlideRange::new(5, 2),
            Err(Error::InvalidRange { from: 5, to: 2 })
        ));
    }

    #[test]
    fn test_slide_range_iteration() {
        let range = SlideRange::new(4, 7).unwrap();
        assert_eq!(range.len(), 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![4, 5, 6, 7]);
        assert_eq!(SlideRange::single(3).len(), 1);
    }

    #[test]
    fn test_section_table_lookup() {
        let table: SectionTable = vec![Section::new("Intro", 1, 3)].into_iter().collect();
        assert_eq!(table.section(0).unwrap().first_slide, 1);

        let err = table.section(1).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionOutOfRange {
                index: 1,
                available: 1
            }
        ));
    }

    #[test]
    fn test_report_counts() {
        let mut report = CopyReport::new();
        for (index, outcome) in [
            (1, CopyOutcome::Copied),
            (2, CopyOutcome::SourceMissing),
            (3, CopyOutcome::CopyFailed("denied".to_string())),
            (4, CopyOutcome::Copied),
        ] {
            report.push(CopyEntry {
                index,
                source: PathBuf::from(format!("Slide{}.png", index)),
                destination: PathBuf::from("out"),
                outcome,
            });
        }

        assert_eq!(report.len(), 4);
        assert_eq!(report.copied(), 2);
        assert_eq!(report.missing(), 1);
        assert_eq!(report.failed(), 1);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            PresentationFormat::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0, 0, 0, 0]),
            Some(PresentationFormat::Pptx)
        );
        assert_eq!(
            PresentationFormat::from_extension("PPT"),
            Some(PresentationFormat::Ppt)
        );
        assert_eq!(PresentationFormat::from_extension("key"), None);
    }
}
