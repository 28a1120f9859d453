//! Error types for slide selection and export.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort an invocation before any slide is copied.
///
/// Per-slide failures are never reported through this type; see
/// [`CopyOutcome`](crate::CopyOutcome).
#[derive(Error, Debug)]
pub enum Error {
    /// An explicit range whose upper bound lies below its lower bound.
    #[error("Invalid slide range {from}-{to}: the last slide comes before the first")]
    InvalidRange { from: u32, to: u32 },

    /// The requested section does not exist in the presentation.
    #[error("Section index {index} is out of range: {}", available_sections(.available))]
    SectionOutOfRange { index: usize, available: usize },

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for PPTX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// Rendering slides to images failed.
    #[error("Export failed: {0}")]
    Export(String),
}

fn available_sections(count: &usize) -> String {
    match *count {
        1 => "1 section available".to_string(),
        n => format!("{} sections available", n),
    }
}
