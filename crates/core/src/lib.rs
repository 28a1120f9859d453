//! Core domain types, slide range resolution, and copying of exported
//! slide images.

pub mod copier;
pub mod error;
pub mod export;
pub mod range;
pub mod sink;
pub mod types;

pub use copier::{copy_slides, SlideCopier, SlideNaming};
pub use error::{Error, Result};
pub use export::{CommandExporter, Exporter, PrerenderedExport};
pub use range::resolve;
pub use sink::{CopySink, LogSink, RecordingSink, SinkEvent};
pub use types::{
    CopyEntry, CopyOutcome, CopyReport, PresentationFormat, Section, SectionTable,
    SelectionRequest, SlideRange,
};
