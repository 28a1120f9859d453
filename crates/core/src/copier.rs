//! Copying a range of exported slide images under deterministic names.

use crate::sink::{CopySink, LogSink};
use crate::types::{CopyEntry, CopyOutcome, CopyReport, SlideRange};
use std::fs;
use std::path::Path;

/// Filename convention shared by the exporter's output and the copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideNaming {
    /// Leading part of every filename.
    stem: String,
    /// Image extension, without the dot.
    extension: String,
}

impl Default for SlideNaming {
    fn default() -> Self {
        Self {
            stem: "Slide".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl SlideNaming {
    /// Create the default `Slide{n}.png` convention.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different filename stem.
    pub fn with_stem(mut self, stem: impl Into<String>) -> Self {
        self.stem = stem.into();
        self
    }

    /// Use a different image extension. A leading dot is ignored.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Name of the exported image for a 1-based slide index, e.g. `Slide3.png`.
    pub fn source_name(&self, index: u32) -> String {
        format!("{}{}.{}", self.stem, index, self.extension)
    }

    /// Name of the copy at a 1-based position, e.g. `Slide2-03.png`.
    pub fn destination_name(&self, prefix: usize, position: u32) -> String {
        format!("{}{}-{:02}.{}", self.stem, prefix, position, self.extension)
    }
}

/// Copies every slide in a range, reporting each attempt to a sink.
#[derive(Debug, Clone)]
pub struct SlideCopier<S = LogSink> {
    naming: SlideNaming,
    sink: S,
}

impl Default for SlideCopier<LogSink> {
    fn default() -> Self {
        Self::with_sink(LogSink)
    }
}

impl SlideCopier<LogSink> {
    /// Create a copier that logs through the `log` facade.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: CopySink> SlideCopier<S> {
    /// Create a copier reporting to the given sink.
    pub fn with_sink(sink: S) -> Self {
        Self {
            naming: SlideNaming::default(),
            sink,
        }
    }

    /// Use a custom filename convention.
    pub fn with_naming(mut self, naming: SlideNaming) -> Self {
        self.naming = naming;
        self
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Copy slides `range` from `source_dir` into `dest_dir`.
    ///
    /// Every index in the range is attempted in ascending order and gets
    /// exactly one entry in the report. Missing sources and failed copies are
    /// recorded and skipped. Existing destination files are overwritten.
    pub fn copy_slides(
        &mut self,
        source_dir: &Path,
        dest_dir: &Path,
        range: SlideRange,
        prefix: usize,
    ) -> CopyReport {
        let mut report = CopyReport::new();

        for (position, index) in (1u32..).zip(range.iter()) {
            let source = source_dir.join(self.naming.source_name(index));
            let destination = dest_dir.join(self.naming.destination_name(prefix, position));

            let outcome = if !source.exists() {
                self.sink.source_missing(index, &source);
                CopyOutcome::SourceMissing
            } else {
                match fs::copy(&source, &destination) {
                    Ok(_) => {
                        self.sink.copied(index, &source, &destination);
                        CopyOutcome::Copied
                    }
                    Err(e) => {
                        self.sink.copy_failed(index, &source, &destination, &e);
                        CopyOutcome::CopyFailed(e.to_string())
                    }
                }
            };

            report.push(CopyEntry {
                index,
                source,
                destination,
                outcome,
            });
        }

        report
    }
}

/// Copy slides with the default naming, logging through the `log` facade.
pub fn copy_slides(source_dir: &Path, dest_dir: &Path, range: SlideRange, prefix: usize) -> CopyReport {
    SlideCopier::new().copy_slides(source_dir, dest_dir, range, prefix)
}
