//! Receivers for per-slide copy events.
//!
//! The copier never logs on its own; it reports each attempt to a sink that
//! the caller hands in.

use std::io;
use std::path::{Path, PathBuf};

/// Receives the outcome of each copy attempt as it happens.
pub trait CopySink {
    /// A slide image was duplicated into the destination.
    fn copied(&mut self, index: u32, source: &Path, destination: &Path);

    /// The exported image for a slide does not exist.
    fn source_missing(&mut self, index: u32, source: &Path);

    /// Copying a slide image failed.
    fn copy_failed(&mut self, index: u32, source: &Path, destination: &Path, reason: &io::Error);
}

impl<S: CopySink + ?Sized> CopySink for &mut S {
    fn copied(&mut self, index: u32, source: &Path, destination: &Path) {
        (**self).copied(index, source, destination)
    }

    fn source_missing(&mut self, index: u32, source: &Path) {
        (**self).source_missing(index, source)
    }

    fn copy_failed(&mut self, index: u32, source: &Path, destination: &Path, reason: &io::Error) {
        (**self).copy_failed(index, source, destination, reason)
    }
}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl CopySink for LogSink {
    fn copied(&mut self, index: u32, source: &Path, destination: &Path) {
        log::debug!(
            "Copied slide {}: {} -> {}",
            index,
            source.display(),
            destination.display()
        );
    }

    fn source_missing(&mut self, index: u32, source: &Path) {
        log::error!("Could not find slide {} at {}", index, source.display());
    }

    fn copy_failed(&mut self, index: u32, source: &Path, destination: &Path, reason: &io::Error) {
        log::error!(
            "Could not copy slide {} from {} to {}: {}",
            index,
            source.display(),
            destination.display(),
            reason
        );
    }
}

/// A copy event captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Copied {
        index: u32,
        source: PathBuf,
        destination: PathBuf,
    },
    SourceMissing {
        index: u32,
        source: PathBuf,
    },
    CopyFailed {
        index: u32,
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },
}

/// Keeps every event in memory, in the order received.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Number of events reporting a missing source or a failed copy.
    pub fn error_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| !matches!(e, SinkEvent::Copied { .. }))
            .count()
    }
}

impl CopySink for RecordingSink {
    fn copied(&mut self, index: u32, source: &Path, destination: &Path) {
        self.events.push(SinkEvent::Copied {
            index,
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
        });
    }

    fn source_missing(&mut self, index: u32, source: &Path) {
        self.events.push(SinkEvent::SourceMissing {
            index,
            source: source.to_path_buf(),
        });
    }

    fn copy_failed(&mut self, index: u32, source: &Path, destination: &Path, reason: &io::Error) {
        self.events.push(SinkEvent::CopyFailed {
            index,
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_two<S: CopySink>(mut sink: S) {
        sink.copied(1, Path::new("Slide1.png"), Path::new("out/Slide0-01.png"));
        sink.source_missing(2, Path::new("Slide2.png"));
    }

    #[test]
    fn test_recording_through_mut_ref() {
        let mut recorder = RecordingSink::new();
        report_two(&mut recorder);

        assert_eq!(recorder.events().len(), 2);
        assert_eq!(recorder.error_count(), 1);
        assert_eq!(
            recorder.events()[1],
            SinkEvent::SourceMissing {
                index: 2,
                source: PathBuf::from("Slide2.png"),
            }
        );
    }
}
