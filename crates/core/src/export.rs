//! Rendering a presentation into per-slide images.
//!
//! Rendering itself happens outside this crate; an [`Exporter`] only has to
//! leave `Slide{n}.{ext}` files in the target directory before copying starts.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};

/// Produces one image per slide of a presentation in `target_dir`.
pub trait Exporter {
    fn export(&self, presentation: &Path, target_dir: &Path) -> Result<()>;
}

/// Slides were rendered ahead of time; only checks that they have a home.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrerenderedExport;

impl Exporter for PrerenderedExport {
    fn export(&self, presentation: &Path, target_dir: &Path) -> Result<()> {
        if !target_dir.is_dir() {
            return Err(Error::Export(format!(
                "no exported slides for {}: {} is not a directory",
                presentation.display(),
                target_dir.display()
            )));
        }
        log::debug!(
            "Using slides of {} already exported to {}",
            presentation.display(),
            target_dir.display()
        );
        Ok(())
    }
}

/// Runs an external renderer.
///
/// `{input}` and `{output}` in the arguments are replaced by the presentation
/// path and the target directory.
#[derive(Debug, Clone)]
pub struct CommandExporter {
    program: String,
    args: Vec<String>,
}

impl CommandExporter {
    /// Create an exporter running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build an exporter from a whitespace-separated command line.
    ///
    /// Quoting is not supported; paths go in through the placeholders.
    pub fn parse(command_line: &str) -> Result<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words
            .next()
            .ok_or_else(|| Error::Export("empty exporter command".to_string()))?;
        Ok(Self::new(program, words.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders filled in.
    pub fn expand_args(&self, presentation: &Path, target_dir: &Path) -> Vec<String> {
        let input = presentation.display().to_string();
        let output = target_dir.display().to_string();
        self.args
            .iter()
            .map(|arg| arg.replace("{input}", &input).replace("{output}", &output))
            .collect()
    }
}

impl Exporter for CommandExporter {
    fn export(&self, presentation: &Path, target_dir: &Path) -> Result<()> {
        let args = self.expand_args(presentation, target_dir);
        log::debug!("Running exporter: {} {}", self.program, args.join(" "));

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Export(format!("failed to run {}: {}", self.program, e)))?;

        if !status.success() {
            return Err(Error::Export(format!(
                "{} exited with {}",
                self.program, status
            )));
        }
        Ok(())
    }
}
