//! CLI tool for exporting PowerPoint slides as images and copying a
//! selection of them.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::Level;
use slides_core::{
    resolve, CommandExporter, CopyReport, Exporter, PrerenderedExport, PresentationFormat,
    SectionTable, SelectionRequest, SlideCopier, SlideNaming, SlideRange,
};
use slides_pptx::PptxParser;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

/// Export PowerPoint slides as image files.
#[derive(Parser, Debug)]
#[command(name = "pptx-to-png")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PowerPoint slidedeck
    #[arg(default_value = "slides.pptx")]
    slides: PathBuf,

    /// Output path
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Directory holding the exported slide images (default: the output path)
    #[arg(long, value_name = "DIR")]
    source: Option<PathBuf>,

    /// Renderer command; {input} and {output} are replaced by the slidedeck
    /// and the export directory. Without it, slides must already be exported
    #[arg(long, value_name = "COMMAND")]
    exporter: Option<String>,

    #[command(flatten)]
    selection: SelectionArgs,

    /// Image extension of the exported slides
    #[arg(long, default_value = "png")]
    format: String,

    /// Filename stem of the exported slides
    #[arg(long, default_value = "Slide")]
    stem: String,

    /// Print the sections of the slidedeck and exit
    #[arg(long)]
    list_sections: bool,

    /// Print the copy report as JSON
    #[arg(long)]
    json: bool,

    /// Show debug information
    #[arg(long)]
    debug: bool,
}

/// Which slides to copy. At most one may be given.
#[derive(clap::Args, Debug)]
#[group(required = false, multiple = false)]
struct SelectionArgs {
    /// Copy a range of slides, e.g. 2-4, or a single slide
    #[arg(short, long, value_name = "FROM[-TO]")]
    range: Option<RangeArg>,

    /// Copy all slides of a section (zero-based)
    #[arg(short, long, value_name = "INDEX")]
    section: Option<usize>,

    /// Copy a single slide
    #[arg(long, value_name = "INDEX")]
    slide: Option<u32>,
}

impl SelectionArgs {
    /// The selection as a typed request, if any was given.
    fn to_request(&self) -> Option<SelectionRequest> {
        if let Some(range) = &self.range {
            return Some(SelectionRequest::ExplicitRange {
                from: range.from,
                to: range.to,
            });
        }
        if let Some(index) = self.section {
            return Some(SelectionRequest::Section { index });
        }
        self.slide
            .map(|index| SelectionRequest::SingleSlide { index })
    }
}

/// `FROM` or `FROM-TO`, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangeArg {
    from: u32,
    to: Option<u32>,
}

impl FromStr for RangeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid slide number {:?}: {}", part, e))
        };

        match s.split_once('-') {
            Some((from, to)) => Ok(Self {
                from: parse(from)?,
                to: Some(parse(to)?),
            }),
            None => Ok(Self {
                from: parse(s)?,
                to: None,
            }),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("FATAL: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the tool's `[*]` / `[-]` / `[d]` line tags.
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| writeln!(buf, "{} {}", level_tag(record.level()), record.args()))
        .init();
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error | Level::Warn => "[-]",
        Level::Info => "[*]",
        Level::Debug | Level::Trace => "[d]",
    }
}

fn run(args: &Args) -> Result<()> {
    check_file(&args.slides)?;

    if args.list_sections {
        let sections = read_sections(&args.slides)?;
        print_sections(&sections);
        return Ok(());
    }

    check_path(&args.output)?;
    let export_path = args.source.as_deref().unwrap_or(args.output.as_path());

    // Fatal selection errors must surface before anything is rendered
    let plan = match args.selection.to_request() {
        Some(selection) => Some((selection, resolve_selection(&args.slides, &selection)?)),
        None => None,
    };

    let exporter: Box<dyn Exporter> = match &args.exporter {
        Some(command) => {
            std::fs::create_dir_all(export_path).with_context(|| {
                format!("Failed to create export directory: {}", export_path.display())
            })?;
            Box::new(CommandExporter::parse(command)?)
        }
        None => Box::new(PrerenderedExport),
    };

    log::info!("Exporting presentation to {}", export_path.display());
    exporter.export(&args.slides, export_path)?;

    let Some((selection, range)) = plan else {
        log::debug!("No slides selected, nothing to copy");
        return Ok(());
    };

    log::info!(
        "Copying slides {} to {} into {}",
        range.first(),
        range.last(),
        args.output.display()
    );

    let naming = SlideNaming::new()
        .with_stem(args.stem.as_str())
        .with_extension(args.format.as_str());
    let report = SlideCopier::new().with_naming(naming).copy_slides(
        export_path,
        &args.output,
        range,
        selection.prefix(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    log_summary(&report);

    Ok(())
}

/// Turn a selection into slide indices, reading sections from the deck if needed.
fn resolve_selection(slides: &Path, selection: &SelectionRequest) -> Result<SlideRange> {
    let sections = match selection {
        SelectionRequest::Section { .. } => Some(read_sections(slides)?),
        _ => None,
    };
    Ok(resolve(selection, sections.as_ref())?)
}

/// Check whether the slidedeck exists.
fn check_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("Could not find {}", path.display());
    }
    Ok(())
}

/// Check whether the output path exists.
fn check_path(path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("Could not find {}", path.display());
    }
    Ok(())
}

/// Read the section table, detecting the format from the file header.
fn read_sections(path: &Path) -> Result<SectionTable> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    // Short files fall through to the extension check
    let mut magic = Vec::with_capacity(8);
    file.take(8)
        .read_to_end(&mut magic)
        .with_context(|| "Failed to read file header")?;

    let format = PresentationFormat::from_magic(&magic).or_else(|| {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(PresentationFormat::from_extension)
    });

    match format {
        Some(PresentationFormat::Pptx) => {
            log::debug!("Reading sections from {}", path.display());
            // Re-open so the ZIP reader starts at the beginning
            let file = File::open(path)?;
            Ok(PptxParser::new().read_sections(BufReader::new(file))?)
        }
        Some(PresentationFormat::Ppt) => Err(slides_core::Error::UnsupportedFormat(
            "sections can only be read from .pptx files".to_string(),
        )
        .into()),
        None => bail!("Could not detect file format of {}", path.display()),
    }
}

fn print_sections(sections: &SectionTable) {
    if sections.is_empty() {
        println!("No sections");
        return;
    }
    for (index, section) in sections.iter().enumerate() {
        println!(
            "{:>3}  {} (slide {}, {} slides)",
            index, section.name, section.first_slide, section.slide_count
        );
    }
}

fn log_summary(report: &CopyReport) {
    log::info!(
        "Copied {} of {} slides",
        report.copied(),
        report.len()
    );
    if report.missing() > 0 || report.failed() > 0 {
        log::warn!(
            "{} slides missing, {} copies failed",
            report.missing(),
            report.failed()
        );
    }
}
