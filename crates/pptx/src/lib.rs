//! PPTX (Office Open XML) backend for reading presentation sections.
//!
//! Parses the section list that PowerPoint 2010+ stores as an extension of
//! `ppt/presentation.xml` inside the .pptx ZIP archive.

pub mod parser;

pub use parser::PptxParser;
