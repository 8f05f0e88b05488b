/// Output formatting for single-file extraction
///
/// - JSON: the outline as a pretty-printed array
/// - Markdown: the same block the directory run would write for this file
use crate::cli::markdown::render_class_info;
use crate::error::Result;
use crate::extractors::ClassInfo;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Standard JSON array (pretty-printed)
    Json,

    /// Markdown block with one table per member section
    Markdown,
}

pub struct OutputWriter {
    format: OutputFormat,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer targeting stdout
    pub fn new(format: OutputFormat) -> Self {
        Self::with_writer(format, Box::new(io::stdout()))
    }

    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write>) -> Self {
        Self { format, writer }
    }

    /// Write the outline of one file
    pub fn write_outline(&mut self, class_path: &str, classes: &[ClassInfo]) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                writeln!(self.writer, "{}", serde_json::to_string_pretty(classes)?)?;
            }
            OutputFormat::Markdown => {
                write!(self.writer, "{}", render_class_info(class_path, classes))?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
