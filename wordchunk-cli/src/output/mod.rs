//! Output formatting module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use wordchunk_core::{Count, PipelineStats};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output one ranked entry, `rank` starting at 1
    fn format_entry(&mut self, rank: usize, entry: &Count) -> Result<()>;

    /// Finalize output (e.g., write the JSON document or a footer)
    fn finish(&mut self, stats: &PipelineStats) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text, one `chunk - count` line per entry
    #[default]
    Text,
    /// JSON document with ranked chunks and run statistics
    Json,
    /// Markdown numbered list
    Markdown,
}

impl OutputFormat {
    /// Every supported format
    pub const ALL: [OutputFormat; 3] = [Self::Text, Self::Json, Self::Markdown];

    /// Name used on the command line and in configuration files
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    /// One-line description
    pub fn description(self) -> &'static str {
        match self {
            Self::Text => "Plain text, one `chunk - count` line per entry",
            Self::Json => "JSON document with ranked chunks and run statistics",
            Self::Markdown => "Markdown numbered list with a summary footer",
        }
    }
}

/// Destination writer shared by every formatter
pub type OutputWriter = Box<dyn Write + Send + Sync>;

/// Open the output file, or stdout when no path is given
pub fn open_output(path: Option<&Path>) -> Result<OutputWriter> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            log::info!("Writing output to {}", path.display());
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Create the formatter for `format`
pub fn create_formatter(
    format: OutputFormat,
    writer: OutputWriter,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use wordchunk_core::{Chunk, Count, PipelineStats};

    pub fn entry(count: usize, words: [&str; 3]) -> Count {
        Count::new(count, Chunk::parse(words).unwrap())
    }

    pub fn stats() -> PipelineStats {
        PipelineStats {
            sources: 1,
            bytes_read: 13,
            words: 7,
            tokens: 7,
            chunks: 5,
        }
    }
}
