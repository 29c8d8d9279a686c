//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use wordchunk_core::{Count, PipelineStats};

/// Markdown formatter - outputs chunks as a numbered list
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    entry_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entry_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_entry(&mut self, rank: usize, entry: &Count) -> Result<()> {
        self.entry_count += 1;
        writeln!(self.writer, "{}. `{}` ({})", rank, entry.chunk, entry.count)?;
        Ok(())
    }

    fn finish(&mut self, stats: &PipelineStats) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Top {} of {} chunks from {} words in {} source(s)*",
            self.entry_count, stats.chunks, stats.words, stats.sources
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
