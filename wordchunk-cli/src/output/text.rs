//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use wordchunk_core::{Count, PipelineStats};

/// Plain text formatter - outputs one `chunk - count` line per entry
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_entry(&mut self, _rank: usize, entry: &Count) -> Result<()> {
        writeln!(self.writer, "{} - {}", entry.chunk, entry.count)?;
        Ok(())
    }

    fn finish(&mut self, _stats: &PipelineStats) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{entry, stats};

    #[test]
    fn test_reference_line_format() {
        let mut out = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut out);
            formatter.format_entry(1, &entry(2, ["a", "b", "c"])).unwrap();
            formatter.format_entry(2, &entry(2, ["b", "c", "a"])).unwrap();
            formatter.format_entry(3, &entry(1, ["c", "a", "b"])).unwrap();
            formatter.finish(&stats()).unwrap();
        }

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "a b c - 2\nb c a - 2\nc a b - 1\n"
        );
    }

    #[test]
    fn test_empty_ranking_prints_nothing() {
        let mut out = Vec::new();
        TextFormatter::new(&mut out).finish(&stats()).unwrap();
        assert!(out.is_empty());
    }
}
