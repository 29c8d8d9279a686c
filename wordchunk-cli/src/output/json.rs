//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use wordchunk_core::{Chunk, Count, PipelineStats};

/// JSON formatter - collects entries and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    chunks: Vec<ChunkData>,
    pretty: bool,
}

/// One ranked entry in the JSON document
#[derive(Debug, Serialize)]
pub struct ChunkData {
    /// Position in the ranking, starting at 1
    pub rank: usize,
    /// The chunk's tokens
    pub chunk: Chunk,
    /// Tokens joined with single spaces
    pub text: String,
    /// Number of occurrences
    pub count: usize,
}

#[derive(Serialize)]
struct Document<'a> {
    chunks: &'a [ChunkData],
    stats: &'a PipelineStats,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter with pretty printing
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunks: Vec::new(),
            pretty: true,
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_entry(&mut self, rank: usize, entry: &Count) -> Result<()> {
        self.chunks.push(ChunkData {
            rank,
            chunk: entry.chunk.clone(),
            text: entry.chunk.to_string(),
            count: entry.count,
        });
        Ok(())
    }

    fn finish(&mut self, stats: &PipelineStats) -> Result<()> {
        let document = Document {
            chunks: &self.chunks,
            stats,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
