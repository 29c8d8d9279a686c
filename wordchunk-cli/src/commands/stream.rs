//! Token and chunk stream commands

use super::InputArgs;
use crate::error::{CliError, CliResult};
use crate::input;
use anyhow::Context;
use clap::Args;
use std::fmt::Display;
use std::io::{self, BufWriter, Write};
use wordchunk_core::{Pipeline, Source, Stream, StreamSummary};

/// Arguments for the tokens and chunks commands
#[derive(Debug, Args)]
pub struct StreamArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

impl StreamArgs {
    /// Print every token as the normalizer produces it
    pub fn execute_tokens(&self) -> CliResult<()> {
        self.execute_with(|pipeline, sources| pipeline.tokens(sources))
    }

    /// Print every chunk as the chunker produces it
    pub fn execute_chunks(&self) -> CliResult<()> {
        self.execute_with(|pipeline, sources| pipeline.chunks(sources))
    }

    fn execute_with<T, F>(&self, start: F) -> CliResult<()>
    where
        T: Display,
        F: FnOnce(&Pipeline, Vec<Source>) -> wordchunk_core::Result<Stream<T>>,
    {
        let config = self.input.load_config()?;
        let pipeline = self.input.pipeline(&config)?;

        let sources = self.input.open_sources();
        if sources.is_empty() {
            return Err(CliError::NoInput.into());
        }

        let stream = start(&pipeline, sources).context("Failed to start pipeline")?;
        let stdout = io::stdout();
        let summary = print_stream(stream, &mut BufWriter::new(stdout.lock()))?;
        input::report_failures(&summary.failures, &mut io::stderr().lock());

        if summary.stats.bytes_read == 0 {
            return Err(CliError::NoInput.into());
        }
        log::info!(
            "Read {} bytes, {} words, {} tokens, {} chunks",
            summary.stats.bytes_read,
            summary.stats.words,
            summary.stats.tokens,
            summary.stats.chunks
        );
        Ok(())
    }
}

/// Write each item on its own line, then join the pipeline
///
/// A write error still joins the stage threads before it is returned.
fn print_stream<T: Display>(
    mut stream: Stream<T>,
    out: &mut impl Write,
) -> CliResult<StreamSummary> {
    let written = stream
        .by_ref()
        .try_for_each(|item| writeln!(out, "{item}"))
        .and_then(|()| out.flush());
    let summary = stream.finish().context("Pipeline failed")?;
    written.context("Failed to write output")?;
    Ok(summary)
}
