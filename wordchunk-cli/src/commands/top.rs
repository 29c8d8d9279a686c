//! Top command implementation

use super::InputArgs;
use crate::error::{CliError, CliResult};
use crate::input;
use crate::output::{create_formatter, open_output, OutputFormat};
use anyhow::Context;
use clap::Args;
use std::io;
use std::path::PathBuf;

/// Arguments for the top command
#[derive(Debug, Args)]
pub struct TopArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of chunks to print [default: 10]
    #[arg(short = 'n', long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl TopArgs {
    /// Execute the top command
    pub fn execute(&self) -> CliResult<()> {
        let config = self.input.load_config()?;
        let pipeline = self.input.pipeline(&config)?;
        let top = self.top.unwrap_or(config.output.top);
        let format = self.format.unwrap_or(config.output.format);

        let sources = self.input.open_sources();
        if sources.is_empty() {
            return Err(CliError::NoInput.into());
        }

        log::info!("Ranking chunks from {} source(s)", sources.len());
        let report = pipeline.run(sources).context("Pipeline failed")?;
        input::report_failures(&report.failures, &mut io::stderr().lock());

        if !report.has_input() {
            return Err(CliError::NoInput.into());
        }
        log::info!(
            "Read {} bytes, {} words, {} distinct chunks",
            report.stats.bytes_read,
            report.stats.words,
            report.ranking.len()
        );

        let writer = open_output(self.output.as_deref())?;
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);
        for (index, entry) in report.top(top).iter().enumerate() {
            formatter.format_entry(index + 1, entry)?;
        }
        formatter.finish(&report.stats)?;

        Ok(())
    }
}
