//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::input;
use crate::output::OutputFormat;
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use wordchunk_core::{Pipeline, PipelineConfig, Source};

pub mod stream;
pub mod top;

/// Rank the most frequent three-word chunks in text
#[derive(Debug, Parser)]
#[command(name = "wordchunk", version, propagate_version = true)]
pub struct Cli {
    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the most frequent chunks
    Top(top::TopArgs),

    /// Print the normalized token stream, one token per line
    Tokens(stream::StreamArgs),

    /// Print the chunk stream, one chunk per line
    Chunks(stream::StreamArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,
}

impl Cli {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();
        log::debug!("Arguments: {:?}", self);

        match &self.command {
            Commands::Top(args) => args.execute(),
            Commands::Tokens(args) => args.execute_tokens(),
            Commands::Chunks(args) => args.execute_chunks(),
            Commands::List {
                subcommand: ListCommands::Formats,
            } => list_formats(&mut io::stdout().lock()),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        // a logger may already be installed when running in-process
        let _ =
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .try_init();
    }
}

fn list_formats(out: &mut impl Write) -> CliResult<()> {
    writeln!(out, "Available output formats:")?;
    for format in OutputFormat::ALL {
        writeln!(out, "  {:<10} {}", format.name(), format.description())?;
    }
    Ok(())
}

/// Input and pipeline options shared by every analysis command
#[derive(Debug, Clone, Default, Args)]
pub struct InputArgs {
    /// Input files or glob patterns; `-` reads standard input
    #[arg(value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "WORDCHUNK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Items buffered between pipeline stages (0 = rendezvous)
    #[arg(long, value_name = "N")]
    pub channel_capacity: Option<usize>,
}

impl InputArgs {
    /// Load the configuration file, or defaults when none is given
    pub fn load_config(&self) -> CliResult<CliConfig> {
        match &self.config {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Ok(CliConfig::load(path)?)
            }
            None => Ok(CliConfig::default()),
        }
    }

    /// Build a pipeline from the configuration and command-line overrides
    pub fn pipeline(&self, config: &CliConfig) -> CliResult<Pipeline> {
        let capacity = self
            .channel_capacity
            .unwrap_or(config.pipeline.channel_capacity);
        let pipeline_config = PipelineConfig::builder()
            .channel_capacity(capacity)
            .build()
            .context("Invalid pipeline settings")?;
        Ok(Pipeline::with_config(pipeline_config))
    }

    /// Open every input, reporting the ones that fail on stderr
    pub fn open_sources(&self) -> Vec<Source> {
        let include_stdin = !io::stdin().is_terminal();
        input::open_sources(&self.input, include_stdin, &mut io::stderr().lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_top_with_options() {
        let cli = Cli::try_parse_from([
            "wordchunk",
            "-v",
            "top",
            "a.txt",
            "docs/*.txt",
            "-n",
            "3",
            "-f",
            "json",
            "--channel-capacity",
            "0",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Top(args) => {
                assert_eq!(args.input.input, vec!["a.txt", "docs/*.txt"]);
                assert_eq!(args.top, Some(3));
                assert_eq!(args.format, Some(OutputFormat::Json));
                assert_eq!(args.input.channel_capacity, Some(0));
            }
            other => panic!("expected top, got {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wordchunk", "tokens", "-q", "-"]).unwrap();
        assert!(cli.quiet);
        match cli.command {
            Commands::Tokens(args) => assert_eq!(args.input.input, vec!["-"]),
            other => panic!("expected tokens, got {other:?}"),
        }
    }

    #[test]
    fn test_list_formats_command() {
        let cli = Cli::try_parse_from(["wordchunk", "list", "formats"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::List {
                subcommand: ListCommands::Formats
            }
        ));
    }

    #[test]
    fn test_unknown_format_is_usage_error() {
        let err = Cli::try_parse_from(["wordchunk", "top", "-f", "yaml"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_list_formats_output() {
        let mut out = Vec::new();
        list_formats(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("text"));
        assert!(text.contains("json"));
        assert!(text.contains("markdown"));
    }

    #[test]
    fn test_channel_capacity_override() {
        let mut config = CliConfig::default();
        config.pipeline.channel_capacity = 8;

        let args = InputArgs::default();
        assert_eq!(args.pipeline(&config).unwrap().config().channel_capacity(), 8);

        let args = InputArgs {
            channel_capacity: Some(2),
            ..InputArgs::default()
        };
        assert_eq!(args.pipeline(&config).unwrap().config().channel_capacity(), 2);
    }

    #[test]
    fn test_oversized_capacity_is_rejected() {
        let args = InputArgs {
            channel_capacity: Some(usize::MAX),
            ..InputArgs::default()
        };
        assert!(args.pipeline(&CliConfig::default()).is_err());
    }
}
