//! wordchunk CLI library
//!
//! This library provides the command-line driver for the wordchunk
//! pipeline: argument parsing, source opening, configuration and output
//! formatting.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use commands::Cli;
pub use error::{CliError, CliResult};
