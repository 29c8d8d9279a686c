//! wordchunk command-line entry point

use clap::Parser;
use std::process::ExitCode;
use wordchunk_cli::{error, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(error::exit_code(&err))
        }
    }
}
