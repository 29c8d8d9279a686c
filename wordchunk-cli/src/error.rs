//! Error handling for the CLI application

use std::fmt;

/// Process exit statuses
pub mod exit_codes {
    /// Generic failure (I/O, output, pipeline)
    pub const FAILURE: u8 = 1;
    /// Command-line usage error (reported by clap)
    pub const USAGE: u8 = 2;
    /// No usable input (sysexits `EX_NOINPUT`)
    pub const NO_INPUT: u8 = 66;
    /// Bad configuration file (sysexits `EX_CONFIG`)
    pub const CONFIG: u8 = 78;
}

/// CLI errors that map to a specific exit status
#[derive(Debug)]
pub enum CliError {
    /// No source could be opened, or all sources were empty
    NoInput,
    /// Configuration file missing, unreadable or invalid
    ConfigError(String),
}

impl CliError {
    /// Exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::NoInput => exit_codes::NO_INPUT,
            CliError::ConfigError(_) => exit_codes::CONFIG,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput => write!(f, "no input"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Exit status for any error returned by a command
pub fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(exit_codes::FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_no_input_display() {
        assert_eq!(CliError::NoInput.to_string(), "no input");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(CliError::NoInput.exit_code(), 66);
        assert_eq!(CliError::ConfigError(String::new()).exit_code(), 78);
        assert_ne!(exit_codes::NO_INPUT, exit_codes::FAILURE);
        assert_ne!(exit_codes::NO_INPUT, exit_codes::USAGE);
    }

    #[test]
    fn test_exit_code_through_context() {
        let error: anyhow::Error = Err::<(), _>(CliError::NoInput)
            .context("while ranking")
            .unwrap_err();
        assert_eq!(exit_code(&error), exit_codes::NO_INPUT);
    }

    #[test]
    fn test_unknown_errors_are_generic_failures() {
        let error = anyhow::anyhow!("disk full");
        assert_eq!(exit_code(&error), exit_codes::FAILURE);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = CliError::ConfigError("bad".to_string());
        let _: &dyn std::error::Error = &error;

        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("ConfigError"));
        assert!(debug_str.contains("bad"));
    }
}
