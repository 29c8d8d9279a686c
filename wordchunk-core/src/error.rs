//! Pipeline error types

use std::fmt;
use thiserror::Error;

/// Pipeline stages that run on their own thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Word scanner
    Scanner,
    /// Token normalizer
    Normalizer,
    /// Chunk generator
    Chunker,
}

impl Stage {
    /// Short lower-case name, also used for thread names
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scanner => "scanner",
            Stage::Normalizer => "normalizer",
            Stage::Chunker => "chunker",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that stop a pipeline run
///
/// Per-source read failures are not errors at this level; they are
/// collected as [`crate::SourceFailure`] and the run continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A stage thread could not be started
    #[error("failed to start {stage} stage: {source}")]
    Spawn {
        /// The stage that failed to start
        stage: Stage,
        /// The underlying OS error
        source: std::io::Error,
    },

    /// A stage thread panicked
    #[error("{stage} stage terminated abnormally")]
    StageFailed {
        /// The stage that panicked
        stage: Stage,
    },
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_stage_failed_display() {
        let error = PipelineError::StageFailed {
            stage: Stage::Chunker,
        };
        assert_eq!(error.to_string(), "chunker stage terminated abnormally");
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let error = PipelineError::Spawn {
            stage: Stage::Scanner,
            source: std::io::Error::other("out of threads"),
        };
        assert_eq!(
            error.to_string(),
            "failed to start scanner stage: out of threads"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_configuration_display() {
        let error = PipelineError::Configuration("bad".into());
        assert_eq!(error.to_string(), "invalid configuration: bad");
    }
}
