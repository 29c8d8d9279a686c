//! Pipeline configuration

use crate::error::{PipelineError, Result};

/// Default configuration constants
pub mod defaults {
    /// Items buffered between two stages
    pub const CHANNEL_CAPACITY: usize = 256;

    /// Largest accepted queue capacity
    pub const MAX_CHANNEL_CAPACITY: usize = 1 << 20;
}

/// Runtime knobs for the threaded pipeline
///
/// The chunk width is fixed at [`crate::CHUNK_SIZE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub(crate) channel_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            channel_capacity: defaults::CHANNEL_CAPACITY,
        }
    }
}

impl PipelineConfig {
    /// Create a configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Items buffered between two stages; 0 means hand-off only
    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.channel_capacity > defaults::MAX_CHANNEL_CAPACITY {
            return Err(PipelineError::Configuration(format!(
                "channel_capacity must be at most {}",
                defaults::MAX_CHANNEL_CAPACITY
            )));
        }
        Ok(())
    }
}

/// Fluent builder for [`PipelineConfig`]
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    channel_capacity: Option<usize>,
}

impl PipelineConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-queue capacity
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = Some(capacity);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::default();

        if let Some(capacity) = self.channel_capacity {
            config.channel_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let config = PipelineConfig::default();
        assert_eq!(config.channel_capacity(), defaults::CHANNEL_CAPACITY);
        assert_eq!(PipelineConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn test_zero_capacity_is_rendezvous() {
        let config = PipelineConfig::builder().channel_capacity(0).build().unwrap();
        assert_eq!(config.channel_capacity(), 0);
    }

    #[test]
    fn test_oversized_capacity_rejected() {
        let result = PipelineConfig::builder()
            .channel_capacity(defaults::MAX_CHANNEL_CAPACITY + 1)
            .build();
        assert!(matches!(result, Err(PipelineError::Configuration(_))));
    }
}
