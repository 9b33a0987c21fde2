//! Engine tuning

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Runtime knobs for the adaptation engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on a single generator or classifier call, in seconds
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
}

impl EngineConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generation_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("engine.generation_timeout_secs"));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: default_generation_timeout(),
        }
    }
}

fn default_generation_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let config = EngineConfig::default();
        assert_eq!(config.generation_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = EngineConfig {
            generation_timeout_secs: 0,
        };
        assert!(config.validate().is_err());
    }
}
