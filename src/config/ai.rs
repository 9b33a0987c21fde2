//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::OpenAIConfig;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which provider backs material generation
    #[serde(default)]
    pub provider: AiProvider,

    /// OpenAI API key
    pub openai_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    OpenAI,
    /// Canned responses; for local runs without network access
    Mock,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn has_openai(&self) -> bool {
        self.openai_api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Build the OpenAI adapter settings; `None` without an API key.
    pub fn openai(&self) -> Option<OpenAIConfig> {
        let key = self.openai_api_key.as_ref()?.expose_secret();
        if key.is_empty() {
            return None;
        }
        Some(
            OpenAIConfig::new(key.clone())
                .with_model(self.model.clone())
                .with_base_url(self.base_url.clone())
                .with_timeout(self.timeout())
                .with_max_retries(self.max_retries),
        )
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == AiProvider::OpenAI {
            let key = self
                .openai_api_key
                .as_ref()
                .map(|k| k.expose_secret().as_str())
                .filter(|k| !k.is_empty())
                .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            if !key.starts_with("sk-") {
                return Err(ValidationError::InvalidApiKey);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout("ai.timeout_secs"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> AiConfig {
        AiConfig {
            openai_api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::OpenAI);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("OPENAI_API_KEY"))
        );
        assert!(!AiConfig::default().has_openai());
    }

    #[test]
    fn test_validation_key_prefix() {
        assert_eq!(with_key("abc").validate(), Err(ValidationError::InvalidApiKey));
        assert!(with_key("sk-abc").validate().is_ok());
    }

    #[test]
    fn test_mock_provider_needs_no_key() {
        let config = AiConfig {
            provider: AiProvider::Mock,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!(config.openai().is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_key("sk-abc")
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTimeout("ai.timeout_secs"))
        );
    }

    #[test]
    fn test_openai_settings_carry_overrides() {
        let config = AiConfig {
            model: "gpt-4o".to_string(),
            max_retries: 1,
            ..with_key("sk-abc")
        };
        let openai = config.openai().unwrap();
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.max_retries, 1);
        assert_eq!(openai.timeout, Duration::from_secs(60));
    }
}
