//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use mirror_llm::GeneratorConfig;

/// Environment variable consulted before the config file for the API key.
pub const API_KEY_ENV: &str = "MIRROR_API_KEY";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generator API key; `MIRROR_API_KEY` takes precedence when set
    pub api_key: Option<String>,
    /// Model identifier for report generation
    pub model: String,
    /// Override for the chat-completions endpoint (OpenAI-compatible gateways)
    pub base_url: Option<String>,
    /// Sampling temperature
    pub temperature: f64,
    /// Maximum output tokens per report
    pub max_tokens: u32,
    /// Language code for CLI output (e.g., "en", "zh")
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-4o".to_string(),
            base_url: None,
            temperature: 0.8,
            max_tokens: 3000,
            language: "zh".to_string(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub language: Option<String>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(api_key) = update.api_key {
            self.api_key = Some(api_key);
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = Some(base_url);
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0.0 and 2.0",
                self.temperature
            ));
        }

        if self.max_tokens < 256 {
            return Err("max_tokens must be at least 256".to_string());
        }

        // Validate language (basic check)
        if self.language.len() < 2 || self.language.len() > 5 {
            return Err(format!("Invalid language code: {}", self.language));
        }

        Ok(())
    }

    /// Resolve the effective API key: environment first, config file second.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    /// Build the generator configuration from these settings.
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            api_key: self.resolve_api_key(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.8);
        assert_eq!(config.max_tokens, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_update() {
        let mut config = AppConfig::default();
        let update = SettingsUpdate {
            model: Some("gpt-4o-mini".to_string()),
            temperature: Some(0.5),
            ..Default::default()
        };
        config.apply_update(update);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.5);
        // Other fields should remain unchanged
        assert_eq!(config.max_tokens, 3000);
    }

    #[test]
    fn test_validate_invalid_temperature() {
        let mut config = AppConfig::default();
        config.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tiny_token_budget() {
        let mut config = AppConfig::default();
        config.max_tokens = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_generator_config_mapping() {
        let mut config = AppConfig::default();
        config.api_key = Some("sk-file".to_string());
        config.base_url = Some("http://localhost/v1".to_string());

        let gen = config.generator_config();
        assert_eq!(gen.model, "gpt-4o");
        assert_eq!(gen.base_url.as_deref(), Some("http://localhost/v1"));
        assert_eq!(gen.temperature, 0.8);
    }
}
