//! Generator Types
//!
//! Configuration and error types shared by all generator implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default model used when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o";
/// Default sampling temperature for report generation
pub const DEFAULT_TEMPERATURE: f64 = 0.8;
/// Default output token ceiling; reports are a few thousand characters
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Configuration for a generator instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// API key; `None` means not configured yet.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Override for the chat-completions endpoint (OpenAI-compatible
    /// gateways). `None` uses the provider default.
    pub base_url: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum output tokens per report.
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Errors a generator can surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Rate limited: {message}")]
    RateLimited {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Model not found: {model}")]
    ModelNotFound { model: String },

    #[error("Server error ({status:?}): {message}")]
    ServerError {
        message: String,
        status: Option<u16>,
    },

    /// The transport dropped before the end-of-stream signal.
    #[error("Stream interrupted: {message}")]
    StreamInterrupted { message: String },

    #[error("{message}")]
    Other { message: String },
}

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.temperature, 0.8);
        assert_eq!(config.max_tokens, 3000);
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_error_display() {
        let err = GeneratorError::AuthenticationFailed {
            message: "openai: Invalid API key".to_string(),
        };
        assert!(err.to_string().contains("Authentication failed"));

        let err = GeneratorError::StreamInterrupted {
            message: "connection reset".to_string(),
        };
        assert_eq!(err.to_string(), "Stream interrupted: connection reset");
    }
}
