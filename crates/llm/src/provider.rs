//! Generator Trait
//!
//! Defines the common interface for all report generators.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::{GeneratorConfig, GeneratorError, GeneratorResult};
use mirror_core::streaming::GeneratorStreamEvent;

/// Trait that all report generators must implement.
///
/// Provides a unified interface for:
/// - Streaming report generation (stream_report)
/// - Health checking
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the generator name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Stream a report for the given instruction pair.
    ///
    /// Emits [`GeneratorStreamEvent`]s on `tx` as they arrive and returns
    /// the full accumulated text after the end-of-stream signal. A dropped
    /// receiver must not abort the stream; the accumulated text is still
    /// returned.
    async fn stream_report(
        &self,
        system_instruction: &str,
        user_instruction: &str,
        tx: mpsc::Sender<GeneratorStreamEvent>,
    ) -> GeneratorResult<String>;

    /// Check if the generator is reachable and the API key is valid.
    async fn health_check(&self) -> GeneratorResult<()>;

    /// Get the configuration for this generator.
    fn config(&self) -> &GeneratorConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> GeneratorError {
    GeneratorError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> GeneratorError {
    match status {
        401 => GeneratorError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => GeneratorError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => GeneratorError::ModelNotFound {
            model: body.to_string(),
        },
        429 => GeneratorError::RateLimited {
            message: body.to_string(),
            retry_after: None,
        },
        400 => GeneratorError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => GeneratorError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => GeneratorError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_error() {
        let err = missing_api_key_error("openai");
        match err {
            GeneratorError::AuthenticationFailed { message } => {
                assert!(message.contains("openai"));
            }
            _ => panic!("Expected AuthenticationFailed"),
        }
    }

    #[test]
    fn test_parse_http_error() {
        let err = parse_http_error(401, "unauthorized", "openai");
        assert!(matches!(err, GeneratorError::AuthenticationFailed { .. }));

        let err = parse_http_error(429, "rate limited", "openai");
        assert!(matches!(err, GeneratorError::RateLimited { .. }));

        let err = parse_http_error(500, "internal error", "openai");
        assert!(matches!(err, GeneratorError::ServerError { .. }));

        let err = parse_http_error(418, "teapot", "openai");
        assert!(matches!(err, GeneratorError::Other { .. }));
    }
}
