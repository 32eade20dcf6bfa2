//! OpenAI Generator
//!
//! Implementation of the Generator trait over OpenAI's chat-completions API
//! (and OpenAI-compatible gateways via `base_url`).

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::provider::{missing_api_key_error, parse_http_error, Generator};
use super::types::{GeneratorConfig, GeneratorError, GeneratorResult};
use crate::http_client::build_http_client;
use crate::sse::OpenAiSseAdapter;
use mirror_core::streaming::{GeneratorStreamEvent, StreamAdapter};

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI generator
pub struct OpenAiGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    /// Create a new OpenAI generator with the given configuration
    pub fn new(config: GeneratorConfig) -> Self {
        let client = build_http_client();
        Self { config, client }
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Build the streaming request body
    fn build_request_body(&self, system: &str, user: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "stream": true,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        })
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn stream_report(
        &self,
        system_instruction: &str,
        user_instruction: &str,
        tx: mpsc::Sender<GeneratorStreamEvent>,
    ) -> GeneratorResult<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(system_instruction, user_instruction);

        debug!(model = %self.config.model, "starting report stream");

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body_text = response
                .text()
                .await
                .map_err(|e| GeneratorError::NetworkError {
                    message: e.to_string(),
                })?;
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        // Process SSE stream
        let mut adapter = OpenAiSseAdapter::new();
        let mut accumulated = String::new();
        let mut completed = false;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| GeneratorError::StreamInterrupted {
                message: e.to_string(),
            })?;

            buffer.push_str(&String::from_utf8_lossy(&chunk));

            // Process complete lines
            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].to_string();
                buffer = buffer[line_end + 1..].to_string();

                if line.trim().is_empty() {
                    continue;
                }

                match adapter.adapt(&line) {
                    Ok(events) => {
                        for event in events {
                            match &event {
                                GeneratorStreamEvent::TextDelta { content } => {
                                    accumulated.push_str(content);
                                }
                                GeneratorStreamEvent::Complete { .. } => {
                                    completed = true;
                                }
                                GeneratorStreamEvent::Error { .. } => {}
                            }
                            // A gone observer must not abort the run; the
                            // accumulated text is still returned and stored.
                            let _ = tx.send(event).await;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "skipping malformed stream line");
                        let _ = tx
                            .send(GeneratorStreamEvent::Error {
                                message: e.to_string(),
                                code: None,
                            })
                            .await;
                    }
                }
            }
        }

        if !completed {
            return Err(GeneratorError::StreamInterrupted {
                message: "stream ended without completion signal".to_string(),
            });
        }

        debug!(chars = accumulated.len(), "report stream finished");

        Ok(accumulated)
    }

    async fn health_check(&self) -> GeneratorResult<()> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        // List models to verify API key
        let response = self
            .client
            .get("https://api.openai.com/v1/models")
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(())
        } else if status == 401 {
            Err(GeneratorError::AuthenticationFailed {
                message: "Invalid API key".to_string(),
            })
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status, &body, "openai"))
        }
    }

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GeneratorConfig {
        GeneratorConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_generator_creation() {
        let generator = OpenAiGenerator::new(test_config());
        assert_eq!(generator.name(), "openai");
        assert_eq!(generator.model(), "gpt-4o");
        assert_eq!(generator.base_url(), OPENAI_API_URL);
    }

    #[test]
    fn test_base_url_override() {
        let config = GeneratorConfig {
            base_url: Some("http://localhost:11434/v1/chat/completions".to_string()),
            ..test_config()
        };
        let generator = OpenAiGenerator::new(config);
        assert!(generator.base_url().starts_with("http://localhost"));
    }

    #[test]
    fn test_request_body_shape() {
        let generator = OpenAiGenerator::new(test_config());
        let body = generator.build_request_body("system text", "user text");

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["stream"], true);
        assert_eq!(body["temperature"], 0.8);
        assert_eq!(body["max_tokens"], 3000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system text");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user text");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_network() {
        let generator = OpenAiGenerator::new(GeneratorConfig::default());
        let (tx, _rx) = mpsc::channel(8);
        let err = generator.stream_report("s", "u", tx).await.unwrap_err();
        assert!(matches!(err, GeneratorError::AuthenticationFailed { .. }));
    }
}
