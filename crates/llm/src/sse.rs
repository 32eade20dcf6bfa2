//! OpenAI SSE Adapter
//!
//! Converts the OpenAI chat-completions SSE wire format into unified
//! [`GeneratorStreamEvent`]s. The report pipeline only consumes text deltas
//! and the completion signal; everything else in a chunk is ignored.

use serde::Deserialize;

use mirror_core::streaming::{AdapterError, GeneratorStreamEvent, StreamAdapter};

/// Internal event types from OpenAI API SSE format
#[derive(Debug, Deserialize)]
struct OpenAiEvent {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Option<Delta>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

/// Adapter for OpenAI API SSE format
#[derive(Debug, Default)]
pub struct OpenAiSseAdapter {
    /// Set once a finish_reason or [DONE] marker has been seen.
    finished: bool,
}

impl OpenAiSseAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreamAdapter for OpenAiSseAdapter {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn adapt(&mut self, input: &str) -> Result<Vec<GeneratorStreamEvent>, AdapterError> {
        let trimmed = input.trim();

        // Handle SSE format: "data: {...}"
        let json_str = if let Some(rest) = trimmed.strip_prefix("data: ") {
            rest
        } else if trimmed.is_empty() || trimmed.starts_with(':') {
            // Keep-alive comment or blank line
            return Ok(vec![]);
        } else {
            trimmed
        };

        if json_str == "[DONE]" {
            // The finish_reason chunk already emitted Complete; [DONE] after
            // it is just the transport closing.
            if self.finished {
                return Ok(vec![]);
            }
            self.finished = true;
            return Ok(vec![GeneratorStreamEvent::Complete { stop_reason: None }]);
        }

        let event: OpenAiEvent =
            serde_json::from_str(json_str).map_err(|e| AdapterError::ParseError(e.to_string()))?;

        let mut events = vec![];

        for choice in event.choices {
            if let Some(finish_reason) = choice.finish_reason {
                self.finished = true;
                events.push(GeneratorStreamEvent::Complete {
                    stop_reason: Some(finish_reason),
                });
                continue;
            }

            if let Some(delta) = choice.delta {
                if let Some(content) = delta.content {
                    if !content.is_empty() {
                        events.push(GeneratorStreamEvent::TextDelta { content });
                    }
                }
            }
        }

        Ok(events)
    }

    fn reset(&mut self) {
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_delta() {
        let mut adapter = OpenAiSseAdapter::new();

        let events = adapter
            .adapt(r#"data: {"choices": [{"delta": {"content": "镜"}}]}"#)
            .unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            GeneratorStreamEvent::TextDelta { content } => {
                assert_eq!(content, "镜");
            }
            _ => panic!("Expected TextDelta"),
        }
    }

    #[test]
    fn test_finish_reason() {
        let mut adapter = OpenAiSseAdapter::new();

        let events = adapter
            .adapt(r#"data: {"choices": [{"finish_reason": "stop"}]}"#)
            .unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            GeneratorStreamEvent::Complete { stop_reason } => {
                assert_eq!(stop_reason, &Some("stop".to_string()));
            }
            _ => panic!("Expected Complete"),
        }
    }

    #[test]
    fn test_done_after_finish_is_silent() {
        let mut adapter = OpenAiSseAdapter::new();
        adapter
            .adapt(r#"data: {"choices": [{"finish_reason": "stop"}]}"#)
            .unwrap();
        let events = adapter.adapt("data: [DONE]").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_done_without_finish_emits_complete() {
        let mut adapter = OpenAiSseAdapter::new();
        let events = adapter.adapt("data: [DONE]").unwrap();
        assert_eq!(
            events,
            vec![GeneratorStreamEvent::Complete { stop_reason: None }]
        );
    }

    #[test]
    fn test_blank_and_comment_lines_are_ignored() {
        let mut adapter = OpenAiSseAdapter::new();
        assert!(adapter.adapt("").unwrap().is_empty());
        assert!(adapter.adapt(": keep-alive").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let mut adapter = OpenAiSseAdapter::new();
        let err = adapter.adapt("data: {not json").unwrap_err();
        assert!(matches!(err, AdapterError::ParseError(_)));
    }

    #[test]
    fn test_empty_delta_produces_no_events() {
        let mut adapter = OpenAiSseAdapter::new();
        let events = adapter
            .adapt(r#"data: {"choices": [{"delta": {}}]}"#)
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_reset_clears_finished_flag() {
        let mut adapter = OpenAiSseAdapter::new();
        adapter.adapt("data: [DONE]").unwrap();
        adapter.reset();
        let events = adapter.adapt("data: [DONE]").unwrap();
        assert_eq!(events.len(), 1);
    }
}
