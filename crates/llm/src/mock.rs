//! Mock Generator
//!
//! Deterministic in-process generator for tests and offline demos. Replays a
//! fixed script as character chunks, counts invocations, and can be told to
//! fail mid-stream.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::provider::Generator;
use super::types::{GeneratorConfig, GeneratorError, GeneratorResult};
use mirror_core::streaming::GeneratorStreamEvent;

/// Generator that replays a fixed script.
pub struct MockGenerator {
    script: String,
    chunk_size: usize,
    /// Fail after emitting this many chunks (never completes).
    fail_after: Option<usize>,
    calls: AtomicUsize,
    config: GeneratorConfig,
}

impl MockGenerator {
    /// Replay `script` in chunks of `chunk_size` characters.
    pub fn new(script: impl Into<String>, chunk_size: usize) -> Self {
        Self {
            script: script.into(),
            chunk_size: chunk_size.max(1),
            fail_after: None,
            calls: AtomicUsize::new(0),
            config: GeneratorConfig {
                model: "mock".to_string(),
                ..Default::default()
            },
        }
    }

    /// Make the stream error out after `chunks` chunks.
    pub fn failing_after(mut self, chunks: usize) -> Self {
        self.fail_after = Some(chunks);
        self
    }

    /// Number of times `stream_report` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn stream_report(
        &self,
        _system_instruction: &str,
        _user_instruction: &str,
        tx: mpsc::Sender<GeneratorStreamEvent>,
    ) -> GeneratorResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let chars: Vec<char> = self.script.chars().collect();
        let mut accumulated = String::new();

        for (idx, chunk) in chars.chunks(self.chunk_size).enumerate() {
            if self.fail_after == Some(idx) {
                let _ = tx
                    .send(GeneratorStreamEvent::Error {
                        message: "mock stream failure".to_string(),
                        code: None,
                    })
                    .await;
                return Err(GeneratorError::StreamInterrupted {
                    message: "mock stream failure".to_string(),
                });
            }

            let content: String = chunk.iter().collect();
            accumulated.push_str(&content);
            let _ = tx.send(GeneratorStreamEvent::TextDelta { content }).await;

            // Let the consumer observe intermediate snapshots.
            tokio::task::yield_now().await;
        }

        let _ = tx
            .send(GeneratorStreamEvent::Complete {
                stop_reason: Some("stop".to_string()),
            })
            .await;

        Ok(accumulated)
    }

    async fn health_check(&self) -> GeneratorResult<()> {
        Ok(())
    }

    fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
