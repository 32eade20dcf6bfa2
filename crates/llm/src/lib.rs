//! Mirror LLM
//!
//! Streaming report generators for The Mirror:
//! - OpenAI (and OpenAI-compatible gateways via `base_url`)
//! - Mock (deterministic script replay for tests and offline demos)
//!
//! Also includes the OpenAI SSE adapter and the HTTP client factory.

pub mod http_client;
pub mod mock;
pub mod openai;
pub mod provider;
pub mod sse;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;
pub use provider::{missing_api_key_error, parse_http_error, Generator};
pub use sse::OpenAiSseAdapter;
pub use types::{GeneratorConfig, GeneratorError, GeneratorResult};
