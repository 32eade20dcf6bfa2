//! Stream Event Types
//!
//! Provider-agnostic event types and the adapter trait for processing
//! real-time generator output. These types are shared across the LLM crate
//! (provider implementations) and the application crate (generation
//! controller, CLI).

use serde::{Deserialize, Serialize};

use crate::sections::SectionMap;

/// Unified streaming event that every provider adapter converts to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneratorStreamEvent {
    /// Text content delta from the model
    TextDelta { content: String },

    /// Error during streaming
    Error {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    },

    /// Stream complete
    Complete {
        #[serde(skip_serializing_if = "Option::is_none")]
        stop_reason: Option<String>,
    },
}

/// Progress events emitted by a generation run to its observer.
///
/// `Snapshot` is re-derived from the growing accumulator on every delta and
/// is never persisted; the terminal events carry the final section map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationEvent {
    /// The current parse of the accumulated text, for live display.
    Snapshot { sections: SectionMap, chars: usize },

    /// Stream finished and the final text was committed to the store.
    Completed {
        short_code: String,
        sections: SectionMap,
    },

    /// Stream finished but the store write failed. The text already reached
    /// the observer via snapshots; the stored report still reads as pending.
    PersistFailed {
        short_code: String,
        message: String,
        sections: SectionMap,
    },

    /// The generator errored before end-of-stream. Nothing was committed.
    Failed { message: String },
}

/// Errors that can occur during stream adaptation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AdapterError {
    /// Invalid format that couldn't be parsed
    InvalidFormat(String),
    /// JSON/data parsing error
    ParseError(String),
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            AdapterError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for AdapterError {}

/// Trait for adapting provider-specific stream formats to unified events.
pub trait StreamAdapter: Send + Sync {
    /// Returns the provider name for logging and identification.
    fn provider_name(&self) -> &'static str;

    /// Adapt a raw stream line/chunk to unified events.
    ///
    /// A single input line may produce zero, one, or multiple events.
    fn adapt(&mut self, input: &str) -> Result<Vec<GeneratorStreamEvent>, AdapterError>;

    /// Reset adapter state for a new stream.
    fn reset(&mut self) {
        // Default implementation does nothing
    }
}
