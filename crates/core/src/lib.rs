//! Mirror Core
//!
//! Domain model and pure pipeline stages for The Mirror workspace: the
//! questionnaire profile, the family-systems classifier, the prompt composer
//! and the report section parser, plus the contracts the application crate
//! implements (report store, streaming events). This crate has zero
//! dependencies on application-level code (database, HTTP, LLM providers).
//!
//! ## Module Organization
//!
//! - `error` - Domain error taxonomy (`ReportError`, `ReportResult`)
//! - `profile` - The nine questionnaire enums and the `Profile` aggregate
//! - `diagnosis` - The 16-entry father×mother classifier
//! - `prompt` - System/user instruction composition
//! - `sections` - Section extraction from generated text
//! - `report` - The persisted `Report` entity and its lifecycle
//! - `store` - The `ReportStore` persistence contract
//! - `streaming` - Stream event types and the adapter trait
//!
//! ## Design Principles
//!
//! 1. **Pure pipeline stages** - classifier, composer and parser are total,
//!    deterministic functions with no I/O
//! 2. **Trait-based seams** - store and stream adapters are traits so the
//!    application crate and tests can swap implementations
//! 3. **Unidirectional dependency** - this crate depends on nothing else in
//!    the workspace

pub mod diagnosis;
pub mod error;
pub mod profile;
pub mod prompt;
pub mod report;
pub mod sections;
pub mod store;
pub mod streaming;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{ReportError, ReportResult};

// ── Profile Model ──────────────────────────────────────────────────────
pub use profile::{
    ChildhoodSound, ConflictResponse, FamilyRole, FatherArchetype, Gender, LifeStage, LoopPattern,
    MotherArchetype, Profile, SocialMask,
};

// ── Classifier ─────────────────────────────────────────────────────────
pub use diagnosis::{classify, classify_raw, DiagnosisRecord, UNKNOWN_PATTERN};

// ── Prompt Composition ─────────────────────────────────────────────────
pub use prompt::{compose, exit_directive, secondary_pattern, PromptBundle, SYSTEM_PROMPT};

// ── Section Parsing ────────────────────────────────────────────────────
pub use sections::{parse, SectionMap};

// ── Report Entity & Store Contract ─────────────────────────────────────
pub use report::{Report, ReportStatus};
pub use store::{ReportStore, StoreError, StoreResult};

// ── Streaming Types ────────────────────────────────────────────────────
pub use streaming::{AdapterError, GenerationEvent, GeneratorStreamEvent, StreamAdapter};
