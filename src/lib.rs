//! The Mirror - Rust Backend Library
//!
//! Report generation pipeline for The Mirror: takes a nine-answer family
//! questionnaire, classifies the parental configuration, composes bilingual
//! generator instructions, streams the model output section by section, and
//! persists the finished report under a public short code.
//!
//! - Business logic services (report lifecycle, generation orchestration)
//! - Storage layer (SQLite report store, JSON config)
//! - Data models and utilities

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use models::{AppConfig, ReportView, SettingsUpdate};
pub use services::{GenerationHandle, GenerationService, ReportService};
pub use state::AppState;
pub use storage::{ConfigService, Database};
pub use utils::error::{AppError, AppResult};
pub use utils::short_code::mint_short_code;
