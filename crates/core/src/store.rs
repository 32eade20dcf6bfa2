//! Report Store Contract
//!
//! The persistence seam of the pipeline. The application crate implements it
//! over SQLite; tests implement it in memory. The contract is deliberately
//! small: one writer per short code, create-before-generate, last write wins
//! on update.

use async_trait::async_trait;
use thiserror::Error;

use crate::profile::Profile;
use crate::report::Report;

/// Errors a store implementation can surface.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Short code collision on create.
    #[error("Short code already exists: {0}")]
    DuplicateShortCode(String),

    /// No report exists under this short code.
    #[error("Report not found: {0}")]
    NotFound(String),

    /// Anything the backend itself failed on (I/O, pool, SQL).
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for reports.
///
/// Implementations must treat `short_code` as the sole key; the generation
/// controller is the only writer of `generated_text`.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Create a report with empty generated text. Fails with
    /// [`StoreError::DuplicateShortCode`] if the code is taken.
    async fn create(&self, short_code: &str, profile: &Profile) -> StoreResult<Report>;

    /// Replace the stored text for an existing report. Fails with
    /// [`StoreError::NotFound`] if no such report exists.
    async fn update_text(&self, short_code: &str, generated_text: &str) -> StoreResult<()>;

    /// Fetch a report by short code.
    async fn get(&self, short_code: &str) -> StoreResult<Report>;
}
