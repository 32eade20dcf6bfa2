//! Domain Error Taxonomy
//!
//! The error set of the report generation pipeline. These types are
//! dependency-free (only thiserror + std) so every workspace crate can speak
//! them; the application crate extends them with storage/IO variants that
//! require heavier dependencies.

use thiserror::Error;

/// Errors the report pipeline can surface to callers.
///
/// The classifier and the section parser are total functions and never
/// produce any of these; composition and generation do.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The profile fails its invariant (missing data or a malformed sibling
    /// sequence). Never silently patched.
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    /// A generation run is already streaming for this short code. Callers
    /// should poll the existing run instead of retrying.
    #[error("Generation already in progress for report {0}")]
    AlreadyInProgress(String),

    /// The upstream generator errored or the transport dropped before
    /// end-of-stream. The report stays pending; re-invoking generation is
    /// safe.
    #[error("Generator failed: {0}")]
    GeneratorFailed(String),

    /// The stream finished but the final text could not be persisted. The
    /// text already reached the stream consumer; the stored report still
    /// reads as pending.
    #[error("Generation succeeded but was not saved: {0}")]
    PersistFailed(String),

    /// No report exists under this short code.
    #[error("Report not found: {0}")]
    NotFound(String),

    /// Short code collision on create.
    #[error("Short code already exists: {0}")]
    DuplicateShortCode(String),
}

/// Result type alias for pipeline errors
pub type ReportResult<T> = Result<T, ReportError>;

impl ReportError {
    /// Create an invalid-profile error
    pub fn invalid_profile(msg: impl Into<String>) -> Self {
        Self::InvalidProfile(msg.into())
    }

    /// Create a generator-failed error
    pub fn generator_failed(msg: impl Into<String>) -> Self {
        Self::GeneratorFailed(msg.into())
    }

    /// Create a persist-failed error
    pub fn persist_failed(msg: impl Into<String>) -> Self {
        Self::PersistFailed(msg.into())
    }
}

impl From<ReportError> for String {
    fn from(err: ReportError) -> String {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::invalid_profile("no 'Me' entry");
        assert_eq!(err.to_string(), "Invalid profile: no 'Me' entry");
    }

    #[test]
    fn test_already_in_progress_names_the_code() {
        let err = ReportError::AlreadyInProgress("MR-TEST-0001".to_string());
        assert!(err.to_string().contains("MR-TEST-0001"));
    }

    #[test]
    fn test_error_conversion() {
        let err = ReportError::generator_failed("stream reset");
        let msg: String = err.into();
        assert!(msg.contains("Generator failed"));
    }
}
