//! Services
//!
//! Business logic services for the application: report creation/lookup and
//! the generation run orchestrator.

pub mod generation;
pub mod report;

pub use generation::{GenerationHandle, GenerationService};
pub use report::ReportService;
