//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod report;
pub mod settings;

pub use report::*;
pub use settings::*;
