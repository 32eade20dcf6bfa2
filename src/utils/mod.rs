//! Utilities
//!
//! Common utilities used throughout the application.

pub mod error;
pub mod paths;
pub mod short_code;

pub use error::*;
pub use paths::*;
pub use short_code::*;
