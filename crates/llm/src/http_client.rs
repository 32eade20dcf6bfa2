//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with the
//! timeouts report generation needs.

use std::time::Duration;

/// Connection timeout; generation requests that cannot connect fast should
/// fail fast so the caller can retry.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Build a `reqwest::Client` for streaming generation requests.
///
/// No overall request timeout is set: a report stream legitimately stays
/// open for the full generation, so only the connect phase is bounded.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .expect("failed to build reqwest client")
}
