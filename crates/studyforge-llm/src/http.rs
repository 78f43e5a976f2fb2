//! Shared HTTP client construction for consistent timeout and TLS configuration.

use std::time::Duration;

/// Create the shared HTTP client used for completion-API calls.
///
/// Config: 30s connect timeout, 60s request timeout, rustls TLS,
/// `studyforge/{version}` user-agent, redirect limit 10. The request timeout
/// is the upper bound on any single completion call; expiry surfaces as
/// [`crate::LlmError::Timeout`].
#[must_use]
pub fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(60))
        .user_agent(concat!("studyforge/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("default HTTP client construction must not fail")
}
