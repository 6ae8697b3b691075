//! Liveness probe port.
//!
//! A probe issues one outbound request against a chat server and reports
//! whether it answered with exactly `200 OK` within the timeout. The HTTP
//! adapter lives in nexchat-infra.

use std::time::Duration;

use thiserror::Error;

/// HTTP method used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Head,
    Get,
}

/// Why a probe failed. Every variant counts as "not alive".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),
}

pub trait LivenessProbe: Send + Sync {
    /// Probe `target`. `Ok(())` only for a `200` response within `timeout`.
    fn probe(
        &self,
        target: &str,
        method: ProbeMethod,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<(), ProbeFailure>> + Send;
}

/// Join a chat base URL and a health path without doubling slashes.
///
/// ```
/// use nexchat_core::probe::health_target;
///
/// assert_eq!(health_target("https://a.example/", "/health"), "https://a.example/health");
/// assert_eq!(health_target("https://a.example", "health"), "https://a.example/health");
/// ```
pub fn health_target(base_url: &str, health_path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = health_path.trim_start_matches('/');
    format!("{base}/{path}")
}
