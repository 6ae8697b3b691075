//! reqwest-backed implementation of `LivenessProbe`.
//!
//! One client is shared by every probe. Timeouts are applied per request so
//! the create precheck and the sweep can use different limits.

use std::time::Duration;

use reqwest::{Method, StatusCode};

use nexchat_core::probe::{LivenessProbe, ProbeFailure, ProbeMethod};

pub struct HttpLivenessProbe {
    http: reqwest::Client,
}

impl HttpLivenessProbe {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("nexchat-liveness/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self { http }
    }
}

impl Default for HttpLivenessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl LivenessProbe for HttpLivenessProbe {
    async fn probe(
        &self,
        target: &str,
        method: ProbeMethod,
        timeout: Duration,
    ) -> Result<(), ProbeFailure> {
        let method = match method {
            ProbeMethod::Head => Method::HEAD,
            ProbeMethod::Get => Method::GET,
        };

        let response = self
            .http
            .request(method, target)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeFailure::Timeout(timeout)
                } else {
                    ProbeFailure::Request(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::trace!(%target, %status, "probe response");
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ProbeFailure::Status(status.as_u16()))
        }
    }
}
