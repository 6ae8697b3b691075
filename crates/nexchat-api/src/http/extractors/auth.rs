//! Raw `Authorization` header extractor for the sweep trigger.
//!
//! The header value is handed to `CronAuthorizer` unparsed; scheme and token
//! checks live there so the CLI and HTTP paths share them.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

/// The request's `Authorization` header, if present and valid UTF-8.
pub struct AuthorizationHeader(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for AuthorizationHeader {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(AuthorizationHeader(value))
    }
}
