//! Application error type mapping to HTTP status codes and `{ "error": ... }` bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use nexchat_types::error::{ChatError, SweepError};

/// Message returned for every storage failure. The cause is logged, not sent.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Directory errors.
    Chat(ChatError),
    /// Sweep errors.
    Sweep(SweepError),
    /// Malformed request (bad query value, undecodable body).
    Validation(String),
    /// Route does not exist.
    NotFound,
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<SweepError> for AppError {
    fn from(e: SweepError) -> Self {
        AppError::Sweep(e)
    }
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Chat(ChatError::InvalidArgument(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Chat(ChatError::Unreachable) => {
                (StatusCode::BAD_REQUEST, ChatError::Unreachable.to_string())
            }
            AppError::Chat(ChatError::NotFound) => {
                (StatusCode::NOT_FOUND, ChatError::NotFound.to_string())
            }
            AppError::Chat(ChatError::StorageError(cause))
            | AppError::Sweep(SweepError::StorageError(cause)) => {
                tracing::error!(%cause, "request failed on storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::Sweep(SweepError::Unauthorized) => {
                (StatusCode::UNAUTHORIZED, SweepError::Unauthorized.to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(json!({ "error": message }))).into_response()
    }
}
