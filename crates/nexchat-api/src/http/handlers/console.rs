//! Landing, health and admin console handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde_json::{Value, json};

use crate::http::error::AppError;
use crate::state::AppState;

const CONSOLE_PAGE: &str = include_str!("../console.html");

/// GET / - Service landing document.
pub async fn landing() -> Json<Value> {
    Json(json!({
        "name": "NexChatCC",
        "description": "NexChat Community Chat API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /crud - Admin console page. Hidden in production.
pub async fn console(State(state): State<AppState>) -> Response {
    if state.config.environment.is_production() {
        return Redirect::temporary("/").into_response();
    }
    Html(CONSOLE_PAGE).into_response()
}

/// GET /crud/* - Nothing lives below the console page.
pub async fn console_subpath(State(state): State<AppState>) -> Response {
    if state.config.environment.is_production() {
        return Redirect::temporary("/").into_response();
    }
    AppError::NotFound.into_response()
}

/// Fallback for unknown routes.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
