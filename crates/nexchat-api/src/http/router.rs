//! Axum router configuration with middleware.
//!
//! Directory and cron routes are served at the root and again under `/api`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes())
        .nest("/api", api_routes())
        .route("/", get(handlers::console::landing))
        .route("/health", get(handlers::console::health_check))
        .route("/crud", get(handlers::console::console))
        .route("/crud/{*rest}", get(handlers::console::console_subpath))
        .fallback(handlers::console::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/chats",
            get(handlers::chat::list_chats)
                .post(handlers::chat::create_chat)
                .put(handlers::chat::rename_chat)
                .delete(handlers::chat::delete_chat),
        )
        .route("/cron", get(handlers::cron::run_sweep))
}
