//! Sweep trigger handler.

use axum::Json;
use axum::extract::State;

use nexchat_types::sweep::SweepSummary;

use crate::http::error::AppError;
use crate::http::extractors::auth::AuthorizationHeader;
use crate::state::AppState;

/// GET /cron - Run one liveness sweep. Requires `Authorization: Bearer <CRON_SECRET>`.
pub async fn run_sweep(
    State(state): State<AppState>,
    AuthorizationHeader(authorization): AuthorizationHeader,
) -> Result<Json<SweepSummary>, AppError> {
    let summary = state.sweeper.trigger(authorization.as_deref()).await?;
    Ok(Json(summary))
}
