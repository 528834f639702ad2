//! Handler for usage metrics.

use axum::{Json, extract::State};

use crate::api::dto::metrics::MetricsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns how many links exist and how many resolutions were logged.
///
/// # Endpoint
///
/// `GET /api/metrics`
///
/// ```json
/// { "urls_shortened": 12, "redirections_executed": 340 }
/// ```
pub async fn metrics_handler(
    State(state): State<AppState>,
) -> Result<Json<MetricsResponse>, AppError> {
    let snapshot = state.metrics_service.snapshot().await?;
    Ok(Json(snapshot.into()))
}
