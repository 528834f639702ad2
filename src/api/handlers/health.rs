//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: Counts mappings
/// 2. **Click Queue**: Checks if channel is open and reports capacity
/// 3. **Task Pool**: Checks if the pool accepts work and reports load
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let queue_check = check_click_queue(&state);
    let pool_check = check_task_pool(&state);

    let all_healthy = store_check.is_ok() && queue_check.is_ok() && pool_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            click_queue: queue_check,
            task_pool: pool_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    match state.mappings.count().await {
        Ok(count) => CheckStatus::ok(format!("{} mappings", count)),
        Err(e) => CheckStatus::error(format!("Store error: {}", e)),
    }
}

fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus::error("Click queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.click_sender.capacity()))
    }
}

fn check_task_pool(state: &AppState) -> CheckStatus {
    let pool = &state.task_pool;
    if pool.is_closed() {
        CheckStatus::error("Task pool is closed")
    } else {
        CheckStatus::ok(format!(
            "Active: {}/{}, queued: {}/{}",
            pool.active(),
            pool.config().workers,
            pool.queued(),
            pool.config().queue_capacity
        ))
    }
}
