//! API route configuration.

use crate::api::handlers::{create_link_handler, metrics_handler, qr_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /link`           - Create a short link
/// - `GET  /link/{key}/qr`  - PNG QR code for a key
/// - `GET  /metrics`        - Usage counters
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler))
        .route("/link/{key}/qr", get(qr_handler))
        .route("/metrics", get(metrics_handler))
}
