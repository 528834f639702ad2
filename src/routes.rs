//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{key}`       - Key resolution: redirect or interstitial page
//! - `GET  /ws`          - Interstitial WebSocket channel
//! - `GET  /health`      - Health check: store, click queue, task pool
//! - `/api/*`            - REST API (rate limited)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (proxy-aware when configured)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, interstitial_ws_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the production router: all routes, rate limiting and path
/// normalization.
///
/// When `state.behind_proxy` is set, rate limiting keys on forwarded client
/// addresses instead of the peer socket address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = if state.behind_proxy {
        api::routes::routes().layer(rate_limit::proxied_layer())
    } else {
        api::routes::routes().layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(compose(state, api_router))
}

/// All routes without rate limiting or path normalization.
pub fn router(state: AppState) -> Router {
    compose(state, api::routes::routes())
}

fn compose(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ws", get(interstitial_ws_handler))
        .route("/{key}", get(redirect_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}
