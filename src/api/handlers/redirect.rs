//! Handler for short URL resolution.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;
use crate::web::interstitial::interstitial_page;

/// Resolves a key to its target.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Response
///
/// - **301 / 307** with `Location` for direct mappings, per the mapping's
///   redirect mode
/// - **200** with the interstitial page for interstitial mappings; the page
///   receives the target over `/ws` after a delay
///
/// # Click Tracking
///
/// Every successful resolution sends a click event to the bounded click
/// queue. If the queue is full, the click is dropped.
///
/// # Errors
///
/// - 404 if the key is unknown
/// - 403 if re-validation is enabled and the target stopped answering
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    let resolution = state.resolution_service.resolve(&key).await?;

    let click_event = ClickEvent::new(
        key.clone(),
        Some(client_ip(&headers, addr, state.behind_proxy)),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    if state.click_sender.try_send(click_event).is_err() {
        debug!(key = %key, "click queue full, click dropped");
    }

    if resolution.interstitial {
        return Ok(interstitial_page(&key));
    }

    let location = HeaderValue::from_str(&resolution.target).map_err(|e| {
        AppError::internal(
            "Stored target is not a valid header",
            json!({ "reason": e.to_string() }),
        )
    })?;
    let status = StatusCode::from_u16(resolution.redirect_mode.status_code())
        .unwrap_or(StatusCode::TEMPORARY_REDIRECT);

    metrics::counter!("redirects_total").increment(1);

    Ok((status, [(header::LOCATION, location)]).into_response())
}
