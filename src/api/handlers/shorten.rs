//! Handler for link creation endpoint.

use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, CreateLinkResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Creates a short link, or returns the existing one for the same
/// `(url, custom_word)`.
///
/// # Endpoint
///
/// `POST /api/link`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/",
///   "custom_word": "promo",   // optional
///   "sponsor": "acme",        // optional
///   "qr": true,               // optional
///   "interstitial": false,    // optional
///   "permanent": false        // optional, 301 instead of 307
/// }
/// ```
///
/// # Response
///
/// `201 Created` with `Location` set to the short URL and a
/// [`CreateLinkResponse`] body.
///
/// # Errors
///
/// - 400 for an invalid URL, unreachable URL or invalid custom word
/// - 409 when the custom word is bound to another URL
/// - 503 when the reachability check cannot be scheduled
pub async fn create_link_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let origin = client_ip(&headers, addr, state.behind_proxy);

    let mapping = state
        .creation_service
        .create(
            &payload.url,
            payload.properties(origin),
            payload.custom_word(),
        )
        .await?;

    let short_url = state.short_url(&mapping.key);
    let qr_url = format!("{}/api/link/{}/qr", state.base_url, mapping.key);

    let location = HeaderValue::from_str(&short_url).map_err(|e| {
        AppError::internal("Invalid short URL", json!({ "reason": e.to_string() }))
    })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreateLinkResponse::new(&mapping, short_url, qr_url)),
    ))
}
