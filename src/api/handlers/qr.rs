//! Handler serving QR codes for short URLs.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::error::AppError;
use crate::infrastructure::qr::render_png;
use crate::state::AppState;

/// Returns a PNG QR code encoding the short URL of `key`.
///
/// # Endpoint
///
/// `GET /api/link/{key}/qr`
///
/// # Errors
///
/// - 404 `not_found` if the key is unknown
/// - 404 `qr_not_enabled` if the mapping was created without a QR code
pub async fn qr_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !state.resolution_service.is_qr_enabled(&key).await? {
        return Err(AppError::QrNotEnabled { key });
    }

    let png = render_png(&state.short_url(&key))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}
