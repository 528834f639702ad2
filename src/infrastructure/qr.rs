//! QR code rendering for short URLs.

use std::io::Cursor;

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use serde_json::json;

use crate::error::AppError;

/// Minimum width and height of rendered codes, in pixels.
pub const QR_MIN_SIZE: u32 = 256;

/// Encodes `data` as a QR code and returns it as PNG bytes.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if `data` does not fit in a QR code or the
/// PNG encoder fails.
pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| {
        AppError::internal("QR encoding failed", json!({ "reason": e.to_string() }))
    })?;

    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_MIN_SIZE, QR_MIN_SIZE)
        .build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| {
            AppError::internal("PNG encoding failed", json!({ "reason": e.to_string() }))
        })?;

    Ok(png)
}
