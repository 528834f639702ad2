//! Interstitial waiting page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::header,
    response::{IntoResponse, Response},
};

/// Browser cache lifetime of the interstitial page, in seconds (12 hours).
pub const INTERSTITIAL_CACHE_SECONDS: u64 = 12 * 60 * 60;

/// Renders `templates/interstitial.html`.
///
/// The page's script opens `/ws`, sends `key` and navigates to whatever URL
/// comes back.
#[derive(Template, WebTemplate)]
#[template(path = "interstitial.html")]
pub struct InterstitialTemplate {
    pub key: String,
}

/// Interstitial page for `key` with its cache header.
pub fn interstitial_page(key: &str) -> Response {
    (
        [(
            header::CACHE_CONTROL,
            format!("max-age={}", INTERSTITIAL_CACHE_SECONDS),
        )],
        InterstitialTemplate {
            key: key.to_string(),
        },
    )
        .into_response()
}
