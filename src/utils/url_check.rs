//! Syntactic URL checks.

use url::Url;

/// Reasons a target URL is rejected before any network access.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlCheckError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` and accepts only `http`/`https` URLs with a host.
///
/// The URL is not normalized: the caller keeps the original string as the
/// mapping target and digest input.
///
/// # Errors
///
/// Returns [`UrlCheckError::InvalidFormat`] for malformed URLs,
/// [`UrlCheckError::UnsupportedProtocol`] for other schemes (`ftp:`,
/// `javascript:`, `file:`...) and [`UrlCheckError::MissingHost`] when no host
/// is present.
pub fn parse_http_url(input: &str) -> Result<Url, UrlCheckError> {
    let url = Url::parse(input).map_err(|e| UrlCheckError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlCheckError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlCheckError::MissingHost),
    }
}
