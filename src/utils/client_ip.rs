//! Client IP extraction for click logs and mapping origins.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Returns the client IP for a request.
///
/// When `behind_proxy` is true the first address of `X-Forwarded-For` wins,
/// then `X-Real-IP`; the peer socket address is the fallback. Forwarding
/// headers are ignored otherwise since clients can forge them.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}
