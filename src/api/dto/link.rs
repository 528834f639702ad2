//! DTOs for the link creation endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Mapping, MappingProperties, RedirectMode};

/// Request to create a short link.
///
/// `url` is checked for scheme and reachability by the creation service;
/// here only sizes are bounded.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Caller-chosen key. Absent or empty means "derive from the URL".
    #[validate(length(max = 64, message = "Custom word must be at most 64 characters"))]
    pub custom_word: Option<String>,

    #[validate(length(max = 255))]
    pub sponsor: Option<String>,

    #[serde(default)]
    pub qr: bool,

    /// Deliver the target through the interstitial page instead of a redirect.
    #[serde(default)]
    pub interstitial: bool,

    /// When true, uses 301 Permanent Redirect instead of 307 Temporary.
    #[serde(default)]
    pub permanent: bool,
}

impl CreateLinkRequest {
    /// Mapping properties for this request; `origin` is the creator's IP.
    pub fn properties(&self, origin: String) -> MappingProperties {
        MappingProperties {
            redirect_mode: if self.permanent {
                RedirectMode::Permanent
            } else {
                RedirectMode::Temporary
            },
            safe: None,
            qr: self.qr,
            interstitial: self.interstitial,
            sponsor: self.sponsor.clone().filter(|s| !s.is_empty()),
            origin: Some(origin),
        }
    }

    pub fn custom_word(&self) -> &str {
        self.custom_word.as_deref().unwrap_or("")
    }
}

/// Delivery flags echoed back to the creator.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkProperties {
    pub safe: Option<bool>,
    pub interstitial: bool,
    pub qr: bool,
}

/// Response for a created (or already existing) link.
///
/// ```json
/// {
///   "url": "http://localhost:3000/f684a3c4",
///   "properties": { "safe": null, "interstitial": false, "qr": true },
///   "qr": "http://localhost:3000/api/link/f684a3c4/qr"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub url: String,
    pub properties: LinkProperties,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,
}

impl CreateLinkResponse {
    pub fn new(mapping: &Mapping, short_url: String, qr_url: String) -> Self {
        Self {
            url: short_url,
            properties: LinkProperties {
                safe: mapping.safe,
                interstitial: mapping.interstitial_enabled,
                qr: mapping.qr_enabled,
            },
            qr: mapping.qr_enabled.then_some(qr_url),
        }
    }
}
