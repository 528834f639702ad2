//! Mapping entity: the persisted key → target association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// HTTP redirect discipline of a mapping, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectMode {
    /// `301 Moved Permanently`
    Permanent,
    /// `307 Temporary Redirect`
    #[default]
    Temporary,
}

impl RedirectMode {
    /// Status code sent for a direct redirect.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Permanent => 301,
            Self::Temporary => 307,
        }
    }

    /// Storage representation (the status code as `i16`).
    pub fn as_db(self) -> i16 {
        self.status_code() as i16
    }

    /// Parses the storage representation; unknown values fall back to temporary.
    pub fn from_db(value: i16) -> Self {
        match value {
            301 => Self::Permanent,
            _ => Self::Temporary,
        }
    }
}

/// Caller-supplied properties attached to a mapping at creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingProperties {
    pub redirect_mode: RedirectMode,
    /// `None` means "not yet evaluated".
    pub safe: Option<bool>,
    pub qr: bool,
    pub interstitial: bool,
    pub sponsor: Option<String>,
    /// IP address of the client that created the mapping.
    pub origin: Option<String>,
}

/// A short URL record.
///
/// `key`, `target`, `redirect_mode` and `interstitial_enabled` never change
/// after creation; nothing in the crate mutates a stored mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub key: String,
    pub target: String,
    pub redirect_mode: RedirectMode,
    pub safe: Option<bool>,
    pub qr_enabled: bool,
    pub interstitial_enabled: bool,
    pub sponsor: Option<String>,
    pub origin: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Mapping {
    /// Builds a new mapping from a derived key, a validated target and the
    /// caller's properties.
    pub fn new(key: String, target: String, properties: MappingProperties) -> Self {
        Self {
            key,
            target,
            redirect_mode: properties.redirect_mode,
            safe: properties.safe,
            qr_enabled: properties.qr,
            interstitial_enabled: properties.interstitial,
            sponsor: properties.sponsor,
            origin: properties.origin,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_takes_properties() {
        let props = MappingProperties {
            redirect_mode: RedirectMode::Permanent,
            safe: Some(true),
            qr: true,
            interstitial: true,
            sponsor: Some("acme".to_string()),
            origin: Some("127.0.0.1".to_string()),
        };

        let mapping = Mapping::new(
            "promo".to_string(),
            "https://example.com/".to_string(),
            props,
        );

        assert_eq!(mapping.key, "promo");
        assert_eq!(mapping.target, "https://example.com/");
        assert_eq!(mapping.redirect_mode, RedirectMode::Permanent);
        assert!(mapping.qr_enabled);
        assert!(mapping.interstitial_enabled);
        assert_eq!(mapping.sponsor.as_deref(), Some("acme"));
        assert_eq!(mapping.safe, Some(true));
    }

    #[test]
    fn test_default_properties() {
        let mapping = Mapping::new(
            "f684a3c4".to_string(),
            "http://example.com/".to_string(),
            MappingProperties::default(),
        );

        assert_eq!(mapping.redirect_mode, RedirectMode::Temporary);
        assert!(mapping.safe.is_none());
        assert!(!mapping.qr_enabled);
        assert!(!mapping.interstitial_enabled);
    }

    #[test]
    fn test_redirect_mode_db_representation() {
        assert_eq!(RedirectMode::Permanent.as_db(), 301);
        assert_eq!(RedirectMode::Temporary.as_db(), 307);
        assert_eq!(RedirectMode::from_db(301), RedirectMode::Permanent);
        assert_eq!(RedirectMode::from_db(307), RedirectMode::Temporary);
        assert_eq!(RedirectMode::from_db(302), RedirectMode::Temporary);
    }
}
