//! Application error taxonomy and its HTTP representation.
//!
//! Core operations return [`AppError`] variants for every expected outcome
//! (bad input, unknown key, unreachable target). Only storage failures and
//! other unexpected conditions end up as [`AppError::Internal`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// JSON envelope for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Target URL failed syntactic validation (scheme, host, format).
    #[error("[{url}] does not follow a supported schema")]
    InvalidUrl { url: String },

    /// Target URL did not answer `200 OK` within the retry bound.
    #[error("[{url}] is not reachable")]
    UrlNotReachable { url: String },

    /// Requested custom word is not a non-empty alphanumeric string.
    #[error("[{word}] does not follow a supported schema")]
    InvalidCustomWord { word: String },

    /// The key is already bound to a different target.
    #[error("[{word}] is already in use")]
    CustomWordInUse { word: String },

    /// No mapping exists for the key.
    #[error("[{key}] is not known")]
    NotFound { key: String },

    /// The mapping exists but was created without a QR code.
    #[error("[{key}] has no QR code")]
    QrNotEnabled { key: String },

    /// A stored target failed reachability re-validation at resolution time.
    #[error("[{url}] is not reachable")]
    RedirectionNotReachable { url: String },

    /// Request payload rejected before reaching the core.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A uniqueness constraint rejected a write.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The task pool refused work because its queue is full.
    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status used when this error reaches a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. }
            | Self::UrlNotReachable { .. }
            | Self::InvalidCustomWord { .. }
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::CustomWordInUse { .. } | Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } | Self::QrNotEnabled { .. } => StatusCode::NOT_FOUND,
            Self::RedirectionNotReachable { .. } => StatusCode::FORBIDDEN,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code string for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::UrlNotReachable { .. } => "url_not_reachable",
            Self::InvalidCustomWord { .. } => "invalid_custom_word",
            Self::CustomWordInUse { .. } => "custom_word_in_use",
            Self::NotFound { .. } => "not_found",
            Self::QrNotEnabled { .. } => "qr_not_enabled",
            Self::RedirectionNotReachable { .. } => "redirection_not_reachable",
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::Unavailable { .. } => "service_unavailable",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into the serializable form used in response bodies.
    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            Self::InvalidUrl { url }
            | Self::UrlNotReachable { url }
            | Self::RedirectionNotReachable { url } => json!({ "url": url }),
            Self::InvalidCustomWord { word } | Self::CustomWordInUse { word } => {
                json!({ "custom_word": word })
            }
            Self::NotFound { key } | Self::QrNotEnabled { key } => json!({ "key": key }),
            Self::Validation { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details.clone(),
            Self::Unavailable { .. } => json!({}),
        };

        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Request validation failed", json!({ "fields": e.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::InvalidUrl {
                url: "ftp://x".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::CustomWordInUse { word: "abc".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound { key: "k".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::RedirectionNotReachable {
                url: "http://x".into()
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::QrNotEnabled { key: "k".into() }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::unavailable("full").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = AppError::InvalidCustomWord {
            word: "bad word".into(),
        };
        assert_eq!(err.to_string(), "[bad word] does not follow a supported schema");

        let err = AppError::NotFound {
            key: "unknown".into(),
        };
        assert_eq!(err.to_string(), "[unknown] is not known");
    }

    #[test]
    fn test_error_info_details() {
        let info = AppError::CustomWordInUse {
            word: "promo".into(),
        }
        .to_error_info();

        assert_eq!(info.code, "custom_word_in_use");
        assert_eq!(info.details["custom_word"], "promo");
    }
}
