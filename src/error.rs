//! Application error type and its HTTP representation.
//!
//! Every registry operation returns [`AppError`]. Each variant maps to one
//! client-facing status code, so handlers can propagate errors with `?` and
//! let [`IntoResponse`] produce the JSON body:
//!
//! ```json
//! { "error": { "code": "alias_taken", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::db_error::{is_foreign_key_violation, is_unique_violation_on_code};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload carried under the `error` key.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The original URL is not an absolute http(s) URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// The custom alias violates the character set, length or reserved words.
    #[error("{message}")]
    InvalidAlias { message: String, details: Value },

    /// Expiry duration out of range or absolute expiry not in the future.
    #[error("{message}")]
    InvalidExpiry { message: String, details: Value },

    /// Generic request validation failure (pagination, body shape).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The short code is already in use, active or not.
    #[error("{message}")]
    AliasTaken { message: String, details: Value },

    /// Random generation kept colliding; the code length needs enlarging.
    #[error("{message}")]
    CodeSpaceExhausted { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The link exists but is deactivated or expired.
    #[error("{message}")]
    Gone { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_alias(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidAlias {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_expiry(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidExpiry {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn alias_taken(message: impl Into<String>, details: Value) -> Self {
        Self::AliasTaken {
            message: message.into(),
            details,
        }
    }

    pub fn code_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeSpaceExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidUrl { .. }
            | Self::InvalidAlias { .. }
            | Self::InvalidExpiry { .. }
            | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::AliasTaken { .. } => StatusCode::CONFLICT,
            Self::CodeSpaceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Gone { .. } => StatusCode::GONE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidAlias { .. } => "invalid_alias",
            Self::InvalidExpiry { .. } => "invalid_expiry",
            Self::Validation { .. } => "validation_error",
            Self::AliasTaken { .. } => "alias_taken",
            Self::CodeSpaceExhausted { .. } => "code_space_exhausted",
            Self::NotFound { .. } => "not_found",
            Self::Gone { .. } => "gone",
            Self::Internal { .. } => "internal_error",
        }
    }

    fn details(&self) -> &Value {
        match self {
            Self::InvalidUrl { details, .. }
            | Self::InvalidAlias { details, .. }
            | Self::InvalidExpiry { details, .. }
            | Self::Validation { details, .. }
            | Self::AliasTaken { details, .. }
            | Self::CodeSpaceExhausted { details, .. }
            | Self::NotFound { details, .. }
            | Self::Gone { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation_on_code(&e) {
            return AppError::alias_taken("Short code already exists", json!({}));
        }

        if is_foreign_key_violation(&e) {
            return AppError::not_found("Short link not found", json!({}));
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}
