//! Crate-wide error type.
//!
//! Every failure in this layer is recoverable: services turn an [`AppError`]
//! into a transient notice and keep their previous state.

use reqwest::StatusCode;
use serde_json::{Value, json};

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    /// Local or server-side input validation failed.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The backend could not be reached or answered with a non-success status.
    #[error("{message}")]
    Transport { message: String, details: Value },

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
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn transport(message: impl Into<String>, details: Value) -> Self {
        Self::Transport {
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

    /// Short machine-readable code, mirrors the error codes used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Transport { .. } => "transport_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Transport { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Text suitable for showing to the user in a notice.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation { .. })
    }
}

/// Maps a non-success HTTP response onto an [`AppError`].
///
/// The backend answers failures with a plain-text body, which becomes the
/// error message when present.
pub fn map_status_error(status: StatusCode, body: &str) -> AppError {
    let body = body.trim();
    let details = json!({ "status": status.as_u16() });

    match status {
        StatusCode::BAD_REQUEST => {
            let message = if body.is_empty() {
                "Request rejected by server"
            } else {
                body
            };
            AppError::bad_request(message, details)
        }
        StatusCode::NOT_FOUND => AppError::not_found("Resource not found", details),
        _ => {
            let message = if body.is_empty() {
                format!("Server responded with {status}")
            } else {
                format!("Server responded with {status}: {body}")
            };
            AppError::transport(message, details)
        }
    }
}

/// Maps a `reqwest` failure (connect, timeout, decode) onto an [`AppError`].
pub fn map_reqwest_error(base_url: &str, e: reqwest::Error) -> AppError {
    if e.is_decode() {
        return AppError::internal(
            "Malformed response from server",
            json!({ "reason": e.to_string() }),
        );
    }

    let reason = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    AppError::transport(
        format!("Cannot reach {base_url}: {reason}"),
        json!({ "reason": e.to_string() }),
    )
}
