//! REST API error types
//!
//! Every failure renders as `{"error": {"code", "message"}}` with a matching
//! status. Internal details go to the log, never to the client.

use hub_auth::{AuthError, ReconcileError};
use hub_db::DbError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// Shown for every failed sign-in whose cause is not the user's to fix
pub const SIGN_IN_FAILED_NOTICE: &str = "Failed to log in.";
pub const MISSING_EMAIL_NOTICE: &str = "Email not provided by Google. Cannot log in.";
pub const PERSISTENCE_NOTICE: &str =
    "An error occurred while trying to log you in. Please try again.";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "SIGN_IN_FAILED", "UNAUTHORIZED")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// The sign-in handshake or reconciliation failed (401).
    /// `notice` goes to the client, `reason` only to the log.
    #[error("Sign-in failed: {reason} {location}")]
    SignInFailed {
        notice: &'static str,
        reason: String,
        location: ErrorLocation,
    },

    /// Missing or invalid session (401)
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn sign_in_failed(notice: &'static str, reason: impl Into<String>) -> Self {
        Self::SignInFailed {
            notice,
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::SignInFailed { .. } | Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (code, message) = match self {
            ApiError::SignInFailed { notice, .. } => ("SIGN_IN_FAILED", notice.to_string()),
            ApiError::Unauthorized { message, .. } => ("UNAUTHORIZED", message),
            ApiError::NotFound { message, .. } => ("NOT_FOUND", message),
            ApiError::Internal { message, .. } => ("INTERNAL_ERROR", message),
        };

        let body = ApiErrorBody {
            code: code.to_string(),
            message,
        };
        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Session problems become 401s; provider handshake problems become a
/// failed sign-in
impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        if e.is_handshake_failure() {
            return ApiError::sign_in_failed(SIGN_IN_FAILED_NOTICE, e.to_string());
        }

        let message = match e {
            AuthError::MissingHeader { .. } => "Authentication required",
            AuthError::TokenExpired { .. } => "Session expired",
            AuthError::JwtEncode { .. } => {
                log::error!("Token signing failed: {e}");
                return ApiError::Internal {
                    message: "Could not issue token".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
            }
            _ => "Invalid session token",
        };

        log::debug!("Rejected session: {e}");
        ApiError::Unauthorized {
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ReconcileError> for ApiError {
    #[track_caller]
    fn from(e: ReconcileError) -> Self {
        let notice = match e {
            ReconcileError::MissingEmail { .. } => MISSING_EMAIL_NOTICE,
            ReconcileError::MissingSubject { .. } => SIGN_IN_FAILED_NOTICE,
            ReconcileError::Persistence { .. } => PERSISTENCE_NOTICE,
        };
        ApiError::sign_in_failed(notice, format!("{} ({})", e, e.error_code()))
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        // Don't expose internal database details to clients
        log::error!("Database error: {}", e);
        ApiError::Internal {
            message: "Database operation failed".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
