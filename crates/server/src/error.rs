//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Business outcomes map to 4xx
//! responses with their own message; store failures are captured to Sentry,
//! logged, and answered with a generic 500.
//!
//! # Response Body
//!
//! ```json
//! { "status": 404, "message": "No wishlists found for customer with id u1" }
//! { "status": 400, "message": "Validation failed", "errors": { "customerId": "Customer ID is required" } }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use wishlist_core::{ValidationErrors, WishlistError};

/// Message returned for duplicate keys, regardless of which pair collided.
pub const DUPLICATE_MESSAGE: &str = "A record with the same key already exists.";

/// Message returned for infrastructure failures.
pub const INTERNAL_MESSAGE: &str = "An unexpected error occurred.";

/// Application-level error type for the wishlist server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A wishlist rule rejected the operation, or the store failed.
    #[error(transparent)]
    Wishlist(#[from] WishlistError),

    /// Request fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Request body or query string could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Wishlist(err) => match err {
                WishlistError::QuotaExceeded { .. } | WishlistError::DuplicateEntry(_) => {
                    StatusCode::CONFLICT
                }
                WishlistError::EntryNotFound(_) => StatusCode::NOT_FOUND,
                WishlistError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let body = match self {
            Self::Wishlist(WishlistError::Store(_)) => ErrorBody {
                status: status.as_u16(),
                message: INTERNAL_MESSAGE.to_string(),
                errors: None,
            },
            Self::Wishlist(WishlistError::DuplicateEntry(_)) => ErrorBody {
                status: status.as_u16(),
                message: DUPLICATE_MESSAGE.to_string(),
                errors: None,
            },
            Self::Validation(errors) => ErrorBody {
                status: status.as_u16(),
                message: errors.to_string(),
                errors: Some(errors),
            },
            other => ErrorBody {
                status: status.as_u16(),
                message: other.to_string(),
                errors: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
