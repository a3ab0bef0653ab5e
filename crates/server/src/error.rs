//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//!
//! Every error renders as `{"error": "<message>"}`. Store failures carry a
//! fixed per-route message; the underlying cause is logged and never sent to
//! the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use scout_sales_core::InsertError;

use crate::db::StoreError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing from the request body.
    #[error("Validation failed: {0}")]
    Validation(#[from] InsertError),

    /// The request body is not a JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// The query string could not be decoded.
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),

    /// A query parameter is missing or malformed.
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    /// The requested document does not exist.
    #[error("Not found: {0}")]
    NotFound(&'static str),

    /// The document store failed.
    #[error("{message} ({source})")]
    Store {
        /// Fixed message returned to the client.
        message: &'static str,
        /// Underlying failure, logged only.
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the message shown to the client.
    #[must_use]
    pub const fn store(message: &'static str, source: StoreError) -> Self {
        Self::Store { message, source }
    }

    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_)
            | Self::InvalidBody(_)
            | Self::InvalidQuery(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.message(),
            Self::BadRequest(msg) | Self::NotFound(msg) => *msg,
            Self::InvalidBody(_) => "Request body must be a JSON object.",
            Self::InvalidQuery(_) => "Invalid query parameters.",
            Self::Store { message, .. } => *message,
        }
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            // Capture server errors to Sentry
            Self::Store { message, source } => {
                let event_id = sentry::capture_error(&self);
                tracing::error!(
                    reason = %source,
                    sentry_event_id = %event_id,
                    "{message}"
                );
            }
            Self::InvalidBody(rejection) => {
                tracing::warn!(reason = %rejection, "Rejected request body");
            }
            Self::InvalidQuery(rejection) => {
                tracing::warn!(reason = %rejection, "Rejected query string");
            }
            _ => {
                tracing::warn!(error = %self, "Invalid user input");
            }
        }

        let body = ErrorBody {
            error: self.client_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
