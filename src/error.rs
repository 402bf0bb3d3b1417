//! Request-level error type and its HTTP mapping.
//!
//! Only two outcomes are visible to clients by default: 404 for an identifier
//! that cannot be resolved and 400 for geo metadata that fails validation.
//! Bodies are plain text and never carry internal detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("destination not found")]
    DestinationNotFound,

    #[error("invalid geo metadata: {0}")]
    InvalidGeoMetadata(#[from] ValidationErrors),

    /// Store failure surfaced as 503 under the `unavailable` policy.
    #[error("route store unavailable")]
    StoreUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DestinationNotFound => StatusCode::NOT_FOUND,
            AppError::InvalidGeoMetadata(_) => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::DestinationNotFound => "Destination not found",
            AppError::InvalidGeoMetadata(_) => "Invalid geo metadata",
            AppError::StoreUnavailable => "Service unavailable",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), self.public_message()).into_response()
    }
}
