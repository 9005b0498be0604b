//! HTTP error responses for motospin-web
//!
//! Every failure is caught at the handler boundary and turned into a JSON
//! `{"error": ...}` body; nothing here terminates the process, and the
//! provider credential never appears in a message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Operation requires a signed-in user (401)
    #[error("Not signed in")]
    NotSignedIn,

    /// motospin-common error (status depends on the variant)
    #[error(transparent)]
    Common(#[from] motospin_common::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use motospin_common::Error;

        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotSignedIn => (
                StatusCode::UNAUTHORIZED,
                "You must be signed in to do that".to_string(),
            ),
            ApiError::Common(err) => match err {
                Error::Config(msg) => {
                    tracing::error!("Configuration error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "API key not configured".to_string(),
                    )
                }
                Error::Upstream(msg) => {
                    tracing::error!("Upstream provider error: {}", msg);
                    (
                        StatusCode::BAD_GATEWAY,
                        "Failed to fetch motorcycle data".to_string(),
                    )
                }
                Error::NoData => (
                    StatusCode::NOT_FOUND,
                    "No motorcycles found. Try again!".to_string(),
                ),
                Error::Store(msg) => {
                    tracing::error!("Favorites store error: {}", msg);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Failed to update favorites. Please try again.".to_string(),
                    )
                }
                // Identity provider messages pass through verbatim
                Error::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
                Error::Io(err) => {
                    tracing::error!("IO error: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
            ApiError::Other(err) => {
                tracing::error!("Internal error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_maps_to_500() {
        let response =
            ApiError::from(motospin_common::Error::Config("no key".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_failure_maps_to_502() {
        let response =
            ApiError::from(motospin_common::Error::Upstream("status 503".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn exhausted_spin_maps_to_404() {
        let response = ApiError::from(motospin_common::Error::NoData).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
