//! # API Errors
//!
//! The single place where failure kinds become HTTP status codes and
//! client-safe envelope messages. Every error is logged with its internal
//! detail before translation; the client only sees the public message.

use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::{error, warn};

use crate::observability::Event;
use crate::repository::RepositoryError;
use crate::storage::StoreError;
use crate::validation::ValidationError;

use super::response::ApiResponse;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-safe message for unexpected failures
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Handler failures
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload, id or query failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body is not parseable JSON
    #[error("Invalid JSON body")]
    InvalidJson(String),

    /// Request body exceeds the configured limit
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Query string could not be decoded
    #[error("Invalid query string")]
    InvalidQuery(String),

    /// No record at the requested id
    #[error("Lightsaber not found")]
    NotFound,

    /// No route for method and path
    #[error("Route {method} {path} not found")]
    RouteNotFound { method: String, path: String },

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Document store failed during an operation
    #[error("{operation}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    /// Panic or other unexpected failure
    #[error("An unexpected error occurred")]
    Internal(String),
}

impl ApiError {
    /// Maps a repository failure, naming the operation for store errors.
    pub fn from_repository(err: RepositoryError, operation: &'static str) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound,
            RepositoryError::Store(source) => ApiError::Store { operation, source },
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Event name this error is logged under
    pub fn event(&self) -> Event {
        match self {
            ApiError::Store { .. } => Event::StoreFailure,
            ApiError::Internal(_) => Event::UnhandledError,
            _ => Event::RequestRejected,
        }
    }

    fn log(&self, status: StatusCode) {
        let event = self.event();
        let detail = match self {
            ApiError::Store { source, .. } => source.to_string(),
            ApiError::Internal(detail)
            | ApiError::InvalidJson(detail)
            | ApiError::InvalidQuery(detail) => detail.clone(),
            other => other.to_string(),
        };

        if event.is_failure() {
            error!(
                event = %event,
                status = status.as_u16(),
                reason = %self,
                detail = %detail,
                "request failed"
            );
        } else {
            warn!(
                event = %event,
                status = status.as_u16(),
                reason = %self,
                detail = %detail,
                "request rejected"
            );
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!(rejection = %rejection.body_text(), "path parameter rejected");
        ApiError::Validation(ValidationError::invalid_id())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::InvalidJson(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        self.log(status);

        let body = Json(ApiResponse::<()>::failure(self.to_string()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Violation;

    #[test]
    fn test_status_codes() {
        let validation = ApiError::Validation(ValidationError::single(Violation::new(
            "name",
            "Name is required",
        )));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_hides_detail() {
        let err = ApiError::from_repository(
            RepositoryError::Store(StoreError::unavailable("Lock poisoned")),
            "Failed to retrieve lightsaber",
        );
        assert_eq!(err.to_string(), "Failed to retrieve lightsaber");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_passes_through() {
        let err = ApiError::from_repository(RepositoryError::NotFound, "Failed to delete lightsaber");
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(err.to_string(), "Lightsaber not found");
    }

    #[test]
    fn test_route_not_found_message() {
        let err = ApiError::RouteNotFound {
            method: "GET".into(),
            path: "/api/unknown".into(),
        };
        assert_eq!(err.to_string(), "Route GET /api/unknown not found");
    }

    #[test]
    fn test_events_by_kind() {
        assert_eq!(ApiError::Internal("boom".into()).event(), Event::UnhandledError);
        assert_eq!(
            ApiError::from_repository(
                RepositoryError::Store(StoreError::unavailable("down")),
                "Failed to create lightsaber",
            )
            .event(),
            Event::StoreFailure
        );
        assert_eq!(ApiError::NotFound.event(), Event::RequestRejected);
        assert_eq!(ApiError::PayloadTooLarge.event(), Event::RequestRejected);
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = ApiError::PayloadTooLarge;
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.to_string(), "Request body too large");
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = ApiError::Internal("index out of bounds".into());
        assert_eq!(err.to_string(), UNEXPECTED_ERROR);
    }
}
