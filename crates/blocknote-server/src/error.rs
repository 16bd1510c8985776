//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use blocknote_store::StoreError;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Unauthorized (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    Internal(String),

    /// Store error.
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Store(e) => match e {
                StoreError::NotebookNotFound(_)
                | StoreError::BlockNotFound(_)
                | StoreError::UserNotFound(_) => "NOT_FOUND",
                StoreError::Validation { .. } => "VALIDATION_ERROR",
                StoreError::EmailTaken(_) => "BAD_REQUEST",
                _ => "STORAGE_ERROR",
            },
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Not-owned, nonexistent, and mis-scoped all surface as 404 here; the
    /// store never tells them apart, and neither does the API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::NotebookNotFound(_)
                | StoreError::BlockNotFound(_)
                | StoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Validation { .. } | StoreError::EmailTaken(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Field name for validation errors, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Store(StoreError::Validation { field, .. }) => Some(field),
            _ => None,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Offending field for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
                field: self.field().map(str::to_string),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_variants_map_to_404() {
        let id = Uuid::new_v4();
        for err in [
            ApiError::Store(StoreError::NotebookNotFound(id)),
            ApiError::Store(StoreError::BlockNotFound(id)),
            ApiError::NotFound("gone".into()),
        ] {
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
            assert_eq!(err.code(), "NOT_FOUND");
        }
    }

    #[test]
    fn test_validation_carries_field() {
        let err = ApiError::Store(StoreError::blank_field("name"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_error_body_shape() {
        let err = ApiError::Store(StoreError::blank_field("type"));
        let body = ErrorResponse {
            error: ErrorDetails {
                code: err.code().to_string(),
                message: err.to_string(),
                field: err.field().map(str::to_string),
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["field"], "type");
    }
}
