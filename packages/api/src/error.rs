// ABOUTME: Application error type for HTTP handlers
// ABOUTME: Maps service failures and rejected request bodies onto status codes

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mindgate_core::ServiceError;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::response::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Platform or internal failure; the message already names the operation
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Wrap a service failure, prefixing non-client errors with `context`
    /// (e.g. "Failed to create agent")
    pub fn from_service(err: ServiceError, context: &str) -> Self {
        match err {
            ServiceError::Validation(e) => AppError::Validation(e.to_string()),
            ServiceError::NotFound(_) => AppError::NotFound(err.to_string()),
            other => AppError::Internal(format!("{}: {}", context, other)),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Malformed bodies, including unknown enum values, are client errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.status();

        match &self {
            AppError::Internal(msg) => {
                error!(
                    request_id = %request_id,
                    error = %msg,
                    "Request failed"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    status = %status,
                    error = %self,
                    "API error response"
                );
            }
        }

        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mindgate_core::ValidationError;

    #[test]
    fn test_service_errors_map_to_statuses() {
        let validation = AppError::from_service(
            ValidationError::new("name", "must be lowercase").into(),
            "Failed to create campaign",
        );
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            validation.to_string(),
            "Validation failed: name: must be lowercase"
        );

        let missing = AppError::from_service(
            ServiceError::not_found("Agent 'x'"),
            "Failed to get agent",
        );
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let gateway = AppError::from_service(
            ServiceError::Gateway("Query failed: engine not found".to_string()),
            "Failed to create agent",
        );
        assert_eq!(gateway.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            gateway.to_string(),
            "Failed to create agent: Query failed: engine not found"
        );
    }
}
