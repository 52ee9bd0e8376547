use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::colleges::client::CollegeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Every generation provider failed. The message is safe to show users.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An upstream dependency failed. Detail is logged, never returned.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<CollegeError> for AppError {
    fn from(err: CollegeError) -> Self {
        match err {
            CollegeError::NotFound(id) => AppError::NotFound(format!("College {id} not found")),
            other => AppError::Upstream(format!("college directory: {other}")),
        }
    }
}

/// Malformed or mistyped request bodies get the same envelope as other 400s.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Upstream(msg) => {
                tracing::error!("Upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "An upstream service failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::ServiceUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (AppError::Upstream("x".into()), StatusCode::BAD_GATEWAY),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_college_not_found_maps_to_not_found() {
        let err: AppError = CollegeError::NotFound("7".to_string()).into();
        assert!(matches!(err, AppError::NotFound(msg) if msg.contains('7')));
    }

    #[test]
    fn test_college_api_error_maps_to_upstream() {
        let err: AppError = CollegeError::Api {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Upstream(_)));
    }
}
