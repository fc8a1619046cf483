use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The exam session is unknown, expired or already submitted.
    #[error("Session expired")]
    SessionExpired,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Audio rendering failed: {0}")]
    Audio(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Status, machine-readable code and user-facing message.
    /// Shared by the JSON API and the server-rendered pages.
    pub fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::SessionExpired => (
                StatusCode::NOT_FOUND,
                "SESSION_EXPIRED",
                "Exam session not found or expired. Generate a new exam.".to_string(),
            ),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg.clone())
            }
            AppError::Audio(msg) => {
                tracing::error!("Audio error: {msg}");
                (StatusCode::BAD_GATEWAY, "AUDIO_FAILED", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

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
    fn test_session_expired_is_404() {
        let (status, code, _) = AppError::SessionExpired.parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "SESSION_EXPIRED");
    }

    #[test]
    fn test_not_found_keeps_message() {
        let (status, code, message) = AppError::NotFound("No route for /x".to_string()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "NOT_FOUND");
        assert_eq!(message, "No route for /x");
    }

    #[test]
    fn test_validation_keeps_message() {
        let (status, _, message) = AppError::Validation("Unknown board 'X'".to_string()).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Unknown board 'X'");
    }

    #[test]
    fn test_internal_hides_details() {
        let (status, _, message) = AppError::Internal(anyhow::anyhow!("disk on fire")).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("disk"));
    }
}
