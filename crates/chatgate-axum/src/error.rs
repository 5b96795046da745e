//! Axum-specific error types and mappings.
//!
//! This module provides the adapter's error type and the mappings from
//! port errors to HTTP status codes and response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use chatgate_core::ports::chat_history::ChatHistoryError;
use chatgate_core::ports::inference::InferenceError;
use chatgate_core::ports::llm_config::LlmConfigError;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (malformed input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed input with out-of-range or semantically invalid fields.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Service unavailable (inference engine missing or unreachable).
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The inference engine accepted the request but the call failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error. The message is logged, not exposed.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            HttpError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            HttpError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ChatHistoryError> for HttpError {
    fn from(err: ChatHistoryError) -> Self {
        match err {
            ChatHistoryError::ChatNotFound(id) => {
                HttpError::NotFound(format!("Chat not found: {id}"))
            }
            ChatHistoryError::InvalidRole(role) => {
                HttpError::Validation(format!("Invalid message role: {role}"))
            }
            ChatHistoryError::Database(msg) => HttpError::Internal(format!("Database: {msg}")),
        }
    }
}

impl From<LlmConfigError> for HttpError {
    fn from(err: LlmConfigError) -> Self {
        match err {
            LlmConfigError::NotFound(id) => HttpError::NotFound(format!("LLM config {id} not found")),
            LlmConfigError::DuplicateName(name) => {
                HttpError::Conflict(format!("LLM config name already exists: {name}"))
            }
            LlmConfigError::Database(msg) => HttpError::Internal(format!("Database: {msg}")),
        }
    }
}

impl From<InferenceError> for HttpError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Configuration(msg) => {
                HttpError::ServiceUnavailable(format!("Inference client misconfigured: {msg}"))
            }
            InferenceError::NoModels => {
                HttpError::ServiceUnavailable("No models available from the inference engine".into())
            }
            InferenceError::Upstream(msg) => {
                HttpError::Upstream(format!("Inference request failed: {msg}"))
            }
            InferenceError::Decode(msg) => {
                HttpError::Upstream(format!("Unexpected response from inference engine: {msg}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_expected_statuses() {
        let cases = [
            (
                HttpError::from(ChatHistoryError::ChatNotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                HttpError::from(LlmConfigError::DuplicateName("default".into())),
                StatusCode::CONFLICT,
            ),
            (
                HttpError::from(InferenceError::NoModels),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                HttpError::from(InferenceError::Upstream("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn internal_errors_hide_the_message() {
        let response = HttpError::Internal("connection string leaked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
