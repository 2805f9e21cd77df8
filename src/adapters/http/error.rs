//! Error responses shared by every HTTP module.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::ports::{LlmError, StorageError};

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("not_found", message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new("provider_error", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("storage_error", message)
    }
}

/// Failure of an HTTP handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Llm(LlmError::MissingApiKey) => StatusCode::BAD_REQUEST,
            ApiError::Llm(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let body = match self {
            ApiError::Storage(_) => {
                tracing::error!(error = %message, "Request failed on storage");
                ErrorResponse::internal(message)
            }
            ApiError::NotFound(_) => ErrorResponse::not_found(message),
            ApiError::Llm(_) if status == StatusCode::BAD_GATEWAY => {
                tracing::warn!(error = %message, "Provider request failed");
                ErrorResponse::bad_gateway(message)
            }
            _ => ErrorResponse::bad_request(message),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::LlmProvider;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = ApiError::from(ValidationError::required("Model"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_api_key_is_a_bad_request() {
        assert_eq!(
            ApiError::from(LlmError::MissingApiKey).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn provider_failures_are_bad_gateway() {
        let err = ApiError::from(LlmError::provider(LlmProvider::Anthropic, "overloaded"));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ApiError::from(LlmError::NotImplemented(LlmProvider::Google));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn storage_failures_are_internal() {
        let err = ApiError::from(StorageError::read("entities", "disk gone"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_carries_error_and_message() {
        let body = serde_json::to_value(ErrorResponse::bad_request("Model is required")).unwrap();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["message"], "Model is required");
    }
}
