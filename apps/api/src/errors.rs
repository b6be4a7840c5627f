use axum::{
    extract::{multipart::MultipartError, rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The model answered, but not with JSON we could read. `raw` is the untouched reply.
    #[error("Malformed LLM response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON body extractor whose rejections use the `AppError` envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            // 413 when the upload exceeds the body limit, 400 otherwise
            AppError::Multipart(e) => (
                e.status(),
                "MULTIPART_ERROR",
                format!("Could not read form data: {}", e.body_text()),
            ),
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXTRACTION_ERROR",
                    "Error parsing resume file".to_string(),
                )
            }
            AppError::Llm(LlmError::EmptyContent) => {
                tracing::error!("LLM returned no content");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_EMPTY_RESPONSE",
                    "No response from the language model".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::MalformedResponse { reason, .. } => {
                tracing::error!("Malformed LLM response: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MALFORMED_LLM_RESPONSE",
                    "Error parsing the language model response".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let AppError::MalformedResponse { raw, .. } = &self {
            error["raw"] = json!(raw);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_is_client_error() {
        let (status, body) = render(AppError::Validation("Email is required".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "Email is required");
    }

    #[tokio::test]
    async fn test_malformed_response_carries_raw_text() {
        let (status, body) = render(AppError::MalformedResponse {
            reason: "EOF while parsing".into(),
            raw: "{\"Professional Skills\": {".into(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "MALFORMED_LLM_RESPONSE");
        assert_eq!(body["error"]["raw"], "{\"Professional Skills\": {");
    }

    #[tokio::test]
    async fn test_upstream_details_hidden() {
        let (status, body) = render(AppError::Llm(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-live-123".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.to_string().contains("sk-live-123"));
        assert!(body["error"].get("raw").is_none());
    }

    #[tokio::test]
    async fn test_empty_llm_content_is_server_error() {
        let (status, body) = render(AppError::Llm(LlmError::EmptyContent)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "LLM_EMPTY_RESPONSE");
    }
}
