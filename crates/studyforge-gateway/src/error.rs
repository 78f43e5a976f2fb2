use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use studyforge_document::DocumentError;
use studyforge_llm::LlmError;
use studyforge_store::StoreError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {0}: {1}")]
    Bind(String, std::io::Error),
    #[error("server error: {0}")]
    Server(String),
}

/// Request-level failure returned to the client as `{status, message}` JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Only PDF files are allowed")]
    InvalidFileType,
    #[error("File size exceeds {limit_mb}MB limit")]
    FileTooLarge { limit_mb: u64 },
    #[error("{0}")]
    BadRequest(String),
    #[error("No PDF uploaded yet. Please upload a PDF first.")]
    NoDocument,
    #[error("Error processing PDF: {0}")]
    Extraction(String),
    #[error("Error chunking text: {0}")]
    Chunking(#[from] DocumentError),
    #[error("Error storing documents: {0}")]
    Store(#[from] StoreError),
    #[error("Error from language model: {0}")]
    Llm(#[from] LlmError),
}

#[derive(serde::Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidFileType | Self::BadRequest(_) | Self::NoDocument => {
                StatusCode::BAD_REQUEST
            }
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Extraction(_) | Self::Chunking(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Llm(LlmError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            Self::Llm(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        }
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_400() {
        assert_eq!(ApiError::InvalidFileType.status_code(), 400);
        assert_eq!(ApiError::NoDocument.status_code(), 400);
        assert_eq!(ApiError::BadRequest("x".into()).status_code(), 400);
    }

    #[test]
    fn oversize_is_413() {
        assert_eq!(ApiError::FileTooLarge { limit_mb: 50 }.status_code(), 413);
    }

    #[test]
    fn processing_errors_are_500() {
        assert_eq!(ApiError::Extraction("bad pdf".into()).status_code(), 500);
        assert_eq!(
            ApiError::Chunking(DocumentError::InvalidChunking {
                chunk_size: 5,
                overlap: 7,
            })
            .status_code(),
            500
        );
    }

    #[test]
    fn llm_errors_map_to_upstream_statuses() {
        assert_eq!(ApiError::Llm(LlmError::Timeout).status_code(), 504);
        assert_eq!(ApiError::Llm(LlmError::RateLimited).status_code(), 502);
        assert_eq!(
            ApiError::Llm(LlmError::Other("boom".into())).status_code(),
            502
        );
    }

    #[test]
    fn no_document_message_matches_contract() {
        assert_eq!(
            ApiError::NoDocument.to_string(),
            "No PDF uploaded yet. Please upload a PDF first."
        );
    }
}
