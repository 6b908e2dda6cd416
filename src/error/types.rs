use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::models::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

/// Upload rejected before any extraction was attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File cannot be empty")]
    Empty,

    #[error("File size of {size} bytes exceeds maximum limit of {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// The body cap tripped before the upload was fully read, so no size is known.
    #[error("Request body exceeds maximum limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Only PDF and text files are supported, got: {media_type}")]
    UnsupportedType { media_type: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Encrypted PDFs are not supported")]
    EncryptedPdf,

    #[error("Failed to process PDF file: {message}")]
    MalformedPdf { message: String },

    #[error("Failed to read uploaded content: {message}")]
    Io { message: String },
}

/// Failure reported by (or while talking to) the LLM backend.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unusable response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} client misconfigured: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("LLM provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::Empty) => "EMPTY",
            AppError::Validation(ValidationError::TooLarge { .. })
            | AppError::Validation(ValidationError::BodyTooLarge { .. }) => "TOO_LARGE",
            AppError::Validation(ValidationError::UnsupportedType { .. }) => "UNSUPPORTED_TYPE",
            AppError::Extraction(ExtractionError::EncryptedPdf) => "ENCRYPTED_PDF",
            AppError::Extraction(ExtractionError::MalformedPdf { .. }) => "MALFORMED_PDF",
            AppError::Extraction(ExtractionError::Io { .. }) => "IO_FAILURE",
            AppError::Provider(_) => "PROVIDER_ERROR",
            AppError::InvalidRequest { .. } => "INVALID_REQUEST",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(ValidationError::Empty) => StatusCode::BAD_REQUEST,
            AppError::Validation(ValidationError::TooLarge { .. })
            | AppError::Validation(ValidationError::BodyTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::Validation(ValidationError::UnsupportedType { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            AppError::Extraction(ExtractionError::EncryptedPdf) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Extraction(ExtractionError::MalformedPdf { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Extraction(ExtractionError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Provider(ProviderError::Configuration { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Provider(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = crate::middleware::current_request_id()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let timestamp = chrono::Utc::now().to_rfc3339();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                request_id = %request_id,
                error_message = %message,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                request_id = %request_id,
                error_message = %message,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: message,
            code: error_code.to_string(),
            request_id,
            timestamp,
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ExtractionError {
    fn from(err: tokio::task::JoinError) -> Self {
        ExtractionError::Io {
            message: format!("extraction task did not complete: {}", err),
        }
    }
}

impl AppError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest {
            message: message.into(),
        }
    }
}

impl ExtractionError {
    pub fn malformed(message: impl Into<String>) -> Self {
        ExtractionError::MalformedPdf {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_client_errors() {
        let empty: AppError = ValidationError::Empty.into();
        let large: AppError = ValidationError::TooLarge { size: 11, limit: 10 }.into();
        let unsupported: AppError = ValidationError::UnsupportedType {
            media_type: "image/png".into(),
        }
        .into();

        assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(unsupported.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(unsupported.error_code(), "UNSUPPORTED_TYPE");
    }

    #[test]
    fn body_cap_overflow_reports_only_the_limit() {
        let err: AppError = ValidationError::BodyTooLarge { limit: 1024 }.into();

        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_code(), "TOO_LARGE");
        assert_eq!(
            err.to_string(),
            "Request body exceeds maximum limit of 1024 bytes"
        );
    }

    #[tokio::test]
    async fn error_body_is_an_error_response() {
        let response = AppError::invalid_request("bad framing").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, "INVALID_REQUEST");
        assert_eq!(body.error, "Invalid request: bad framing");
        assert!(!body.request_id.is_empty());
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
    }

    #[test]
    fn io_failure_is_a_server_error_but_bad_pdfs_are_not() {
        let io: AppError = ExtractionError::Io { message: "boom".into() }.into();
        let encrypted: AppError = ExtractionError::EncryptedPdf.into();
        let malformed: AppError = ExtractionError::malformed("no xref").into();

        assert!(io.status_code().is_server_error());
        assert!(encrypted.status_code().is_client_error());
        assert!(malformed.status_code().is_client_error());
        assert_eq!(malformed.error_code(), "MALFORMED_PDF");
    }

    #[test]
    fn provider_failures_surface_as_bad_gateway() {
        let err: AppError = ProviderError::Status {
            provider: "openai",
            status: 429,
            body: "quota".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "PROVIDER_ERROR");
        assert!(err.to_string().contains("429"));
    }
}
