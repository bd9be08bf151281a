//! Application error type mapping to HTTP status codes and envelope format.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use salesbrief_types::error::BriefError;

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Pipeline errors: rejected upload, blank prompt, failed completion.
    Brief(BriefError),
    /// Malformed or over-limit multipart body.
    Multipart { status: StatusCode, message: String },
    NotFound(String),
    Internal(String),
}

impl From<BriefError> for AppError {
    fn from(e: BriefError) -> Self {
        AppError::Brief(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Multipart {
            status: e.status(),
            message: e.body_text(),
        }
    }
}

impl AppError {
    /// Status, machine code and user-facing message.
    pub fn describe(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Brief(e @ BriefError::FileTooLarge { .. }) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", e.to_string())
            }
            AppError::Brief(e @ BriefError::UnsupportedFileType(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                e.to_string(),
            ),
            AppError::Brief(e @ BriefError::EmptyPrompt) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_PROMPT", e.to_string())
            }
            AppError::Brief(e @ BriefError::Completion(_)) => {
                (StatusCode::BAD_GATEWAY, "COMPLETION_FAILED", e.to_string())
            }
            AppError::Brief(e @ BriefError::Template(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR", e.to_string())
            }
            AppError::Multipart { status, message } => {
                (*status, "INVALID_MULTIPART", message.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        }
    }

    /// A blank submission is a nudge, not a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Brief(BriefError::EmptyPrompt))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.describe();
        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        }
        let request_id = uuid::Uuid::now_v7().to_string();
        ApiResponse::error(status, code, &message, request_id).into_response()
    }
}
