//! GET /download - the session's latest result as a text file.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};

use salesbrief_core::presenter::{content_disposition, DOWNLOAD_MIME};

use crate::http::error::AppError;
use crate::http::extractors::session::BrowserSession;
use crate::state::AppState;

pub async fn download(
    State(state): State<AppState>,
    session: BrowserSession,
) -> Result<Response, AppError> {
    let result = state
        .brief_service
        .latest(&session.id)
        .filter(|result| !result.is_empty())
        .ok_or_else(|| AppError::NotFound("No result to download yet".to_string()))?;

    let disposition = HeaderValue::from_str(&content_disposition(&result.product_name))
        .map_err(|e| AppError::Internal(format!("invalid download header: {e}")))?;

    tracing::debug!(session = %session.id, bytes = result.text.len(), "serving download");

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(DOWNLOAD_MIME)),
            (CONTENT_DISPOSITION, disposition),
        ],
        result.text,
    )
        .into_response())
}
