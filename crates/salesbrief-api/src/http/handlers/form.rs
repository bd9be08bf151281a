//! The form page: `GET /` renders, `POST /run` runs the pipeline.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use salesbrief_core::collector::UploadBuffer;
use salesbrief_types::brief::{FormInput, UploadedArtifact};

use crate::http::error::AppError;
use crate::http::extractors::session::BrowserSession;
use crate::http::page::{self, Banner, PageView};
use crate::state::AppState;

/// Multipart part carrying the optional overview file.
pub const FILE_FIELD: &str = "overview_file";

/// GET / - Render the form with the session's latest result.
pub async fn index(State(state): State<AppState>, session: BrowserSession) -> Response {
    let view = PageView {
        result: state.brief_service.latest(&session.id),
        ..Default::default()
    };
    respond(&state, session, StatusCode::OK, &view)
}

/// POST /run - Collect the submission, generate, and re-render.
///
/// On any failure the page shows a banner and the previous result.
pub async fn run(
    State(state): State<AppState>,
    session: BrowserSession,
    multipart: Multipart,
) -> Response {
    let mut form = FormInput::default();

    let outcome = match read_submission(multipart, &mut form).await {
        Ok(artifact) => state
            .brief_service
            .run(session.id, form.clone(), artifact)
            .await
            .map_err(AppError::from),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => {
            let view = PageView {
                form,
                result: Some(result),
                banner: None,
            };
            respond(&state, session, StatusCode::OK, &view)
        }
        Err(err) => {
            let (status, code, message) = err.describe();
            tracing::warn!(session = %session.id, code, %message, "run did not produce a result");
            let view = PageView {
                banner: Some(Banner::from(&err)),
                result: state.brief_service.latest(&session.id),
                form,
            };
            respond(&state, session, status, &view)
        }
    }
}

/// Read the text fields into `form` and stream the file part through an
/// [`UploadBuffer`], so an oversized upload is rejected without buffering it.
///
/// Fields read before a failure stay in `form` for re-rendering.
async fn read_submission(
    mut multipart: Multipart,
    form: &mut FormInput,
) -> Result<Option<UploadedArtifact>, AppError> {
    let mut artifact = None;

    while let Some(mut field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            FILE_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mut buffer = UploadBuffer::new(file_name);
                while let Some(chunk) = field.chunk().await? {
                    buffer.push(&chunk)?;
                }
                artifact = buffer.finish();
            }
            "product_name" => form.product_name = field.text().await?,
            "product_category" => form.product_category = field.text().await?,
            "competitors" => form.competitors = field.text().await?,
            "value_proposition" => form.value_proposition = field.text().await?,
            "target_customer" => form.target_customer = field.text().await?,
            "optional_text" => {
                let text = field.text().await?;
                form.optional_text = (!text.is_empty()).then_some(text);
            }
            other => tracing::debug!(field = other, "ignoring unknown form field"),
        }
    }

    Ok(artifact)
}

fn respond(state: &AppState, session: BrowserSession, status: StatusCode, view: &PageView) -> Response {
    let invoker = state.brief_service.invoker();
    match page::render(view, invoker.provider_name(), invoker.model()) {
        Ok(html) => session.attach((status, Html(html)).into_response()),
        Err(e) => session.attach(e.into_response()),
    }
}
