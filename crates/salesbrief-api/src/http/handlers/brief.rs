//! Stateless JSON endpoints over the same pipeline as the form.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use salesbrief_core::presenter::download_file_name;
use salesbrief_core::prompt::TEMPLATE_VERSION;
use salesbrief_types::brief::{FormInput, UploadedArtifact};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// JSON request body: the form fields plus an optional inline overview file.
#[derive(Debug, Deserialize)]
pub struct BriefRequest {
    #[serde(flatten)]
    pub form: FormInput,
    #[serde(default)]
    pub overview_file_name: Option<String>,
    #[serde(default)]
    pub overview_file_text: Option<String>,
}

impl BriefRequest {
    fn into_parts(self) -> (FormInput, Option<UploadedArtifact>) {
        let artifact = self.overview_file_text.map(|text| {
            let name = self
                .overview_file_name
                .unwrap_or_else(|| "overview.txt".to_string());
            UploadedArtifact::new(name, text.into_bytes())
        });
        (self.form, artifact)
    }
}

/// POST /api/v1/briefs - Generate a brief.
pub async fn create_brief(
    State(state): State<AppState>,
    Json(body): Json<BriefRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (form, artifact) = body.into_parts();
    let result = state.brief_service.generate(form, artifact).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let invoker = state.brief_service.invoker();
    let data = serde_json::json!({
        "text": result.text,
        "product_name": result.product_name,
        "download_file_name": download_file_name(&result.product_name),
        "provider": invoker.provider_name(),
        "model": invoker.model(),
    });

    Ok(ApiResponse::success(data, request_id, elapsed).with_link("self", "/api/v1/briefs"))
}

/// POST /api/v1/prompt - Assemble the prompt without calling the provider.
pub async fn preview_prompt(
    State(state): State<AppState>,
    Json(body): Json<BriefRequest>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let (form, artifact) = body.into_parts();
    let prompt = state.brief_service.preview(form, artifact)?;
    let elapsed = start.elapsed().as_millis() as u64;

    let data = serde_json::json!({
        "chars": prompt.len(),
        "template_version": TEMPLATE_VERSION,
        "prompt": prompt.into_string(),
    });

    Ok(ApiResponse::success(data, request_id, elapsed).with_link("self", "/api/v1/prompt"))
}
