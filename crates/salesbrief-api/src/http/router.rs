//! Axum router configuration with middleware.
//!
//! The form lives at `/`, the JSON API under `/api/v1/`.
//! Middleware: CORS, tracing, body limits.

use axum::extract::{DefaultBodyLimit, State};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Request body ceiling for routes that carry an upload.
///
/// Well above the 2 MiB file cap so oversized files reach the upload
/// check and get the friendly rejection instead of a bare 413.
pub const MAX_REQUEST_BYTES: usize = 16 * 1024 * 1024;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/briefs", post(handlers::brief::create_brief))
        .route("/prompt", post(handlers::brief::preview_prompt))
        .layer(cors);

    Router::new()
        .route("/", get(handlers::form::index))
        .route("/run", post(handlers::form::run))
        .route("/download", get(handlers::download::download))
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness plus the configured provider.
async fn health_check(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let invoker = state.brief_service.invoker();
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": invoker.provider_name(),
        "model": invoker.model(),
    }))
}
