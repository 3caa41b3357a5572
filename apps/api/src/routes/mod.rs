pub mod export;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = RequestBodyLimitLayer::new(state.config.max_body_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/v1/export/preview", post(export::handle_preview))
        .route("/api/v1/export/pdf", post(export::handle_download_pdf))
        .route("/api/v1/export/docx", post(export::handle_download_docx))
        .route("/api/v1/export/layout", post(export::handle_layout))
        .layer(body_limit)
        .with_state(state)
}
