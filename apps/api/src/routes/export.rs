//! Axum route handlers for the Export API.
//!
//! Each handler takes a Resume Document JSON body and returns one complete file.
//! Preview and download share `render_pdf`; only the Content-Disposition differs.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, info_span, Instrument, Span};
use uuid::Uuid;

use crate::errors::{AppError, RenderError};
use crate::layout::LayoutPlan;
use crate::models::resume::DocumentParseError;
use crate::models::ResumeDocument;
use crate::render::{
    export_file_name, layout_resume, render_docx, render_pdf, DOCX_CONTENT_TYPE, PDF_CONTENT_TYPE,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Disposition {
    Inline,
    Attachment,
}

impl Disposition {
    fn header_value(self, file_name: &str) -> String {
        let kind = match self {
            Disposition::Inline => "inline",
            Disposition::Attachment => "attachment",
        };
        format!("{kind}; filename=\"{file_name}\"")
    }
}

#[derive(Debug, Serialize)]
pub struct LayoutResponse {
    pub render_id: Uuid,
    pub page_count: usize,
    pub layout: LayoutPlan,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/export/preview
///
/// Renders the PDF for in-browser display.
pub async fn handle_preview(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let doc = parse_document(&body)?;
    export_pdf(doc, &state, Disposition::Inline).await
}

/// POST /api/v1/export/pdf
///
/// Renders the PDF as a download.
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let doc = parse_document(&body)?;
    export_pdf(doc, &state, Disposition::Attachment).await
}

/// POST /api/v1/export/docx
///
/// Renders the editable Word document as a download.
pub async fn handle_download_docx(body: Bytes) -> Result<Response, AppError> {
    let doc = parse_document(&body)?;
    let file_name = export_file_name(&doc, "docx");
    let span = info_span!("export", render_id = %Uuid::new_v4(), format = "docx");

    let bytes = run_blocking(move || render_docx(&doc))
        .instrument(span)
        .await?;

    info!(file_name = %file_name, bytes = bytes.len(), "docx export complete");
    Ok(file_response(
        bytes,
        DOCX_CONTENT_TYPE,
        Disposition::Attachment.header_value(&file_name),
    ))
}

/// POST /api/v1/export/layout
///
/// Returns the fixed-layout page plan (positioned text and rules per page) as JSON.
pub async fn handle_layout(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LayoutResponse>, AppError> {
    let doc = parse_document(&body)?;
    let render_id = Uuid::new_v4();
    let page = state.page;
    let span = info_span!("export", render_id = %render_id, format = "layout");

    let layout = run_blocking(move || layout_resume(&doc, page))
        .instrument(span.clone())
        .await?;

    span.in_scope(|| info!(pages = layout.pages.len(), "layout computed"));
    Ok(Json(LayoutResponse {
        render_id,
        page_count: layout.pages.len(),
        layout,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn parse_document(body: &[u8]) -> Result<ResumeDocument, AppError> {
    ResumeDocument::from_json(body).map_err(|e| match e {
        DocumentParseError::Syntax(msg) => {
            AppError::Validation(format!("Request body is not valid JSON: {msg}"))
        }
        DocumentParseError::Malformed(err) => err.into(),
    })
}

async fn export_pdf(
    doc: ResumeDocument,
    state: &AppState,
    disposition: Disposition,
) -> Result<Response, AppError> {
    let file_name = export_file_name(&doc, "pdf");
    let page = state.page;
    let span = info_span!("export", render_id = %Uuid::new_v4(), format = "pdf");

    let bytes = run_blocking(move || render_pdf(&doc, page))
        .instrument(span)
        .await?;

    info!(file_name = %file_name, bytes = bytes.len(), ?disposition, "pdf export complete");
    Ok(file_response(
        bytes,
        PDF_CONTENT_TYPE,
        disposition.header_value(&file_name),
    ))
}

/// Runs a CPU-bound render on the blocking pool, inside the caller's span.
async fn run_blocking<T, F>(render: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, RenderError> + Send + 'static,
{
    let span = Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        render()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))?
    .map_err(AppError::from)
}

fn file_response(bytes: Vec<u8>, content_type: &'static str, disposition: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(bytes),
    )
        .into_response()
}
