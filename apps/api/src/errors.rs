use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of a single document render.
///
/// A render either returns one complete buffer or one of these; there is no partial output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input has a shape the normalization rules cannot repair.
    #[error("Malformed resume document: {0}")]
    MalformedInput(String),

    /// A character has no glyph in the WinAnsi-encoded base font.
    #[error("Character {ch:?} cannot be drawn with font {font}")]
    UnsupportedGlyph { ch: char, font: &'static str },

    #[error("Failed to serialize document: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Serialization(e.to_string())
    }
}

impl From<zip::result::ZipError> for RenderError {
    fn from(e: zip::result::ZipError) -> Self {
        RenderError::Serialization(format!("zip: {e}"))
    }
}

impl From<quick_xml::Error> for RenderError {
    fn from(e: quick_xml::Error) -> Self {
        RenderError::Serialization(format!("xml: {e}"))
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::MalformedInput(msg) => AppError::MalformedInput(msg),
            other => AppError::Render(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MalformedInput(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_INPUT",
                msg.clone(),
            ),
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    format!("Document generation failed: {msg}"),
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

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_input_maps_to_unprocessable_entity() {
        let err: AppError = RenderError::MalformedInput("education".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_backend_failure_maps_to_internal_error() {
        let err: AppError = RenderError::UnsupportedGlyph {
            ch: '→',
            font: "Helvetica",
        }
        .into();
        assert!(matches!(err, AppError::Render(ref m) if m.contains("Helvetica")));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
