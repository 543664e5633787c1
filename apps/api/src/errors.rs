use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editor::{ImageError, ValidationError};
use crate::export::ExportError;
use crate::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("Rasterization failed: {0}")]
    Rasterization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<ImageError> for AppError {
    fn from(e: ImageError) -> Self {
        AppError::InvalidImage(e.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::SurfaceNotFound => AppError::SurfaceNotFound(e.to_string()),
            ExportError::Rasterize(_) | ExportError::Pdf(_) => AppError::Rasterization(e.to_string()),
            ExportError::Worker(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Conflict { .. } => AppError::Conflict(e.to_string()),
            _ => AppError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidImage(msg) => (StatusCode::BAD_REQUEST, "INVALID_IMAGE", msg.clone()),
            AppError::SurfaceNotFound(msg) => {
                (StatusCode::NOT_FOUND, "SURFACE_NOT_FOUND", msg.clone())
            }
            AppError::Rasterization(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RASTERIZATION_FAILED",
                    msg.clone(),
                )
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
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
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidImage("x".into()), StatusCode::BAD_REQUEST),
            (AppError::SurfaceNotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Rasterization("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Storage("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_surface_not_found_names_the_cause() {
        let err = AppError::SurfaceNotFound("no rendered surface for this handle".into());
        assert_eq!(
            err.to_string(),
            "Surface not found: no rendered surface for this handle"
        );
    }

    #[test]
    fn test_storage_conflict_maps_to_conflict() {
        let err: AppError = StorageError::Conflict {
            id: uuid::Uuid::nil(),
        }
        .into();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
