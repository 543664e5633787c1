use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::errors::AppError;
use crate::export::{content_disposition, export_filename, export_surface, ExportError};
use crate::i18n::{t, Key, Locale};
use crate::models::ResumeData;
use crate::render::{render_resume, Surface, SurfaceHandle};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Used for the file name and document title only.
    pub resume: ResumeData,
    pub handle: SurfaceHandle,
}

/// POST /api/v1/export
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let locale = req.resume.settings.locale_or(state.config.default_locale);
    let surface = state
        .surfaces
        .get(&req.handle)
        .ok_or_else(|| localized(ExportError::SurfaceNotFound, locale))?;
    export(&state, &req.resume, surface, locale).await
}

/// POST /api/v1/export/direct
pub async fn handle_export_direct(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<Response, AppError> {
    let locale = data.settings.locale_or(state.config.default_locale);
    let surface = Arc::new(render_resume(&data, state.config.default_locale));
    export(&state, &data, surface, locale).await
}

async fn export(
    state: &AppState,
    data: &ResumeData,
    surface: Arc<Surface>,
    locale: Locale,
) -> Result<Response, AppError> {
    let filename = export_filename(&data.personal_info, Utc::now().date_naive());
    let title = format!("CV {}", data.personal_info.full_name()).trim().to_string();
    let pdf = export_surface(state.rasterizer.clone(), surface, title)
        .await
        .map_err(|e| localized(e, locale))?;
    tracing::info!(
        %filename,
        width = pdf.width_px,
        height = pdf.height_px,
        bytes = pdf.bytes.len(),
        "resume exported"
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(&filename)),
        ],
        pdf.bytes,
    )
        .into_response())
}

/// User-facing message for an export failure; the cause goes to the log.
fn localized(err: ExportError, locale: Locale) -> AppError {
    match err {
        ExportError::SurfaceNotFound => AppError::SurfaceNotFound(t(locale, Key::SurfaceMissing).to_string()),
        ExportError::Rasterize(ref cause) | ExportError::Pdf(ref cause) => {
            tracing::warn!(%cause, "export failed");
            AppError::Rasterization(t(locale, Key::ExportFailed).to_string())
        }
        other => other.into(),
    }
}
