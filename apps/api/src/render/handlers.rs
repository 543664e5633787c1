use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::layout::BundledFace;
use crate::models::{Proficiency, ResumeData, TemplateKind};
use crate::render::{render_resume, svg, SurfaceHandle};
use crate::state::AppState;
use crate::style::{self, ColorScheme, FontChoice, FontMapping};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub handle: SurfaceHandle,
    pub width: u32,
    pub height: u32,
    /// Catalog key of the resume's color scheme, for marking the picker.
    pub color_scheme_key: &'static str,
    pub svg: String,
}

#[derive(Debug, Serialize)]
pub struct ColorSchemeEntry {
    pub key: &'static str,
    pub scheme: ColorScheme,
}

#[derive(Debug, Serialize)]
pub struct FontEntry {
    pub key: FontChoice,
    pub mapping: FontMapping,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub templates: Vec<TemplateKind>,
    pub color_schemes: Vec<ColorSchemeEntry>,
    pub fonts: Vec<FontEntry>,
    pub language_levels: Vec<Proficiency>,
    pub default_color_scheme: &'static str,
}

/// POST /api/v1/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Result<Json<PreviewResponse>, AppError> {
    let surface = render_resume(&data, state.config.default_locale);
    let (width, height) = surface.pixel_size();
    let svg = svg::to_svg(&surface);
    let handle = state.surfaces.insert(surface);
    tracing::debug!(%handle, template = %data.settings.template, "preview rendered");
    Ok(Json(PreviewResponse {
        handle,
        width,
        height,
        color_scheme_key: style::scheme_key(&data.settings.color_scheme),
        svg,
    }))
}

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        templates: TemplateKind::ALL.to_vec(),
        color_schemes: style::color_schemes()
            .into_iter()
            .map(|(key, scheme)| ColorSchemeEntry { key, scheme })
            .collect(),
        fonts: FontChoice::ALL
            .iter()
            .map(|&key| FontEntry {
                key,
                mapping: style::font_mapping(key),
            })
            .collect(),
        language_levels: Proficiency::ALL.to_vec(),
        default_color_scheme: style::catalog::DEFAULT_SCHEME_KEY,
    })
}

/// GET /api/v1/fonts/:file
/// Serves the bundled faces named by the preview's `@font-face` rules.
pub async fn handle_font(Path(file): Path<String>) -> Result<Response, AppError> {
    let face = BundledFace::by_file(&file)
        .ok_or_else(|| AppError::NotFound(format!("Font '{file}' not found")))?;
    Ok((
        [
            (header::CONTENT_TYPE, "font/ttf"),
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        face.data(),
    )
        .into_response())
}
