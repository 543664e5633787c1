pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::render::svg::FONT_ROUTE;
use crate::state::AppState;
use crate::storage::handlers as resumes;

/// Room for multipart framing and JSON around an inline image.
const BODY_OVERHEAD: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    // Inline images grow by a third once base64-encoded.
    let body_limit = state.config.max_profile_image_bytes / 3 * 4 + BODY_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog and preview
        .route("/api/v1/catalog", get(render::handle_catalog))
        .route("/api/v1/preview", post(render::handle_preview))
        .route(&format!("{FONT_ROUTE}/:file"), get(render::handle_font))
        // Editor operations
        .route("/api/v1/editor/experiences", post(editor::handle_add_experience))
        .route(
            "/api/v1/editor/experiences/:id/current",
            post(editor::handle_experience_current),
        )
        .route(
            "/api/v1/editor/experiences/:id/end-date",
            post(editor::handle_experience_end_date),
        )
        .route("/api/v1/editor/education", post(editor::handle_add_education))
        .route(
            "/api/v1/editor/education/:id/current",
            post(editor::handle_education_current),
        )
        .route(
            "/api/v1/editor/education/:id/end-date",
            post(editor::handle_education_end_date),
        )
        .route("/api/v1/editor/skills", post(editor::handle_add_skill))
        .route("/api/v1/editor/skills/:id/level", post(editor::handle_skill_level))
        .route("/api/v1/editor/languages", post(editor::handle_add_language))
        .route(
            "/api/v1/editor/certifications",
            post(editor::handle_add_certification),
        )
        .route("/api/v1/editor/remove/:section/:id", post(editor::handle_remove))
        .route("/api/v1/editor/personal-info", post(editor::handle_personal_info))
        .route("/api/v1/editor/settings", post(editor::handle_settings))
        .route(
            "/api/v1/editor/profile-image",
            post(editor::handle_set_profile_image),
        )
        .route("/api/v1/profile-image", post(editor::handle_profile_image))
        // Export
        .route("/api/v1/export", post(export::handle_export))
        .route("/api/v1/export/direct", post(export::handle_export_direct))
        // Saved resumes
        .route(
            "/api/v1/resumes",
            post(resumes::handle_save).get(resumes::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .patch(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
