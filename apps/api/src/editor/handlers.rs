use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::editor::{
    self, accept_profile_image, CertificationDraft, EducationDraft, ExperienceDraft, ImageError,
    LanguageDraft, SettingsPatch, SkillDraft, ValidationError,
};
use crate::errors::AppError;
use crate::i18n::Locale;
use crate::models::{PersonalInfo, ResumeData};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddItemRequest<T> {
    pub resume: ResumeData,
    pub item: T,
}

#[derive(Debug, Deserialize)]
pub struct SetCurrentRequest {
    pub resume: ResumeData,
    pub current: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResumeOnly {
    pub resume: ResumeData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEndDateRequest {
    pub resume: ResumeData,
    pub end_date: String,
}

#[derive(Debug, Deserialize)]
pub struct SetLevelRequest {
    pub resume: ResumeData,
    pub level: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoRequest {
    pub resume: ResumeData,
    pub personal_info: PersonalInfo,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub resume: ResumeData,
    pub settings: SettingsPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetProfileImageRequest {
    pub resume: ResumeData,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadQuery {
    /// Language of rejection messages; the configured default when absent.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageResponse {
    pub profile_image: String,
}

fn locale_of(state: &AppState, data: &ResumeData) -> Locale {
    data.settings.locale_or(state.config.default_locale)
}

fn invalid(err: ValidationError, locale: Locale) -> AppError {
    AppError::Validation(err.message(locale).to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// List items
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/editor/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest<ExperienceDraft>>,
) -> Result<Json<ResumeData>, AppError> {
    let locale = locale_of(&state, &req.resume);
    editor::add_experience(&req.resume, req.item)
        .map(Json)
        .map_err(|e| invalid(e, locale))
}

/// POST /api/v1/editor/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest<EducationDraft>>,
) -> Result<Json<ResumeData>, AppError> {
    let locale = locale_of(&state, &req.resume);
    editor::add_education(&req.resume, req.item)
        .map(Json)
        .map_err(|e| invalid(e, locale))
}

/// POST /api/v1/editor/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest<SkillDraft>>,
) -> Result<Json<ResumeData>, AppError> {
    let locale = locale_of(&state, &req.resume);
    editor::add_skill(&req.resume, req.item)
        .map(Json)
        .map_err(|e| invalid(e, locale))
}

/// POST /api/v1/editor/languages
pub async fn handle_add_language(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest<LanguageDraft>>,
) -> Result<Json<ResumeData>, AppError> {
    let locale = locale_of(&state, &req.resume);
    editor::add_language(&req.resume, req.item)
        .map(Json)
        .map_err(|e| invalid(e, locale))
}

/// POST /api/v1/editor/certifications
pub async fn handle_add_certification(
    State(state): State<AppState>,
    Json(req): Json<AddItemRequest<CertificationDraft>>,
) -> Result<Json<ResumeData>, AppError> {
    let locale = locale_of(&state, &req.resume);
    editor::add_certification(&req.resume, req.item)
        .map(Json)
        .map_err(|e| invalid(e, locale))
}

/// POST /api/v1/editor/experiences/:id/current
pub async fn handle_experience_current(
    Path(id): Path<String>,
    Json(req): Json<SetCurrentRequest>,
) -> Json<ResumeData> {
    Json(editor::set_experience_current(&req.resume, &id, req.current))
}

/// POST /api/v1/editor/education/:id/current
pub async fn handle_education_current(
    Path(id): Path<String>,
    Json(req): Json<SetCurrentRequest>,
) -> Json<ResumeData> {
    Json(editor::set_education_current(&req.resume, &id, req.current))
}

/// POST /api/v1/editor/experiences/:id/end-date
pub async fn handle_experience_end_date(
    Path(id): Path<String>,
    Json(req): Json<SetEndDateRequest>,
) -> Json<ResumeData> {
    Json(editor::set_experience_end_date(&req.resume, &id, &req.end_date))
}

/// POST /api/v1/editor/education/:id/end-date
pub async fn handle_education_end_date(
    Path(id): Path<String>,
    Json(req): Json<SetEndDateRequest>,
) -> Json<ResumeData> {
    Json(editor::set_education_end_date(&req.resume, &id, &req.end_date))
}

/// POST /api/v1/editor/skills/:id/level
pub async fn handle_skill_level(
    Path(id): Path<String>,
    Json(req): Json<SetLevelRequest>,
) -> Json<ResumeData> {
    Json(editor::set_skill_level(&req.resume, &id, req.level))
}

/// POST /api/v1/editor/remove/:section/:id
pub async fn handle_remove(
    Path((section, id)): Path<(String, String)>,
    Json(req): Json<ResumeOnly>,
) -> Result<Json<ResumeData>, AppError> {
    let data = &req.resume;
    let updated = match section.as_str() {
        "experiences" => editor::remove_experience(data, &id),
        "education" => editor::remove_education(data, &id),
        "skills" => editor::remove_skill(data, &id),
        "languages" => editor::remove_language(data, &id),
        "certifications" => editor::remove_certification(data, &id),
        other => return Err(AppError::NotFound(format!("Unknown section '{other}'"))),
    };
    Ok(Json(updated))
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info and settings
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/editor/personal-info
pub async fn handle_personal_info(Json(req): Json<PersonalInfoRequest>) -> Json<ResumeData> {
    Json(editor::update_personal_info(&req.resume, req.personal_info))
}

/// POST /api/v1/editor/settings
pub async fn handle_settings(Json(req): Json<SettingsRequest>) -> Json<ResumeData> {
    Json(editor::update_settings(&req.resume, req.settings))
}

/// POST /api/v1/editor/profile-image
/// Sets the inline image on a resume; `null` removes it.
pub async fn handle_set_profile_image(Json(req): Json<SetProfileImageRequest>) -> Json<ResumeData> {
    Json(editor::set_profile_image(&req.resume, req.profile_image))
}

// ────────────────────────────────────────────────────────────────────────────
// Profile image upload
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profile-image?language=<tag> (multipart, field `file`)
pub async fn handle_profile_image(
    State(state): State<AppState>,
    Query(query): Query<UploadQuery>,
    mut multipart: Multipart,
) -> Result<Json<ProfileImageResponse>, AppError> {
    let locale = query
        .language
        .as_deref()
        .and_then(Locale::from_tag)
        .unwrap_or(state.config.default_locale);
    let limit = state.config.max_profile_image_bytes;
    let rejected = |e: ImageError| {
        tracing::info!(error = %e, "profile image rejected");
        AppError::InvalidImage(e.message(locale).to_string())
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, limit, locale))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, limit, locale))?;
        let uri = accept_profile_image(content_type.as_deref(), &bytes, limit).map_err(rejected)?;
        return Ok(Json(ProfileImageResponse { profile_image: uri }));
    }
    Err(AppError::InvalidImage("Missing multipart field 'file'".to_string()))
}

/// A body cut off by the request size limit is reported as an oversized image.
fn upload_error(err: MultipartError, limit: usize, locale: Locale) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        let too_large = ImageError::TooLarge {
            size: limit.saturating_add(1),
            limit,
        };
        tracing::info!(error = %err.body_text(), "profile image upload exceeded the body limit");
        return AppError::InvalidImage(too_large.message(locale).to_string());
    }
    AppError::InvalidImage(format!("Malformed upload: {}", err.body_text()))
}
