// Editing operations on a ResumeData value.
// Every function takes the current aggregate by reference and returns a new one;
// nothing is mutated in place, so a concurrent reader never sees a half-applied edit.

pub mod handlers;
pub mod profile_image;
pub mod validation;

use serde::Deserialize;
use uuid::Uuid;

use crate::models::{
    Certification, Education, Experience, Language, PersonalInfo, ResumeData, Skill, SkillLevel,
    TemplateKind,
};
use crate::style::{ColorScheme, FontChoice};

pub use profile_image::{accept_profile_image, ImageError};
pub use validation::{
    CertificationDraft, EducationDraft, ExperienceDraft, LanguageDraft, SkillDraft,
    ValidationError,
};

/// List items addressable by their id.
pub trait HasId {
    fn id(&self) -> &str;
}

macro_rules! impl_has_id {
    ($($ty:ty),*) => {
        $(impl HasId for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

impl_has_id!(Experience, Education, Skill, Language, Certification);

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn appended<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut out = items.to_vec();
    out.push(item);
    out
}

fn without<T: HasId + Clone>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|i| i.id() != id).cloned().collect()
}

fn map_item<T: HasId + Clone>(items: &[T], id: &str, f: impl Fn(&mut T)) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if item.id() == id {
                f(&mut item);
            }
            item
        })
        .collect()
}

fn optional(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

pub fn add_experience(data: &ResumeData, draft: ExperienceDraft) -> Result<ResumeData, ValidationError> {
    validation::validate_experience(&draft)?;
    let experience = Experience {
        id: new_id(),
        company: draft.company,
        position: draft.position,
        start_date: draft.start_date,
        end_date: if draft.current { String::new() } else { draft.end_date },
        current: draft.current,
        description: draft.description,
        achievements: draft
            .achievements
            .into_iter()
            .filter(|a| !a.trim().is_empty())
            .collect(),
    };
    Ok(data.with_experiences(appended(&data.experiences, experience)))
}

pub fn remove_experience(data: &ResumeData, id: &str) -> ResumeData {
    data.with_experiences(without(&data.experiences, id))
}

/// Toggling to `current` clears the end date.
pub fn set_experience_current(data: &ResumeData, id: &str, current: bool) -> ResumeData {
    data.with_experiences(map_item(&data.experiences, id, |e| {
        e.current = current;
        if current {
            e.end_date.clear();
        }
    }))
}

/// Ignored while the entry is marked current.
pub fn set_experience_end_date(data: &ResumeData, id: &str, end_date: &str) -> ResumeData {
    data.with_experiences(map_item(&data.experiences, id, |e| {
        if !e.current {
            e.end_date = end_date.to_string();
        }
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn add_education(data: &ResumeData, draft: EducationDraft) -> Result<ResumeData, ValidationError> {
    validation::validate_education(&draft)?;
    let education = Education {
        id: new_id(),
        institution: draft.institution,
        degree: draft.degree,
        field: draft.field,
        start_date: draft.start_date,
        end_date: if draft.current { String::new() } else { draft.end_date },
        current: draft.current,
        description: optional(draft.description),
    };
    Ok(data.with_education(appended(&data.education, education)))
}

pub fn remove_education(data: &ResumeData, id: &str) -> ResumeData {
    data.with_education(without(&data.education, id))
}

pub fn set_education_current(data: &ResumeData, id: &str, current: bool) -> ResumeData {
    data.with_education(map_item(&data.education, id, |e| {
        e.current = current;
        if current {
            e.end_date.clear();
        }
    }))
}

pub fn set_education_end_date(data: &ResumeData, id: &str, end_date: &str) -> ResumeData {
    data.with_education(map_item(&data.education, id, |e| {
        if !e.current {
            e.end_date = end_date.to_string();
        }
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills, languages, certifications
// ────────────────────────────────────────────────────────────────────────────

pub fn add_skill(data: &ResumeData, draft: SkillDraft) -> Result<ResumeData, ValidationError> {
    validation::validate_skill(&draft)?;
    let skill = Skill {
        id: new_id(),
        name: draft.name,
        level: SkillLevel::new(draft.level),
    };
    Ok(data.with_skills(appended(&data.skills, skill)))
}

pub fn remove_skill(data: &ResumeData, id: &str) -> ResumeData {
    data.with_skills(without(&data.skills, id))
}

pub fn set_skill_level(data: &ResumeData, id: &str, level: i64) -> ResumeData {
    data.with_skills(map_item(&data.skills, id, |s| s.level = SkillLevel::new(level)))
}

pub fn add_language(data: &ResumeData, draft: LanguageDraft) -> Result<ResumeData, ValidationError> {
    validation::validate_language(&draft)?;
    let language = Language {
        id: new_id(),
        name: draft.name,
        level: draft.level,
    };
    Ok(data.with_languages(appended(&data.languages, language)))
}

pub fn remove_language(data: &ResumeData, id: &str) -> ResumeData {
    data.with_languages(without(&data.languages, id))
}

pub fn add_certification(
    data: &ResumeData,
    draft: CertificationDraft,
) -> Result<ResumeData, ValidationError> {
    validation::validate_certification(&draft)?;
    let certification = Certification {
        id: new_id(),
        name: draft.name,
        issuer: draft.issuer,
        date: draft.date,
        expiry: optional(draft.expiry),
    };
    Ok(data.with_certifications(appended(&data.certifications, certification)))
}

pub fn remove_certification(data: &ResumeData, id: &str) -> ResumeData {
    data.with_certifications(without(&data.certifications, id))
}

// ────────────────────────────────────────────────────────────────────────────
// Personal info and settings
// ────────────────────────────────────────────────────────────────────────────

pub fn update_personal_info(data: &ResumeData, info: PersonalInfo) -> ResumeData {
    data.with_personal_info(info)
}

/// Sets or clears the inline profile image.
pub fn set_profile_image(data: &ResumeData, image: Option<String>) -> ResumeData {
    data.with_personal_info(PersonalInfo {
        profile_image: image,
        ..data.personal_info.clone()
    })
}

/// Partial settings update from the template / color / font / language pickers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub template: Option<TemplateKind>,
    pub color_scheme: Option<ColorScheme>,
    pub font: Option<FontChoice>,
    pub language: Option<String>,
}

pub fn update_settings(data: &ResumeData, patch: SettingsPatch) -> ResumeData {
    let mut settings = data.settings.clone();
    if let Some(template) = patch.template {
        settings.template = template;
    }
    if let Some(scheme) = patch.color_scheme {
        settings.color_scheme = scheme;
    }
    if let Some(font) = patch.font {
        settings.font = font;
    }
    if let Some(language) = patch.language {
        settings.language = Some(language);
    }
    data.with_settings(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Proficiency;
    use crate::style::color_scheme;

    fn acme_engineer(current: bool) -> ExperienceDraft {
        ExperienceDraft {
            company: "Acme".into(),
            position: "Engineer".into(),
            start_date: "Jan 2022".into(),
            end_date: "Dec 2023".into(),
            current,
            achievements: vec!["Shipped v2".into(), "  ".into(), String::new()],
            ..Default::default()
        }
    }

    #[test]
    fn test_add_current_experience_has_blank_end_date() {
        let data = add_experience(&ResumeData::default(), acme_engineer(true)).unwrap();
        assert_eq!(data.experiences.len(), 1);
        let exp = &data.experiences[0];
        assert!(exp.current);
        assert!(exp.end_date.is_empty());
        assert_eq!(exp.achievements, vec!["Shipped v2".to_string()]);
    }

    #[test]
    fn test_invalid_experience_adds_nothing() {
        let draft = ExperienceDraft {
            position: "Engineer".into(),
            ..Default::default()
        };
        let base = ResumeData::default();
        assert_eq!(
            add_experience(&base, draft),
            Err(ValidationError::MissingExperienceFields)
        );
        assert!(base.experiences.is_empty());
    }

    #[test]
    fn test_ids_are_unique_per_list() {
        let mut data = ResumeData::default();
        for _ in 0..3 {
            data = add_experience(&data, acme_engineer(false)).unwrap();
        }
        let mut ids: Vec<_> = data.experiences.iter().map(|e| e.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_toggle_current_clears_then_accepts_new_end_date() {
        let data = add_experience(&ResumeData::default(), acme_engineer(false)).unwrap();
        let id = data.experiences[0].id.clone();
        assert_eq!(data.experiences[0].end_date, "Dec 2023");

        let data = set_experience_current(&data, &id, true);
        assert!(data.experiences[0].end_date.is_empty());

        // Ignored while current.
        let data = set_experience_end_date(&data, &id, "Mar 2024");
        assert!(data.experiences[0].end_date.is_empty());

        let data = set_experience_current(&data, &id, false);
        let data = set_experience_end_date(&data, &id, "Mar 2024");
        assert!(!data.experiences[0].current);
        assert_eq!(data.experiences[0].end_date, "Mar 2024");
    }

    #[test]
    fn test_education_toggle_mirrors_experience() {
        let draft = EducationDraft {
            institution: "EPFL".into(),
            degree: "MSc".into(),
            end_date: "2020".into(),
            description: Some(" ".into()),
            ..Default::default()
        };
        let data = add_education(&ResumeData::default(), draft).unwrap();
        assert_eq!(data.education[0].description, None);
        let id = data.education[0].id.clone();
        let data = set_education_current(&data, &id, true);
        assert!(data.education[0].current);
        assert!(data.education[0].end_date.is_empty());
    }

    #[test]
    fn test_skill_level_is_clamped_at_boundary() {
        let data = add_skill(
            &ResumeData::default(),
            SkillDraft {
                name: "Rust".into(),
                level: 42,
            },
        )
        .unwrap();
        assert_eq!(data.skills[0].level.get(), 5);
        let id = data.skills[0].id.clone();
        let data = set_skill_level(&data, &id, -1);
        assert_eq!(data.skills[0].level.get(), 1);
    }

    #[test]
    fn test_remove_unknown_id_is_a_no_op() {
        let data = add_language(
            &ResumeData::default(),
            LanguageDraft {
                name: "English".into(),
                level: Proficiency::Fluent,
            },
        )
        .unwrap();
        assert_eq!(remove_language(&data, "nope"), data);
        let id = data.languages[0].id.clone();
        assert!(remove_language(&data, &id).languages.is_empty());
    }

    #[test]
    fn test_certification_blank_expiry_is_absent() {
        let data = add_certification(
            &ResumeData::default(),
            CertificationDraft {
                name: "CKA".into(),
                issuer: "CNCF".into(),
                date: "2023".into(),
                expiry: Some(String::new()),
            },
        )
        .unwrap();
        assert_eq!(data.certifications[0].expiry, None);
    }

    #[test]
    fn test_update_settings_only_touches_given_fields() {
        let base = ResumeData::default();
        let data = update_settings(
            &base,
            SettingsPatch {
                template: Some(TemplateKind::Creative),
                color_scheme: Some(color_scheme("green")),
                ..Default::default()
            },
        );
        assert_eq!(data.settings.template, TemplateKind::Creative);
        assert_eq!(data.settings.color_scheme.primary, "#10B981");
        assert_eq!(data.settings.font, base.settings.font);
        assert_eq!(data.settings.language, base.settings.language);
    }

    #[test]
    fn test_set_profile_image_preserves_other_personal_fields() {
        let base = ResumeData::default().with_personal_info(PersonalInfo {
            first_name: "Ada".into(),
            ..Default::default()
        });
        let data = set_profile_image(&base, Some("data:image/png;base64,AAAA".into()));
        assert_eq!(data.personal_info.first_name, "Ada");
        assert!(data.personal_info.profile_image.is_some());
        let data = set_profile_image(&data, None);
        assert!(data.personal_info.profile_image.is_none());
    }
}
