//! Drafts submitted by the form layer and the checks that gate them.

use serde::Deserialize;
use thiserror::Error;

use crate::i18n::{t, Key, Locale};
use crate::models::Proficiency;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("company and position are required")]
    MissingExperienceFields,

    #[error("institution and degree are required")]
    MissingEducationFields,

    #[error("skill name is required")]
    MissingSkillName,

    #[error("language name is required")]
    MissingLanguageName,

    #[error("certificate name and issuer are required")]
    MissingCertificationFields,
}

impl ValidationError {
    /// User-facing notice text.
    pub fn message(&self, locale: Locale) -> &'static str {
        let key = match self {
            ValidationError::MissingExperienceFields => Key::ExperienceRequired,
            ValidationError::MissingEducationFields => Key::EducationRequired,
            ValidationError::MissingSkillName => Key::SkillRequired,
            ValidationError::MissingLanguageName => Key::LanguageRequired,
            ValidationError::MissingCertificationFields => Key::CertificationRequired,
        };
        t(locale, key)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceDraft {
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationDraft {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillDraft {
    pub name: String,
    /// Raw form value; clamped into 1..=5 when the skill is created.
    pub level: i64,
}

impl Default for SkillDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 3,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageDraft {
    pub name: String,
    pub level: Proficiency,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationDraft {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry: Option<String>,
}

fn filled(s: &str) -> bool {
    !s.trim().is_empty()
}

pub fn validate_experience(draft: &ExperienceDraft) -> Result<(), ValidationError> {
    if filled(&draft.company) && filled(&draft.position) {
        Ok(())
    } else {
        Err(ValidationError::MissingExperienceFields)
    }
}

pub fn validate_education(draft: &EducationDraft) -> Result<(), ValidationError> {
    if filled(&draft.institution) && filled(&draft.degree) {
        Ok(())
    } else {
        Err(ValidationError::MissingEducationFields)
    }
}

pub fn validate_skill(draft: &SkillDraft) -> Result<(), ValidationError> {
    if filled(&draft.name) {
        Ok(())
    } else {
        Err(ValidationError::MissingSkillName)
    }
}

pub fn validate_language(draft: &LanguageDraft) -> Result<(), ValidationError> {
    if filled(&draft.name) {
        Ok(())
    } else {
        Err(ValidationError::MissingLanguageName)
    }
}

pub fn validate_certification(draft: &CertificationDraft) -> Result<(), ValidationError> {
    if filled(&draft.name) && filled(&draft.issuer) {
        Ok(())
    } else {
        Err(ValidationError::MissingCertificationFields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_requires_company_and_position() {
        let mut draft = ExperienceDraft {
            company: "Acme".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_experience(&draft),
            Err(ValidationError::MissingExperienceFields)
        );
        draft.position = "Engineer".into();
        assert!(validate_experience(&draft).is_ok());
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let draft = SkillDraft {
            name: "   ".into(),
            level: 3,
        };
        assert_eq!(validate_skill(&draft), Err(ValidationError::MissingSkillName));
    }

    #[test]
    fn test_certification_requires_issuer() {
        let draft = CertificationDraft {
            name: "CKA".into(),
            ..Default::default()
        };
        assert_eq!(
            validate_certification(&draft),
            Err(ValidationError::MissingCertificationFields)
        );
    }

    #[test]
    fn test_messages_are_localized() {
        let err = ValidationError::MissingEducationFields;
        assert_eq!(err.message(Locale::Fr), "Veuillez remplir l'établissement et le diplôme");
        assert_eq!(err.message(Locale::En), "Please fill in the institution and the degree");
    }

    #[test]
    fn test_skill_draft_defaults_to_mid_level() {
        let draft: SkillDraft = serde_json::from_str(r#"{"name":"Rust"}"#).unwrap();
        assert_eq!(draft.level, 3);
    }
}
