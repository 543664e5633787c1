use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;
use crate::style::{ColorScheme, FontChoice};

/// The whole CV being edited. Treated as an immutable value: every edit
/// produces a new `ResumeData` (see `crate::editor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
    pub settings: ResumeSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub address: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub summary: String,
    /// Inline `data:` URI, see `crate::editor::profile_image`.
    pub profile_image: Option<String>,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn website(&self) -> Option<&str> {
        non_blank(self.website.as_deref())
    }

    pub fn linkedin(&self) -> Option<&str> {
        non_blank(self.linkedin.as_deref())
    }

    pub fn profile_image(&self) -> Option<&str> {
        non_blank(self.profile_image.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

/// Skill rating, always within `1..=5`. Out-of-range input is clamped both at
/// construction and when deserializing stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: i64) -> Self {
        Self(level.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Fill fraction for proportional indicators (0.2 ..= 1.0).
    pub fn fraction(self) -> f32 {
        self.0 as f32 / Self::MAX as f32
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl From<i64> for SkillLevel {
    fn from(v: i64) -> Self {
        Self::new(v)
    }
}

impl From<SkillLevel> for u8 {
    fn from(l: SkillLevel) -> Self {
        l.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub level: Proficiency,
}

/// Language proficiency vocabulary. Stored with its French label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Proficiency {
    #[serde(rename = "Débutant")]
    Beginner,
    #[default]
    #[serde(rename = "Intermédiaire")]
    Intermediate,
    #[serde(rename = "Avancé")]
    Advanced,
    #[serde(rename = "Courant")]
    Fluent,
    #[serde(rename = "Bilingue")]
    Bilingual,
    #[serde(rename = "Natif")]
    Native,
}

impl Proficiency {
    pub const ALL: [Proficiency; 6] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Fluent,
        Proficiency::Bilingual,
        Proficiency::Native,
    ];

    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Fr, Proficiency::Beginner) => "Débutant",
            (Locale::Fr, Proficiency::Intermediate) => "Intermédiaire",
            (Locale::Fr, Proficiency::Advanced) => "Avancé",
            (Locale::Fr, Proficiency::Fluent) => "Courant",
            (Locale::Fr, Proficiency::Bilingual) => "Bilingue",
            (Locale::Fr, Proficiency::Native) => "Natif",
            (Locale::En, Proficiency::Beginner) => "Beginner",
            (Locale::En, Proficiency::Intermediate) => "Intermediate",
            (Locale::En, Proficiency::Advanced) => "Advanced",
            (Locale::En, Proficiency::Fluent) => "Fluent",
            (Locale::En, Proficiency::Bilingual) => "Bilingual",
            (Locale::En, Proficiency::Native) => "Native",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expiry: Option<String>,
}

/// Template variant. Unknown stored values deserialize to `Classic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateKind {
    #[default]
    Classic,
    Modern,
    Creative,
    Medical,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 4] = [
        TemplateKind::Classic,
        TemplateKind::Modern,
        TemplateKind::Creative,
        TemplateKind::Medical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::Classic => "classic",
            TemplateKind::Modern => "modern",
            TemplateKind::Creative => "creative",
            TemplateKind::Medical => "medical",
        }
    }
}

impl FromStr for TemplateKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "modern" => TemplateKind::Modern,
            "creative" => TemplateKind::Creative,
            "medical" => TemplateKind::Medical,
            _ => TemplateKind::Classic,
        })
    }
}

impl From<String> for TemplateKind {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<TemplateKind> for String {
    fn from(t: TemplateKind) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeSettings {
    pub template: TemplateKind,
    pub color_scheme: ColorScheme,
    pub font: FontChoice,
    /// Display-language tag (`fr`, `en`). Absent or unknown tags use the
    /// service default.
    pub language: Option<String>,
}

impl Default for ResumeSettings {
    fn default() -> Self {
        Self {
            template: TemplateKind::Classic,
            color_scheme: ColorScheme::default(),
            font: FontChoice::Default,
            language: Some(Locale::Fr.tag().to_string()),
        }
    }
}

impl ResumeSettings {
    pub fn locale_or(&self, fallback: Locale) -> Locale {
        self.language
            .as_deref()
            .and_then(Locale::from_tag)
            .unwrap_or(fallback)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-list replacement
// ────────────────────────────────────────────────────────────────────────────

impl ResumeData {
    pub fn with_personal_info(&self, personal_info: PersonalInfo) -> Self {
        Self {
            personal_info,
            ..self.clone()
        }
    }

    pub fn with_experiences(&self, experiences: Vec<Experience>) -> Self {
        Self {
            experiences,
            ..self.clone()
        }
    }

    pub fn with_education(&self, education: Vec<Education>) -> Self {
        Self {
            education,
            ..self.clone()
        }
    }

    pub fn with_skills(&self, skills: Vec<Skill>) -> Self {
        Self {
            skills,
            ..self.clone()
        }
    }

    pub fn with_languages(&self, languages: Vec<Language>) -> Self {
        Self {
            languages,
            ..self.clone()
        }
    }

    pub fn with_certifications(&self, certifications: Vec<Certification>) -> Self {
        Self {
            certifications,
            ..self.clone()
        }
    }

    pub fn with_settings(&self, settings: ResumeSettings) -> Self {
        Self {
            settings,
            ..self.clone()
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_resume_is_empty_classic_french() {
        let data = ResumeData::default();
        assert!(data.experiences.is_empty());
        assert_eq!(data.settings.template, TemplateKind::Classic);
        assert_eq!(data.settings.color_scheme.primary, "#4F46E5");
        assert_eq!(data.settings.locale_or(Locale::En), Locale::Fr);
    }

    #[test]
    fn test_skill_level_is_clamped_on_deserialize() {
        let s: Skill = serde_json::from_value(json!({"id": "a", "name": "Rust", "level": 9})).unwrap();
        assert_eq!(s.level.get(), 5);
        let s: Skill = serde_json::from_value(json!({"id": "b", "name": "Go", "level": 0})).unwrap();
        assert_eq!(s.level.get(), 1);
        assert_eq!(SkillLevel::new(-4).get(), 1);
    }

    #[test]
    fn test_unknown_template_deserializes_to_classic() {
        let s: ResumeSettings = serde_json::from_value(json!({"template": "brutalist"})).unwrap();
        assert_eq!(s.template, TemplateKind::Classic);
        let s: ResumeSettings = serde_json::from_value(json!({"template": "medical"})).unwrap();
        assert_eq!(s.template, TemplateKind::Medical);
    }

    #[test]
    fn test_camel_case_wire_layout() {
        let value = serde_json::to_value(ResumeData::default()).unwrap();
        assert!(value["personalInfo"]["firstName"].is_string());
        assert!(value["personalInfo"]["profileImage"].is_null());
        assert_eq!(value["settings"]["colorScheme"]["text"], "#1E293B");
        assert_eq!(value["settings"]["font"], "default");
    }

    #[test]
    fn test_proficiency_uses_french_wire_labels() {
        let l: Language =
            serde_json::from_value(json!({"id": "x", "name": "English", "level": "Courant"})).unwrap();
        assert_eq!(l.level, Proficiency::Fluent);
        assert_eq!(l.level.label(Locale::En), "Fluent");
        assert_eq!(serde_json::to_value(Proficiency::Native).unwrap(), json!("Natif"));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let data: ResumeData =
            serde_json::from_value(json!({"personalInfo": {"firstName": "Ada"}})).unwrap();
        assert_eq!(data.personal_info.first_name, "Ada");
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_with_skills_leaves_original_untouched() {
        let original = ResumeData::default();
        let updated = original.with_skills(vec![Skill {
            id: "s1".into(),
            name: "Rust".into(),
            level: SkillLevel::new(4),
        }]);
        assert!(original.skills.is_empty());
        assert_eq!(updated.skills.len(), 1);
    }

    #[test]
    fn test_blank_optional_contact_fields_are_hidden() {
        let info = PersonalInfo {
            website: Some("  ".into()),
            linkedin: Some("in/ada".into()),
            ..Default::default()
        };
        assert_eq!(info.website(), None);
        assert_eq!(info.linkedin(), Some("in/ada"));
    }
}
