//! Display-language lookup for the strings that end up on a rendered CV or in
//! a user-facing notice. The catalogue is intentionally small: only keys the
//! renderer, the editor and the persistence layer actually need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    /// Parses a language tag such as `fr`, `en`, `en-GB`. Anything else is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "fr" => Some(Locale::Fr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::Fr => "fr",
            Locale::En => "en",
        }
    }

    /// Short date used in default titles: `dd/mm/yyyy` (fr) or `mm/dd/yyyy` (en).
    pub fn short_date(self, at: DateTime<Utc>) -> String {
        match self {
            Locale::Fr => at.format("%d/%m/%Y").to_string(),
            Locale::En => at.format("%m/%d/%Y").to_string(),
        }
    }
}

/// Every string key the service can localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Contact,
    Profile,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Present,
    Expires,
    DefaultTitlePrefix,
    ExperienceRequired,
    EducationRequired,
    SkillRequired,
    LanguageRequired,
    CertificationRequired,
    ImageTooLarge,
    ImageUnsupported,
    ImageDimensions,
    SurfaceMissing,
    ExportFailed,
}

pub fn t(locale: Locale, key: Key) -> &'static str {
    use Key::*;
    match (locale, key) {
        (Locale::Fr, Contact) => "Contact",
        (Locale::En, Contact) => "Contact",
        (Locale::Fr, Profile) => "Profil",
        (Locale::En, Profile) => "Profile",
        (Locale::Fr, Experience) => "Expérience Professionnelle",
        (Locale::En, Experience) => "Professional Experience",
        (Locale::Fr, Education) => "Formation",
        (Locale::En, Education) => "Education",
        (Locale::Fr, Skills) => "Compétences",
        (Locale::En, Skills) => "Skills",
        (Locale::Fr, Languages) => "Langues",
        (Locale::En, Languages) => "Languages",
        (Locale::Fr, Certifications) => "Certifications",
        (Locale::En, Certifications) => "Certifications",
        (Locale::Fr, Present) => "Présent",
        (Locale::En, Present) => "Present",
        (Locale::Fr, Expires) => "Expire le",
        (Locale::En, Expires) => "Expires",
        (Locale::Fr, DefaultTitlePrefix) => "CV",
        (Locale::En, DefaultTitlePrefix) => "CV",
        (Locale::Fr, ExperienceRequired) => "Veuillez remplir l'entreprise et le poste",
        (Locale::En, ExperienceRequired) => "Please fill in the company and the position",
        (Locale::Fr, EducationRequired) => "Veuillez remplir l'établissement et le diplôme",
        (Locale::En, EducationRequired) => "Please fill in the institution and the degree",
        (Locale::Fr, SkillRequired) => "Veuillez entrer le nom de la compétence",
        (Locale::En, SkillRequired) => "Please enter the skill name",
        (Locale::Fr, LanguageRequired) => "Veuillez entrer le nom de la langue",
        (Locale::En, LanguageRequired) => "Please enter the language name",
        (Locale::Fr, CertificationRequired) => {
            "Veuillez remplir le nom et l'émetteur du certificat"
        }
        (Locale::En, CertificationRequired) => "Please fill in the certificate name and issuer",
        (Locale::Fr, ImageTooLarge) => "L'image est trop volumineuse. Maximum 5MB.",
        (Locale::En, ImageTooLarge) => "The image is too large. Maximum 5MB.",
        (Locale::Fr, ImageUnsupported) => "Veuillez sélectionner une image valide.",
        (Locale::En, ImageUnsupported) => "Please select a valid image.",
        (Locale::Fr, ImageDimensions) => {
            "Les dimensions de l'image sont trop grandes. Maximum 4096 pixels par côté."
        }
        (Locale::En, ImageDimensions) => "The image dimensions are too large. Maximum 4096 pixels per side.",
        (Locale::Fr, SurfaceMissing) => "Élément de CV introuvable",
        (Locale::En, SurfaceMissing) => "CV element not found",
        (Locale::Fr, ExportFailed) => "Erreur lors de la génération du PDF",
        (Locale::En, ExportFailed) => "Error while generating the PDF",
    }
}

/// `CV - <localized date>`, the title given to a saved resume when none is supplied.
pub fn default_resume_title(locale: Locale, at: DateTime<Utc>) -> String {
    format!("{} - {}", t(locale, Key::DefaultTitlePrefix), locale.short_date(at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_from_tag_accepts_regional_variants() {
        assert_eq!(Locale::from_tag("en-GB"), Some(Locale::En));
        assert_eq!(Locale::from_tag("FR"), Some(Locale::Fr));
        assert_eq!(Locale::from_tag("de"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_default_title_uses_locale_date_order() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 10, 0, 0).unwrap();
        assert_eq!(default_resume_title(Locale::Fr, at), "CV - 07/03/2024");
        assert_eq!(default_resume_title(Locale::En, at), "CV - 03/07/2024");
    }

    #[test]
    fn test_present_marker_differs_per_locale() {
        assert_eq!(t(Locale::Fr, Key::Present), "Présent");
        assert_eq!(t(Locale::En, Key::Present), "Present");
    }
}
