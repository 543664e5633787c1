//! Fixed catalogs of color schemes and font mappings.
//!
//! The preview, the pickers exposed by `/api/v1/catalog`, and the export
//! pipeline all index into these same tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::layout::{FontFamily, FontWeight};
use crate::style::color::Rgb;

// ────────────────────────────────────────────────────────────────────────────
// Color schemes
// ────────────────────────────────────────────────────────────────────────────

/// A 5-role palette as stored in `ResumeData.settings.colorScheme`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

struct SchemeEntry {
    key: &'static str,
    primary: &'static str,
    secondary: &'static str,
    accent: &'static str,
    background: &'static str,
    text: &'static str,
}

impl SchemeEntry {
    fn to_scheme(&self) -> ColorScheme {
        ColorScheme {
            primary: self.primary.to_string(),
            secondary: self.secondary.to_string(),
            accent: self.accent.to_string(),
            background: self.background.to_string(),
            text: self.text.to_string(),
        }
    }
}

pub const DEFAULT_SCHEME_KEY: &str = "indigo";

static COLOR_SCHEMES: [SchemeEntry; 5] = [
    SchemeEntry {
        key: "indigo",
        primary: "#4F46E5",
        secondary: "#06B6D4",
        accent: "#8B5CF6",
        background: "#FFFFFF",
        text: "#1E293B",
    },
    SchemeEntry {
        key: "green",
        primary: "#10B981",
        secondary: "#059669",
        accent: "#06B6D4",
        background: "#FFFFFF",
        text: "#1E293B",
    },
    SchemeEntry {
        key: "orange",
        primary: "#F97316",
        secondary: "#EA580C",
        accent: "#FBBF24",
        background: "#FFFFFF",
        text: "#1E293B",
    },
    SchemeEntry {
        key: "purple",
        primary: "#8B5CF6",
        secondary: "#7C3AED",
        accent: "#C084FC",
        background: "#FFFFFF",
        text: "#1E293B",
    },
    SchemeEntry {
        key: "blue",
        primary: "#2563EB",
        secondary: "#1D4ED8",
        accent: "#3B82F6",
        background: "#FFFFFF",
        text: "#1E293B",
    },
];

/// Returns the scheme stored under `key`, or the default scheme.
pub fn color_scheme(key: &str) -> ColorScheme {
    COLOR_SCHEMES
        .iter()
        .find(|e| e.key.eq_ignore_ascii_case(key))
        .unwrap_or(&COLOR_SCHEMES[0])
        .to_scheme()
}

/// All catalog entries as `(key, scheme)`, in picker order.
pub fn color_schemes() -> Vec<(&'static str, ColorScheme)> {
    COLOR_SCHEMES.iter().map(|e| (e.key, e.to_scheme())).collect()
}

/// Catalog key of a stored scheme, matched by its primary color the way the
/// picker marks a selection. Unrecognized schemes map to the default key.
pub fn scheme_key(scheme: &ColorScheme) -> &'static str {
    find_entry(scheme).map_or(DEFAULT_SCHEME_KEY, |e| e.key)
}

fn find_entry(scheme: &ColorScheme) -> Option<&'static SchemeEntry> {
    let primary = Rgb::from_hex(&scheme.primary)?;
    COLOR_SCHEMES
        .iter()
        .find(|e| Rgb::from_hex(e.primary) == Some(primary))
}

impl Default for ColorScheme {
    fn default() -> Self {
        COLOR_SCHEMES[0].to_scheme()
    }
}

/// Parsed colors a template draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub text: Rgb,
}

/// Resolves a stored scheme against the catalog. Schemes outside the catalog
/// resolve to the default entry.
pub fn resolve_palette(scheme: &ColorScheme) -> Palette {
    let entry = find_entry(scheme).unwrap_or(&COLOR_SCHEMES[0]);
    let parse = |hex: &str| Rgb::from_hex(hex).unwrap_or(Rgb::WHITE);
    Palette {
        primary: parse(entry.primary),
        secondary: parse(entry.secondary),
        accent: parse(entry.accent),
        background: parse(entry.background),
        text: parse(entry.text),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font mappings
// ────────────────────────────────────────────────────────────────────────────

/// Font mapping key stored in `ResumeData.settings.font`.
///
/// Deserialization never fails: unknown keys become `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontChoice {
    #[default]
    Default,
    Elegant,
    Modern,
    Technical,
}

impl FontChoice {
    pub const ALL: [FontChoice; 4] = [
        FontChoice::Default,
        FontChoice::Elegant,
        FontChoice::Modern,
        FontChoice::Technical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FontChoice::Default => "default",
            FontChoice::Elegant => "elegant",
            FontChoice::Modern => "modern",
            FontChoice::Technical => "technical",
        }
    }
}

impl FromStr for FontChoice {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "elegant" => FontChoice::Elegant,
            "modern" => FontChoice::Modern,
            "technical" => FontChoice::Technical,
            _ => FontChoice::Default,
        })
    }
}

impl From<String> for FontChoice {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl From<FontChoice> for String {
    fn from(f: FontChoice) -> Self {
        f.as_str().to_string()
    }
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A family and weight assigned to one text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontRole {
    pub family: FontFamily,
    pub weight: FontWeight,
}

/// Heading and body roles for a font mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FontMapping {
    pub heading: FontRole,
    pub body: FontRole,
}

pub fn font_mapping(choice: FontChoice) -> FontMapping {
    let role = |family, weight| FontRole { family, weight };
    match choice {
        FontChoice::Default => FontMapping {
            heading: role(FontFamily::Poppins, FontWeight::Bold),
            body: role(FontFamily::Inter, FontWeight::Regular),
        },
        FontChoice::Elegant => FontMapping {
            heading: role(FontFamily::EbGaramond, FontWeight::Semibold),
            body: role(FontFamily::Inter, FontWeight::Regular),
        },
        FontChoice::Modern => FontMapping {
            heading: role(FontFamily::Inter, FontWeight::Bold),
            body: role(FontFamily::Inter, FontWeight::Regular),
        },
        FontChoice::Technical => FontMapping {
            heading: role(FontFamily::JetBrainsMono, FontWeight::Bold),
            body: role(FontFamily::JetBrainsMono, FontWeight::Regular),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scheme_key_falls_back_to_default() {
        assert_eq!(color_scheme("neon"), ColorScheme::default());
        assert_eq!(color_scheme("GREEN").primary, "#10B981");
    }

    #[test]
    fn test_scheme_key_matches_on_primary_case_insensitively() {
        let mut scheme = color_scheme("orange");
        scheme.primary = scheme.primary.to_lowercase();
        assert_eq!(scheme_key(&scheme), "orange");
    }

    #[test]
    fn test_foreign_scheme_resolves_to_default_palette() {
        let scheme = ColorScheme {
            primary: "#123456".into(),
            secondary: "nonsense".into(),
            accent: "".into(),
            background: "#000".into(),
            text: "#000".into(),
        };
        assert_eq!(scheme_key(&scheme), DEFAULT_SCHEME_KEY);
        let palette = resolve_palette(&scheme);
        assert_eq!(palette.primary, Rgb::new(0x4F, 0x46, 0xE5));
        assert_eq!(palette.background, Rgb::WHITE);
    }

    #[test]
    fn test_font_choice_unknown_value_deserializes_to_default() {
        let f: FontChoice = serde_json::from_str("\"comic-sans\"").unwrap();
        assert_eq!(f, FontChoice::Default);
        let f: FontChoice = serde_json::from_str("\"technical\"").unwrap();
        assert_eq!(f, FontChoice::Technical);
        assert_eq!(serde_json::to_string(&FontChoice::Elegant).unwrap(), "\"elegant\"");
    }

    #[test]
    fn test_technical_mapping_is_monospace_for_both_roles() {
        let m = font_mapping(FontChoice::Technical);
        assert_eq!(m.heading.family, FontFamily::JetBrainsMono);
        assert_eq!(m.body.family, FontFamily::JetBrainsMono);
        assert_eq!(m.heading.weight, FontWeight::Bold);
    }

    #[test]
    fn test_catalog_lists_five_schemes_default_first() {
        let all = color_schemes();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].0, DEFAULT_SCHEME_KEY);
    }
}
