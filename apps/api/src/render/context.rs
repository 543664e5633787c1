use crate::i18n::{t, Key, Locale};
use crate::layout::{FontFamily, FontWeight};
use crate::models::ResumeData;
use crate::style::{font_mapping, resolve_palette, FontMapping, FontRole, Palette, Rgb};

/// Everything a template needs besides the resume content: resolved colors,
/// resolved font roles, and the display language.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub palette: Palette,
    pub fonts: FontMapping,
    pub locale: Locale,
}

impl RenderContext {
    pub fn for_resume(data: &ResumeData, default_locale: Locale) -> Self {
        Self {
            palette: resolve_palette(&data.settings.color_scheme),
            fonts: font_mapping(data.settings.font),
            locale: data.settings.locale_or(default_locale),
        }
    }

    pub fn label(&self, key: Key) -> &'static str {
        t(self.locale, key)
    }

    pub fn heading(&self, size: f32, color: Rgb) -> TextStyle {
        TextStyle::from_role(self.fonts.heading, size, color)
    }

    pub fn body(&self, size: f32, color: Rgb) -> TextStyle {
        TextStyle::from_role(self.fonts.body, size, color)
    }

    /// Body family at a heavier weight, for company names and similar.
    pub fn body_strong(&self, size: f32, color: Rgb) -> TextStyle {
        TextStyle {
            weight: FontWeight::Medium,
            ..self.body(size, color)
        }
    }

    /// `start - end`, with the localized "present" marker for current entries.
    pub fn date_range(&self, start: &str, end: &str, current: bool) -> String {
        let end = if current {
            self.label(Key::Present)
        } else {
            end.trim()
        };
        match (start.trim(), end) {
            ("", "") => String::new(),
            (s, "") => s.to_string(),
            ("", e) => e.to_string(),
            (s, e) => format!("{s} - {e}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub fn from_role(role: FontRole, size: f32, color: Rgb) -> Self {
        Self {
            family: role.family,
            weight: role.weight,
            size,
            color,
        }
    }

    pub fn width_of(&self, text: &str) -> f32 {
        self.family.measure_px(text, self.size, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FontChoice;

    #[test]
    fn test_date_range_variants() {
        let ctx = RenderContext::for_resume(&ResumeData::default(), Locale::Fr);
        assert_eq!(ctx.date_range("Jan 2022", "", true), "Jan 2022 - Présent");
        assert_eq!(ctx.date_range("Jan 2022", "Dec 2023", false), "Jan 2022 - Dec 2023");
        assert_eq!(ctx.date_range("Jan 2022", "Dec 2023", true), "Jan 2022 - Présent");
        assert_eq!(ctx.date_range("", "", false), "");
        assert_eq!(ctx.date_range("2019", "", false), "2019");
    }

    #[test]
    fn test_context_follows_settings_language_and_font() {
        let mut data = ResumeData::default();
        data.settings.language = Some("en".into());
        data.settings.font = FontChoice::Technical;
        let ctx = RenderContext::for_resume(&data, Locale::Fr);
        assert_eq!(ctx.locale, Locale::En);
        assert_eq!(ctx.fonts.body.family, FontFamily::JetBrainsMono);
        assert_eq!(ctx.date_range("2020", "", true), "2020 - Present");
    }

    #[test]
    fn test_missing_language_uses_default_locale() {
        let mut data = ResumeData::default();
        data.settings.language = None;
        let ctx = RenderContext::for_resume(&data, Locale::En);
        assert_eq!(ctx.locale, Locale::En);
    }
}
