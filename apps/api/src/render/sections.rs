//! Section writers shared by the templates. Each writer appends nothing, and
//! leaves the column untouched, when its backing data is empty.

use crate::i18n::Key;
use crate::models::{PersonalInfo, ResumeData};
use crate::render::column::Column;
use crate::render::context::RenderContext;
use crate::render::surface::{Section, Surface};
use crate::style::Rgb;

/// How a skill level is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillIndicator {
    /// Track with a proportional fill.
    Bar,
    /// Five dots, `level` of them filled.
    Dots,
}

/// Per-template section styling.
#[derive(Debug, Clone, Copy)]
pub struct SectionLook {
    pub heading_size: f32,
    pub heading_color: Rgb,
    /// Rule drawn under each heading.
    pub heading_rule: Option<Rgb>,
    pub skill_indicator: SkillIndicator,
    /// Space after each section.
    pub spacing: f32,
}

impl SectionLook {
    pub fn new(ctx: &RenderContext) -> Self {
        Self {
            heading_size: 18.0,
            heading_color: ctx.palette.primary,
            heading_rule: None,
            skill_indicator: SkillIndicator::Bar,
            spacing: 24.0,
        }
    }
}

const BODY: f32 = 14.0;
const SMALL: f32 = 12.0;

fn heading(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, look: &SectionLook, key: Key) {
    col.text(surface, ctx.label(key), ctx.heading(look.heading_size, look.heading_color));
    if let Some(color) = look.heading_rule {
        col.gap(4.0);
        col.rule(surface, 2.0, color);
    }
    col.gap(10.0);
}

/// Contact lines present on `info`, in display order.
pub fn contact_lines(info: &PersonalInfo) -> Vec<&str> {
    [
        Some(info.phone.as_str()),
        Some(info.email.as_str()),
        Some(info.address.as_str()),
        info.website(),
        info.linkedin(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect()
}

pub fn contact(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    let lines = contact_lines(&data.personal_info);
    if lines.is_empty() {
        return;
    }
    surface.mark_section(Section::Contact);
    heading(col, surface, ctx, look, Key::Contact);
    for line in lines {
        col.bullet(surface, line, ctx.body(BODY, ctx.palette.text), ctx.palette.secondary);
        col.gap(4.0);
    }
    col.gap(look.spacing);
}

pub fn summary(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    let text = data.personal_info.summary.trim();
    if text.is_empty() {
        return;
    }
    surface.mark_section(Section::Profile);
    heading(col, surface, ctx, look, Key::Profile);
    col.text(surface, text, ctx.body(BODY, ctx.palette.text));
    col.gap(look.spacing);
}

fn separator(col: &mut Column, surface: &mut Surface, last: bool) {
    if !last {
        col.gap(8.0);
        col.rule(surface, 1.0, Rgb::TRACK);
        col.gap(12.0);
    }
}

pub fn experience(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    if data.experiences.is_empty() {
        return;
    }
    surface.mark_section(Section::Experience);
    heading(col, surface, ctx, look, Key::Experience);
    let count = data.experiences.len();
    for (i, exp) in data.experiences.iter().enumerate() {
        let dates = ctx.date_range(&exp.start_date, &exp.end_date, exp.current);
        col.split_row(
            surface,
            &exp.position,
            ctx.heading(16.0, ctx.palette.text),
            &dates,
            ctx.body(BODY, Rgb::MUTED),
        );
        col.text(surface, &exp.company, ctx.body_strong(BODY, Rgb::MUTED));
        if !exp.description.trim().is_empty() {
            col.gap(6.0);
            col.text(surface, &exp.description, ctx.body(BODY, ctx.palette.text));
        }
        if !exp.achievements.is_empty() {
            col.gap(6.0);
            for achievement in &exp.achievements {
                col.bullet(surface, achievement, ctx.body(BODY, ctx.palette.text), ctx.palette.accent);
                col.gap(2.0);
            }
        }
        separator(col, surface, i + 1 == count);
    }
    col.gap(look.spacing);
}

pub fn education(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    if data.education.is_empty() {
        return;
    }
    surface.mark_section(Section::Education);
    heading(col, surface, ctx, look, Key::Education);
    let count = data.education.len();
    for (i, edu) in data.education.iter().enumerate() {
        let dates = ctx.date_range(&edu.start_date, &edu.end_date, edu.current);
        col.split_row(
            surface,
            &edu.degree,
            ctx.heading(16.0, ctx.palette.text),
            &dates,
            ctx.body(BODY, Rgb::MUTED),
        );
        col.text(surface, &edu.institution, ctx.body_strong(BODY, Rgb::MUTED));
        col.text(surface, &edu.field, ctx.body(BODY, Rgb::MUTED));
        if let Some(description) = edu.description.as_deref().filter(|d| !d.trim().is_empty()) {
            col.gap(6.0);
            col.text(surface, description, ctx.body(BODY, ctx.palette.text));
        }
        separator(col, surface, i + 1 == count);
    }
    col.gap(look.spacing);
}

pub fn skills(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    if data.skills.is_empty() {
        return;
    }
    surface.mark_section(Section::Skills);
    heading(col, surface, ctx, look, Key::Skills);
    for skill in &data.skills {
        match look.skill_indicator {
            SkillIndicator::Bar => {
                let score = format!("{}/5", skill.level.get());
                col.split_row(
                    surface,
                    &skill.name,
                    ctx.body(BODY, ctx.palette.text),
                    &score,
                    ctx.body(SMALL, Rgb::MUTED),
                );
                col.gap(4.0);
                col.bar(surface, skill.level.fraction(), 8.0, ctx.palette.accent);
            }
            SkillIndicator::Dots => {
                col.dots_right(surface, skill.level.get(), 5, 10.0, ctx.palette.accent);
                let name_width = (col.width - 80.0).max(col.width * 0.4);
                let style = ctx.body(BODY, ctx.palette.text);
                col.text_within(surface, &skill.name, style, 0.0, name_width);
            }
        }
        col.gap(10.0);
    }
    col.gap(look.spacing);
}

pub fn languages(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    if data.languages.is_empty() {
        return;
    }
    surface.mark_section(Section::Languages);
    heading(col, surface, ctx, look, Key::Languages);
    for language in &data.languages {
        col.split_row(
            surface,
            &language.name,
            ctx.body(BODY, ctx.palette.text),
            language.level.label(ctx.locale),
            ctx.body(SMALL, Rgb::MUTED),
        );
        col.gap(6.0);
    }
    col.gap(look.spacing);
}

pub fn certifications(col: &mut Column, surface: &mut Surface, ctx: &RenderContext, data: &ResumeData, look: &SectionLook) {
    if data.certifications.is_empty() {
        return;
    }
    surface.mark_section(Section::Certifications);
    heading(col, surface, ctx, look, Key::Certifications);
    for cert in &data.certifications {
        col.text(surface, &cert.name, ctx.body_strong(BODY, ctx.palette.text));
        col.text(surface, &cert.issuer, ctx.body(BODY, ctx.palette.text));
        let mut when = cert.date.trim().to_string();
        if let Some(expiry) = cert.expiry.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
            if !when.is_empty() {
                when.push_str(" · ");
            }
            when.push_str(&format!("{} {expiry}", ctx.label(Key::Expires)));
        }
        col.text(surface, &when, ctx.body(SMALL, Rgb::MUTED));
        col.gap(10.0);
    }
    col.gap(look.spacing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::models::{Certification, TemplateKind};

    fn english() -> ResumeData {
        let mut data = ResumeData::default();
        data.settings.language = Some("en".into());
        data
    }

    fn setup() -> (Surface, Column, RenderContext) {
        let ctx = RenderContext::for_resume(&english(), Locale::Fr);
        (
            Surface::new(TemplateKind::Classic, Rgb::WHITE),
            Column::new(0.0, 0.0, 300.0),
            ctx,
        )
    }

    #[test]
    fn test_empty_lists_leave_column_untouched() {
        let (mut surface, mut col, ctx) = setup();
        let look = SectionLook::new(&ctx);
        let data = ResumeData::default();
        experience(&mut col, &mut surface, &ctx, &data, &look);
        education(&mut col, &mut surface, &ctx, &data, &look);
        skills(&mut col, &mut surface, &ctx, &data, &look);
        languages(&mut col, &mut surface, &ctx, &data, &look);
        certifications(&mut col, &mut surface, &ctx, &data, &look);
        summary(&mut col, &mut surface, &ctx, &data, &look);
        contact(&mut col, &mut surface, &ctx, &data, &look);
        assert_eq!(col.y, 0.0);
        assert!(surface.elements().is_empty());
        assert!(surface.sections().is_empty());
    }

    #[test]
    fn test_contact_lines_skip_blank_fields() {
        let info = PersonalInfo {
            email: "ada@example.com".into(),
            phone: "  ".into(),
            linkedin: Some("in/ada".into()),
            ..Default::default()
        };
        assert_eq!(contact_lines(&info), vec!["ada@example.com", "in/ada"]);
    }

    #[test]
    fn test_certification_shows_expiry() {
        let (mut surface, mut col, ctx) = setup();
        let look = SectionLook::new(&ctx);
        let data = english().with_certifications(vec![Certification {
            id: "c".into(),
            name: "CKA".into(),
            issuer: "CNCF".into(),
            date: "2023".into(),
            expiry: Some("2026".into()),
        }]);
        certifications(&mut col, &mut surface, &ctx, &data, &look);
        assert!(surface.contains_text("2023 · Expires 2026"));
        assert!(surface.has_section(Section::Certifications));
    }

    #[test]
    fn test_certification_expiry_follows_resume_language() {
        let data = ResumeData::default().with_certifications(vec![Certification {
            id: "c".into(),
            name: "CKA".into(),
            issuer: "CNCF".into(),
            date: "2023".into(),
            expiry: Some("2026".into()),
        }]);
        let ctx = RenderContext::for_resume(&data, Locale::En);
        let look = SectionLook::new(&ctx);
        let mut surface = Surface::new(TemplateKind::Classic, Rgb::WHITE);
        let mut col = Column::new(0.0, 0.0, 300.0);
        certifications(&mut col, &mut surface, &ctx, &data, &look);
        assert!(surface.contains_text("2023 · Expire le 2026"));
    }
}
