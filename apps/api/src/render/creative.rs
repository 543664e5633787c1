//! Creative: tall primary header with the name split over two lines and an
//! optional round photo, then a 7/12 narrative column and a 5/12 column with
//! dot ratings.

use crate::layout::page::PAGE_WIDTH_PX;
use crate::models::{ResumeData, TemplateKind};
use crate::render::column::Column;
use crate::render::context::RenderContext;
use crate::render::sections::{self, SectionLook, SkillIndicator};
use crate::render::surface::{Element, Section, Surface};
use crate::render::TemplateRenderer;
use crate::style::Rgb;

const PAD: f32 = 32.0;
const GUTTER: f32 = 32.0;
const PHOTO: f32 = 120.0;

pub struct CreativeTemplate;

impl TemplateRenderer for CreativeTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Creative
    }

    fn render(&self, data: &ResumeData, ctx: &RenderContext) -> Surface {
        let mut surface = Surface::new(self.kind(), ctx.palette.background);
        let info = &data.personal_info;
        let photo = info.profile_image();

        let text_width = PAGE_WIDTH_PX - 2.0 * PAD - if photo.is_some() { PHOTO + GUTTER } else { 0.0 };
        let mut header_text = Surface::new(self.kind(), ctx.palette.background);
        let mut header = Column::new(PAD, 48.0, text_width);
        let name_style = ctx.heading(36.0, Rgb::WHITE);
        header.text(&mut header_text, info.first_name.trim(), name_style);
        header.text(&mut header_text, info.last_name.trim(), name_style);
        header.gap(12.0);
        header.text(&mut header_text, &info.title, ctx.body(20.0, Rgb::WHITE.mix(ctx.palette.primary, 0.1)));
        header.gap(20.0);
        let contacts = sections::contact_lines(info);
        if !contacts.is_empty() {
            surface.mark_section(Section::Contact);
        }
        for line in contacts {
            header.text(&mut header_text, line, ctx.body(14.0, Rgb::WHITE));
        }
        let band_height = (header.y + 48.0).max(if photo.is_some() { PHOTO + 96.0 } else { 0.0 });

        surface.rect(0.0, 0.0, PAGE_WIDTH_PX, band_height, ctx.palette.primary);
        surface.rect(0.0, band_height, PAGE_WIDTH_PX, 6.0, ctx.palette.accent);
        for element in header_text.elements() {
            surface.push(element.clone());
        }
        if let Some(source) = photo {
            surface.push(Element::Image {
                x: PAGE_WIDTH_PX - PAD - PHOTO,
                y: 48.0,
                width: PHOTO,
                height: PHOTO,
                source: source.to_string(),
                circular: true,
            });
        }

        let look = SectionLook {
            heading_size: 20.0,
            heading_color: ctx.palette.primary,
            heading_rule: Some(ctx.palette.accent),
            skill_indicator: SkillIndicator::Dots,
            spacing: 32.0,
        };

        let inner = PAGE_WIDTH_PX - 2.0 * PAD;
        let unit = (inner - GUTTER) / 12.0;
        let body_top = band_height + 6.0 + PAD;
        let mut left = Column::new(PAD, body_top, 7.0 * unit);
        let mut right = Column::new(PAD + 7.0 * unit + GUTTER, body_top, 5.0 * unit);

        sections::summary(&mut left, &mut surface, ctx, data, &look);
        sections::experience(&mut left, &mut surface, ctx, data, &look);

        sections::skills(&mut right, &mut surface, ctx, data, &look);
        sections::education(&mut right, &mut surface, ctx, data, &look);
        sections::languages(&mut right, &mut surface, ctx, data, &look);
        sections::certifications(&mut right, &mut surface, ctx, data, &look);

        surface.fit_to(left.y.max(right.y), PAD);
        surface
    }
}
