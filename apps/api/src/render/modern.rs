//! Modern: centered header on a primary-to-secondary gradient, full-width
//! profile, then a two-thirds main column beside a one-third sidebar.

use crate::layout::page::PAGE_WIDTH_PX;
use crate::models::{ResumeData, TemplateKind};
use crate::render::column::Column;
use crate::render::context::RenderContext;
use crate::render::sections::{self, SectionLook};
use crate::render::surface::{Section, Surface};
use crate::render::TemplateRenderer;
use crate::style::Rgb;

const PAD: f32 = 32.0;
const GUTTER: f32 = 32.0;
const GRADIENT_STEPS: usize = 48;

pub struct ModernTemplate;

impl TemplateRenderer for ModernTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Modern
    }

    fn render(&self, data: &ResumeData, ctx: &RenderContext) -> Surface {
        let mut surface = Surface::new(self.kind(), ctx.palette.background);
        let info = &data.personal_info;

        let mut header_text = Surface::new(self.kind(), ctx.palette.background);
        let mut header = Column::new(PAD, 40.0, PAGE_WIDTH_PX - 2.0 * PAD);
        header.centered(&mut header_text, &info.full_name(), ctx.heading(30.0, Rgb::WHITE));
        header.gap(8.0);
        header.centered(&mut header_text, &info.title, ctx.body(20.0, Rgb::WHITE));
        let contact = sections::contact_lines(info).join("  ·  ");
        if !contact.is_empty() {
            surface.mark_section(Section::Contact);
            header.gap(16.0);
            header.centered(&mut header_text, &contact, ctx.body(14.0, Rgb::WHITE));
        }
        let band_height = (header.y + 40.0).max(140.0);

        // Horizontal gradient as vertical strips.
        let strip = PAGE_WIDTH_PX / GRADIENT_STEPS as f32;
        for i in 0..GRADIENT_STEPS {
            let t = i as f32 / (GRADIENT_STEPS - 1) as f32;
            let color = ctx.palette.primary.mix(ctx.palette.secondary, t);
            // Overlap by a pixel so no seams show after rasterization.
            surface.rect(i as f32 * strip, 0.0, strip + 1.0, band_height, color);
        }
        for element in header_text.elements() {
            surface.push(element.clone());
        }

        let look = SectionLook {
            heading_size: 20.0,
            heading_color: ctx.palette.text,
            heading_rule: Some(ctx.palette.primary),
            ..SectionLook::new(ctx)
        };

        let inner = PAGE_WIDTH_PX - 2.0 * PAD;
        let mut full = Column::new(PAD, band_height + PAD, inner);
        sections::summary(&mut full, &mut surface, ctx, data, &look);

        let side_width = (inner - 2.0 * GUTTER) / 3.0;
        let main_width = inner - side_width - GUTTER;
        let mut main = Column::new(PAD, full.y, main_width);
        let mut side = Column::new(PAD + main_width + GUTTER, full.y, side_width);

        sections::experience(&mut main, &mut surface, ctx, data, &look);
        sections::education(&mut main, &mut surface, ctx, data, &look);

        sections::skills(&mut side, &mut surface, ctx, data, &look);
        sections::languages(&mut side, &mut surface, ctx, data, &look);
        sections::certifications(&mut side, &mut surface, ctx, data, &look);

        surface.fit_to(main.y.max(side.y), PAD);
        surface
    }
}
