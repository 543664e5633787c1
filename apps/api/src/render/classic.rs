//! Classic: solid primary header band, narrow left column for contact and
//! ratings, wide right column for the narrative sections.

use crate::layout::page::PAGE_WIDTH_PX;
use crate::models::{ResumeData, TemplateKind};
use crate::render::column::Column;
use crate::render::context::RenderContext;
use crate::render::sections::{self, SectionLook};
use crate::render::surface::Surface;
use crate::render::TemplateRenderer;
use crate::style::Rgb;

const PAD: f32 = 24.0;
const GUTTER: f32 = 24.0;

pub struct ClassicTemplate;

impl TemplateRenderer for ClassicTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Classic
    }

    fn render(&self, data: &ResumeData, ctx: &RenderContext) -> Surface {
        let mut surface = Surface::new(self.kind(), ctx.palette.background);
        let info = &data.personal_info;

        // Header text is laid out on a scratch surface first so the band can be
        // drawn behind it at the measured height.
        let mut header_text = Surface::new(self.kind(), ctx.palette.background);
        let mut header = Column::new(PAD, 32.0, PAGE_WIDTH_PX - 2.0 * PAD);
        header.text(&mut header_text, &info.full_name(), ctx.heading(30.0, Rgb::WHITE));
        header.gap(4.0);
        header.text(
            &mut header_text,
            &info.title,
            ctx.body(20.0, Rgb::WHITE.mix(ctx.palette.primary, 0.1)),
        );
        let band_height = (header.y + 32.0).max(120.0);
        surface.rect(0.0, 0.0, PAGE_WIDTH_PX, band_height, ctx.palette.primary);
        for element in header_text.elements() {
            surface.push(element.clone());
        }

        let inner = PAGE_WIDTH_PX - 2.0 * PAD;
        let narrow = (inner - 2.0 * GUTTER) / 3.0;
        let body_top = band_height + PAD;
        let mut left = Column::new(PAD, body_top, narrow);
        let mut right = Column::new(PAD + narrow + GUTTER, body_top, inner - narrow - GUTTER);
        let look = SectionLook::new(ctx);

        sections::contact(&mut left, &mut surface, ctx, data, &look);
        sections::skills(&mut left, &mut surface, ctx, data, &look);
        sections::languages(&mut left, &mut surface, ctx, data, &look);
        sections::certifications(&mut left, &mut surface, ctx, data, &look);

        sections::summary(&mut right, &mut surface, ctx, data, &look);
        sections::experience(&mut right, &mut surface, ctx, data, &look);
        sections::education(&mut right, &mut surface, ctx, data, &look);

        surface.fit_to(left.y.max(right.y), PAD);
        surface
    }
}
