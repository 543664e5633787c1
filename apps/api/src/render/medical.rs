//! Medical: white header with the summary and a contact grid above a thick
//! primary border; ratings and credentials on the left, career on the right.

use crate::layout::page::PAGE_WIDTH_PX;
use crate::models::{ResumeData, TemplateKind};
use crate::render::column::Column;
use crate::render::context::RenderContext;
use crate::render::sections::{self, SectionLook};
use crate::render::surface::{Element, Section, Surface};
use crate::render::TemplateRenderer;

const PAD: f32 = 24.0;
const GUTTER: f32 = 24.0;
const PHOTO: f32 = 96.0;
const CONTACT_COLUMNS: usize = 3;

pub struct MedicalTemplate;

impl TemplateRenderer for MedicalTemplate {
    fn kind(&self) -> TemplateKind {
        TemplateKind::Medical
    }

    fn render(&self, data: &ResumeData, ctx: &RenderContext) -> Surface {
        let mut surface = Surface::new(self.kind(), ctx.palette.background);
        let info = &data.personal_info;
        let photo = info.profile_image();
        let inner = PAGE_WIDTH_PX - 2.0 * PAD;

        let text_width = inner - if photo.is_some() { PHOTO + GUTTER } else { 0.0 };
        let mut header = Column::new(PAD, PAD, text_width);
        header.text(&mut surface, &info.full_name(), ctx.heading(30.0, ctx.palette.primary));
        if !info.title.trim().is_empty() {
            header.text(
                &mut surface,
                &format!("• {}", info.title.trim()),
                ctx.body(20.0, ctx.palette.secondary),
            );
        }
        let summary = info.summary.trim();
        if !summary.is_empty() {
            surface.mark_section(Section::Profile);
            header.gap(12.0);
            header.text(&mut surface, summary, ctx.body(16.0, ctx.palette.text));
        }
        if let Some(source) = photo {
            surface.push(Element::Image {
                x: PAGE_WIDTH_PX - PAD - PHOTO,
                y: PAD,
                width: PHOTO,
                height: PHOTO,
                source: source.to_string(),
                circular: true,
            });
            header.y = header.y.max(PAD + PHOTO);
        }

        // Contact grid, filled row by row.
        let contacts = sections::contact_lines(info);
        if !contacts.is_empty() {
            surface.mark_section(Section::Contact);
            header.gap(16.0);
            let cell = (inner - (CONTACT_COLUMNS - 1) as f32 * 12.0) / CONTACT_COLUMNS as f32;
            let mut row_bottom = header.y;
            for (i, line) in contacts.iter().enumerate() {
                let col_index = i % CONTACT_COLUMNS;
                if col_index == 0 && i > 0 {
                    header.y = row_bottom + 6.0;
                }
                let mut cell_col = Column::new(PAD + col_index as f32 * (cell + 12.0), header.y, cell);
                cell_col.bullet(&mut surface, line, ctx.body(14.0, ctx.palette.text), ctx.palette.primary);
                row_bottom = row_bottom.max(cell_col.y);
            }
            header.y = row_bottom;
        }
        header.gap(PAD);
        surface.rect(0.0, header.y, PAGE_WIDTH_PX, 4.0, ctx.palette.primary);

        let look = SectionLook {
            heading_rule: Some(ctx.palette.primary.mix(ctx.palette.background, 0.7)),
            ..SectionLook::new(ctx)
        };

        let narrow = (inner - 2.0 * GUTTER) / 3.0;
        let body_top = header.y + 4.0 + PAD;
        let mut left = Column::new(PAD, body_top, narrow);
        let mut right = Column::new(PAD + narrow + GUTTER, body_top, inner - narrow - GUTTER);

        sections::skills(&mut left, &mut surface, ctx, data, &look);
        sections::languages(&mut left, &mut surface, ctx, data, &look);
        sections::certifications(&mut left, &mut surface, ctx, data, &look);

        sections::experience(&mut right, &mut surface, ctx, data, &look);
        sections::education(&mut right, &mut surface, ctx, data, &look);

        surface.fit_to(left.y.max(right.y), PAD);
        surface
    }
}
