// Template rendering: ResumeData -> Surface (an A4 display list).
// Rendering is a pure function of its input; no storage or network access.

pub mod classic;
pub mod column;
pub mod context;
pub mod creative;
pub mod handlers;
pub mod medical;
pub mod modern;
pub mod registry;
pub mod sections;
pub mod surface;
pub mod svg;

use crate::i18n::Locale;
use crate::models::{ResumeData, TemplateKind};

pub use context::RenderContext;
pub use registry::{SurfaceHandle, SurfaceRegistry};
pub use surface::Surface;

/// One layout strategy. Every variant draws the same content: a header with
/// name, title and contact details, and a body with the non-empty sections.
pub trait TemplateRenderer: Send + Sync {
    fn kind(&self) -> TemplateKind;

    fn render(&self, data: &ResumeData, ctx: &RenderContext) -> Surface;
}

static CLASSIC: classic::ClassicTemplate = classic::ClassicTemplate;
static MODERN: modern::ModernTemplate = modern::ModernTemplate;
static CREATIVE: creative::CreativeTemplate = creative::CreativeTemplate;
static MEDICAL: medical::MedicalTemplate = medical::MedicalTemplate;

pub fn renderer_for(kind: TemplateKind) -> &'static dyn TemplateRenderer {
    match kind {
        TemplateKind::Classic => &CLASSIC,
        TemplateKind::Modern => &MODERN,
        TemplateKind::Creative => &CREATIVE,
        TemplateKind::Medical => &MEDICAL,
    }
}

/// Renders `data` with the template, palette, fonts and language in its settings.
pub fn render_resume(data: &ResumeData, default_locale: Locale) -> Surface {
    let ctx = RenderContext::for_resume(data, default_locale);
    renderer_for(data.settings.template).render(data, &ctx)
}
