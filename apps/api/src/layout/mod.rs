// Layout primitives: A4 geometry, bundled font faces, and line wrapping.
// All functions here are pure; the renderer calls them on every edit.

pub mod font_metrics;
pub mod page;
pub mod wrap;

// Re-export the public API consumed by the renderer and the style catalogs.
pub use font_metrics::{BundledFace, FontFamily, FontWeight, BUNDLED_FACES};
pub use wrap::wrap_text;
