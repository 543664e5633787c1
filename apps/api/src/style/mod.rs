pub mod catalog;
pub mod color;

pub use catalog::{
    color_scheme, color_schemes, font_mapping, resolve_palette, scheme_key, ColorScheme,
    FontChoice, FontMapping, FontRole, Palette,
};
pub use color::Rgb;
