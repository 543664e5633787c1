//! Font families, the faces compiled into the binary, and text measurement.
//!
//! Each CV family resolves to one bundled face per weight class. Layout
//! measures with that face, the rasterizer draws with it and the preview SVG
//! loads it through `@font-face`, so line breaks computed here hold in both
//! outputs. Widths come from shaping with rustybuzz, the shaper cosmic-text
//! runs when it draws.

use std::cell::RefCell;

use rustybuzz::UnicodeBuffer;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Families and weights
// ────────────────────────────────────────────────────────────────────────────

/// Font families available to the font mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Neutral humanist sans-serif; body text for most mappings.
    Inter,
    /// Geometric sans-serif used for display headings.
    Poppins,
    /// Old-style serif for the elegant mapping.
    EbGaramond,
    /// Monospace for the technical mapping.
    JetBrainsMono,
}

/// The generic class a family belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericFamily {
    SansSerif,
    Serif,
    Monospace,
}

impl GenericFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            GenericFamily::SansSerif => "sans-serif",
            GenericFamily::Serif => "serif",
            GenericFamily::Monospace => "monospace",
        }
    }
}

impl FontFamily {
    pub fn generic(self) -> GenericFamily {
        match self {
            FontFamily::Inter | FontFamily::Poppins => GenericFamily::SansSerif,
            FontFamily::EbGaramond => GenericFamily::Serif,
            FontFamily::JetBrainsMono => GenericFamily::Monospace,
        }
    }

    /// The bundled face that renders this family at `weight`.
    pub fn face(self, weight: FontWeight) -> &'static BundledFace {
        let bold = weight.value() >= BOLD_THRESHOLD;
        let index = match (self.generic(), bold) {
            (GenericFamily::SansSerif, false) => 0,
            (GenericFamily::SansSerif, true) => 1,
            (GenericFamily::Serif, false) => 2,
            (GenericFamily::Serif, true) => 3,
            (GenericFamily::Monospace, false) => 4,
            (GenericFamily::Monospace, true) => 5,
        };
        &BUNDLED_FACES[index]
    }

    /// Measures a string in pixels at `size_px` and the given weight.
    pub fn measure_px(self, text: &str, size_px: f32, weight: FontWeight) -> f32 {
        self.face(weight).measure(text, size_px)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

/// CSS weight matching picks the bold face from 600 up.
const BOLD_THRESHOLD: u16 = 600;

// ────────────────────────────────────────────────────────────────────────────
// Bundled faces
// ────────────────────────────────────────────────────────────────────────────

/// A TrueType face shipped inside the binary.
#[derive(Debug)]
pub struct BundledFace {
    /// Family name as stored in the font's `name` table.
    pub family: &'static str,
    /// File name under which the preview fetches the face.
    pub file: &'static str,
    /// Weight recorded in the font's `OS/2` table.
    pub weight: u16,
    data: &'static [u8],
}

pub static BUNDLED_FACES: [BundledFace; 6] = [
    BundledFace {
        family: "DejaVu Sans",
        file: "DejaVuSans.ttf",
        weight: 400,
        data: include_bytes!("../../assets/fonts/DejaVuSans.ttf"),
    },
    BundledFace {
        family: "DejaVu Sans",
        file: "DejaVuSans-Bold.ttf",
        weight: 700,
        data: include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf"),
    },
    BundledFace {
        family: "DejaVu Serif",
        file: "DejaVuSerif.ttf",
        weight: 400,
        data: include_bytes!("../../assets/fonts/DejaVuSerif.ttf"),
    },
    BundledFace {
        family: "DejaVu Serif",
        file: "DejaVuSerif-Bold.ttf",
        weight: 700,
        data: include_bytes!("../../assets/fonts/DejaVuSerif-Bold.ttf"),
    },
    BundledFace {
        family: "DejaVu Sans Mono",
        file: "DejaVuSansMono.ttf",
        weight: 400,
        data: include_bytes!("../../assets/fonts/DejaVuSansMono.ttf"),
    },
    BundledFace {
        family: "DejaVu Sans Mono",
        file: "DejaVuSansMono-Bold.ttf",
        weight: 700,
        data: include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf"),
    },
];

/// Advance assumed per character if a face fails to parse. Wider than any
/// bundled face's average, so wrapping errs towards shorter lines.
const FALLBACK_ADVANCE_EM: f32 = 0.65;

// Reuse the shaping buffer across calls on the same thread.
thread_local! {
    static SCRATCH: RefCell<Option<UnicodeBuffer>> = const { RefCell::new(None) };
}

impl BundledFace {
    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    pub fn by_file(file: &str) -> Option<&'static BundledFace> {
        BUNDLED_FACES.iter().find(|f| f.file == file)
    }

    /// Shaped advance width of `text` in pixels at `size_px`.
    pub fn measure(&self, text: &str, size_px: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let Some(face) = rustybuzz::Face::from_slice(self.data, 0) else {
            tracing::warn!(file = self.file, "bundled face failed to parse");
            return text.chars().count() as f32 * size_px * FALLBACK_ADVANCE_EM;
        };
        let scale = size_px / face.units_per_em() as f32;

        let mut buffer = SCRATCH
            .with(|b| b.borrow_mut().take())
            .unwrap_or_default();
        buffer.push_str(text);
        buffer.guess_segment_properties();

        let glyphs = rustybuzz::shape(&face, &[], buffer);
        let units: i32 = glyphs.glyph_positions().iter().map(|p| p.x_advance).sum();

        SCRATCH.with(|b| *b.borrow_mut() = Some(glyphs.clear()));
        units as f32 * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_bundled_face_parses() {
        for face in &BUNDLED_FACES {
            let parsed = rustybuzz::Face::from_slice(face.data(), 0);
            assert!(parsed.is_some(), "{} does not parse", face.file);
        }
    }

    #[test]
    fn test_monospace_is_uniform() {
        let m = FontFamily::JetBrainsMono;
        let narrow = m.measure_px("iiii", 10.0, FontWeight::Regular);
        let wide = m.measure_px("WWWW", 10.0, FontWeight::Regular);
        assert!((narrow - wide).abs() < 1e-3);
        // DejaVu Sans Mono advances 1233/2048 em.
        assert!((m.measure_px("abc", 10.0, FontWeight::Regular) - 3.0 * 6.02).abs() < 0.01);
    }

    #[test]
    fn test_weights_select_faces_like_css() {
        let family = FontFamily::Inter;
        assert_eq!(family.face(FontWeight::Regular).weight, 400);
        assert_eq!(family.face(FontWeight::Medium).weight, 400);
        assert_eq!(family.face(FontWeight::Semibold).weight, 700);
        assert_eq!(family.face(FontWeight::Bold).file, "DejaVuSans-Bold.ttf");
        assert_eq!(FontFamily::EbGaramond.face(FontWeight::Regular).family, "DejaVu Serif");
    }

    #[test]
    fn test_bold_measures_wider_than_regular() {
        let regular = FontFamily::Inter.measure_px("Acme", 16.0, FontWeight::Regular);
        let bold = FontFamily::Inter.measure_px("Acme", 16.0, FontWeight::Bold);
        assert!(bold > regular);
    }

    #[test]
    fn test_accented_text_is_measured_from_glyphs() {
        let plain = FontFamily::Inter.measure_px("Present", 14.0, FontWeight::Regular);
        let accented = FontFamily::Inter.measure_px("Présent", 14.0, FontWeight::Regular);
        assert!((plain - accented).abs() < 0.5);
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = FontFamily::Poppins.measure_px("Senior Engineer", 10.0, FontWeight::Bold);
        let large = FontFamily::Poppins.measure_px("Senior Engineer", 20.0, FontWeight::Bold);
        assert!((large - 2.0 * small).abs() < 0.01);
    }

    #[test]
    fn test_empty_string_measures_zero() {
        assert_eq!(FontFamily::Inter.measure_px("", 12.0, FontWeight::Bold), 0.0);
    }

    #[test]
    fn test_lookup_by_file() {
        assert_eq!(BundledFace::by_file("DejaVuSerif.ttf").map(|f| f.weight), Some(400));
        assert!(BundledFace::by_file("../Cargo.toml").is_none());
    }
}
