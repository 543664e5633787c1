//! SVG serialization of a surface, used for the live preview.
//!
//! Text names the bundled face the layout measured with and declares it via
//! `@font-face`, so an inlined preview wraps exactly like the exported PDF.
//! The generic fallback only applies if the font request fails.

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::layout::BundledFace;
use crate::render::surface::{Element, Surface, LINE_HEIGHT};

/// Route serving the bundled font files.
pub const FONT_ROUTE: &str = "/api/v1/fonts";

/// Baseline offset inside a line box, as a fraction of the font size.
const ASCENT: f32 = 0.95;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `@font-face` rule per bundled face the surface's text uses.
fn write_font_faces(out: &mut String, surface: &Surface) {
    let faces: BTreeMap<&str, &BundledFace> = surface
        .elements()
        .iter()
        .filter_map(|e| match e {
            Element::Text { family, weight, .. } => Some(family.face(*weight)),
            _ => None,
        })
        .map(|face| (face.file, face))
        .collect();
    if faces.is_empty() {
        return;
    }
    out.push_str("<defs><style>");
    for face in faces.values() {
        let _ = write!(
            out,
            "@font-face{{font-family:'{}';font-weight:{};src:url('{FONT_ROUTE}/{}') format('truetype');}}",
            face.family, face.weight, face.file
        );
    }
    out.push_str("</style></defs>");
}

pub fn to_svg(surface: &Surface) -> String {
    let (w, h) = surface.pixel_size();
    let mut out = String::new();
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    write_font_faces(&mut out, surface);
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{}"/>"#,
        surface.background
    );

    let mut clip_id = 0usize;
    for element in surface.elements() {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                fill,
                radius,
            } => {
                let _ = write!(
                    out,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" rx="{radius}" fill="{fill}"/>"#
                );
            }
            Element::Text {
                x,
                y,
                text,
                size,
                family,
                weight,
                color,
            } => {
                // Line boxes are top-anchored; SVG text sits on its baseline.
                let baseline = y + (size * LINE_HEIGHT - size) / 2.0 + size * ASCENT;
                let face = family.face(*weight);
                let _ = write!(
                    out,
                    r#"<text x="{x}" y="{baseline}" font-family="'{}', {}" font-size="{size}" font-weight="{}" fill="{color}" xml:space="preserve">{}</text>"#,
                    face.family,
                    family.generic().css_name(),
                    face.weight,
                    escape(text)
                );
            }
            Element::Image {
                x,
                y,
                width,
                height,
                source,
                circular,
            } => {
                let href = escape(source);
                if *circular {
                    clip_id += 1;
                    let (cx, cy, r) = (x + width / 2.0, y + height / 2.0, width.min(*height) / 2.0);
                    let _ = write!(
                        out,
                        r#"<clipPath id="clip{clip_id}"><circle cx="{cx}" cy="{cy}" r="{r}"/></clipPath><image x="{x}" y="{y}" width="{width}" height="{height}" href="{href}" preserveAspectRatio="xMidYMid slice" clip-path="url(#clip{clip_id})"/>"#
                    );
                } else {
                    let _ = write!(
                        out,
                        r#"<image x="{x}" y="{y}" width="{width}" height="{height}" href="{href}" preserveAspectRatio="xMidYMid slice"/>"#
                    );
                }
            }
        }
    }
    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontFamily, FontWeight};
    use crate::models::TemplateKind;
    use crate::style::Rgb;

    #[test]
    fn test_svg_has_page_size_and_escaped_text() {
        let mut surface = Surface::new(TemplateKind::Classic, Rgb::WHITE);
        surface.push(Element::Text {
            x: 10.0,
            y: 10.0,
            text: "R&D <lead>".into(),
            size: 14.0,
            family: FontFamily::Inter,
            weight: FontWeight::Bold,
            color: Rgb::new(0, 0, 0),
        });
        let svg = to_svg(&surface);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="794" height="1123""#));
        assert!(svg.contains("R&amp;D &lt;lead&gt;"));
        assert!(svg.contains(r##"fill="#000000""##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_text_names_the_bundled_face_with_a_generic_fallback() {
        let mut surface = Surface::new(TemplateKind::Classic, Rgb::WHITE);
        for (family, weight) in [
            (FontFamily::EbGaramond, FontWeight::Semibold),
            (FontFamily::Inter, FontWeight::Regular),
            (FontFamily::Poppins, FontWeight::Regular),
        ] {
            surface.push(Element::Text {
                x: 0.0,
                y: 0.0,
                text: "Compétences".into(),
                size: 12.0,
                family,
                weight,
                color: Rgb::new(0, 0, 0),
            });
        }
        let svg = to_svg(&surface);
        assert!(svg.contains(r#"font-family="'DejaVu Serif', serif" font-size="12" font-weight="700""#));
        assert!(svg.contains(r#"font-family="'DejaVu Sans', sans-serif""#));
        assert!(svg.contains("url('/api/v1/fonts/DejaVuSerif-Bold.ttf')"));
        // Inter and Poppins share a face; it is declared once.
        assert_eq!(svg.matches("url('/api/v1/fonts/DejaVuSans.ttf')").count(), 1);
    }

    #[test]
    fn test_surfaces_without_text_declare_no_fonts() {
        let surface = Surface::new(TemplateKind::Classic, Rgb::WHITE);
        assert!(!to_svg(&surface).contains("@font-face"));
    }

    #[test]
    fn test_circular_images_get_their_own_clip() {
        let mut surface = Surface::new(TemplateKind::Creative, Rgb::WHITE);
        for x in [0.0, 200.0] {
            surface.push(Element::Image {
                x,
                y: 0.0,
                width: 100.0,
                height: 100.0,
                source: "data:image/png;base64,AAAA".into(),
                circular: true,
            });
        }
        let svg = to_svg(&surface);
        assert!(svg.contains(r#"id="clip1""#));
        assert!(svg.contains(r#"id="clip2""#));
    }
}
