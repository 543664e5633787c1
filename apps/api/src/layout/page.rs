//! A4 page geometry shared by the renderer and the export pipeline.
//!
//! Surfaces are laid out in CSS pixels at 96 dpi; PDF pages are in points.

/// A4 width in CSS pixels.
pub const PAGE_WIDTH_PX: f32 = 794.0;
/// A4 height in CSS pixels; surfaces are at least this tall.
pub const PAGE_HEIGHT_PX: f32 = 1123.0;

/// A4 portrait in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

/// Rasterization supersampling factor.
pub const SUPERSAMPLE: u32 = 2;

/// Image-space height (pixels) that maps onto one full PDF page when the image
/// is scaled to the A4 width.
pub fn page_slice_height(image_width: u32) -> u32 {
    let h = (A4_HEIGHT_PT * image_width as f32 / A4_WIDTH_PT).floor() as u32;
    h.max(1)
}

/// Height in points of an image of `image_width` x `image_height` pixels scaled
/// to the A4 width.
pub fn scaled_height_pt(image_width: u32, image_height: u32) -> f32 {
    if image_width == 0 {
        return 0.0;
    }
    image_height as f32 * A4_WIDTH_PT / image_width as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_surface_at_2x_fits_on_one_page() {
        let w = PAGE_WIDTH_PX as u32 * SUPERSAMPLE;
        let h = PAGE_HEIGHT_PX as u32 * SUPERSAMPLE;
        assert!(scaled_height_pt(w, h) <= A4_HEIGHT_PT + 0.5);
        assert!(page_slice_height(w) >= h - 1);
    }

    #[test]
    fn test_scaled_height_preserves_aspect_ratio() {
        let h = scaled_height_pt(1000, 2000);
        assert!((h - 2.0 * A4_WIDTH_PT).abs() < 1e-3);
        assert_eq!(scaled_height_pt(0, 10), 0.0);
    }
}
