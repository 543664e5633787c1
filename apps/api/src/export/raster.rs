//! Surface -> RGB raster at `SUPERSAMPLE` x the CSS pixel size.
//!
//! Rectangles and images are filled directly; text lines are shaped and drawn
//! by cosmic-text. Lines arrive already wrapped, so shaping runs with wrapping
//! disabled and each line lands at its top-anchored box.

use std::sync::Mutex;

use cosmic_text::{
    fontdb, Attrs, Buffer, Color, Family, FontSystem, Metrics, Shaping, SwashCache, Weight, Wrap,
};
use image::{imageops::FilterType, Rgb as Pixel, RgbImage};

use crate::editor::profile_image::{decode_data_uri, decode_limited};
use crate::export::ExportError;
use crate::layout::page::SUPERSAMPLE;
use crate::layout::{FontFamily, FontWeight, BUNDLED_FACES};
use crate::render::surface::{Element, Surface, LINE_HEIGHT};
use crate::style::Rgb;

/// Largest raster edge accepted, in device pixels.
const MAX_EDGE: u32 = 32_000;

struct Fonts {
    system: FontSystem,
    cache: SwashCache,
}

/// Owns the font database and glyph cache. One rasterizer is created at
/// startup and shared.
pub struct Rasterizer {
    fonts: Mutex<Fonts>,
}

/// Font database holding only the faces compiled into the binary. Installed
/// system fonts are never consulted, so output does not depend on the host.
pub fn bundled_font_db() -> fontdb::Database {
    let mut db = fontdb::Database::new();
    for face in &BUNDLED_FACES {
        db.load_font_data(face.data().to_vec());
    }
    db.set_sans_serif_family(BUNDLED_FACES[0].family);
    db.set_serif_family(BUNDLED_FACES[2].family);
    db.set_monospace_family(BUNDLED_FACES[4].family);
    db
}

impl Rasterizer {
    /// Rasterizer over the bundled faces.
    pub fn new() -> Self {
        let db = bundled_font_db();
        tracing::info!(faces = db.len(), "font database loaded");
        Self::with_font_db(db)
    }

    /// Rasterizer over an explicit font database (empty in tests).
    pub fn with_font_db(db: fontdb::Database) -> Self {
        Self::from_system(FontSystem::new_with_locale_and_db("en-US".to_string(), db))
    }

    fn from_system(system: FontSystem) -> Self {
        Self {
            fonts: Mutex::new(Fonts {
                system,
                cache: SwashCache::new(),
            }),
        }
    }

    /// Draws `surface` into a new image `SUPERSAMPLE` times its pixel size.
    /// CPU-bound; call it from `tokio::task::spawn_blocking`.
    pub fn rasterize(&self, surface: &Surface) -> Result<RgbImage, ExportError> {
        let (w, h) = surface.pixel_size();
        let (width, height) = (w * SUPERSAMPLE, h * SUPERSAMPLE);
        if width == 0 || height == 0 || width > MAX_EDGE || height > MAX_EDGE {
            return Err(ExportError::Rasterize(format!(
                "surface size {w}x{h} cannot be rasterized"
            )));
        }

        let mut canvas = RgbImage::from_pixel(width, height, pixel(surface.background));
        let scale = SUPERSAMPLE as f32;
        let mut fonts = self
            .fonts
            .lock()
            .map_err(|_| ExportError::Rasterize("font system lock poisoned".to_string()))?;
        let Fonts { system, cache } = &mut *fonts;

        for element in surface.elements() {
            match element {
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    radius,
                } => fill_rect(
                    &mut canvas,
                    x * scale,
                    y * scale,
                    width * scale,
                    height * scale,
                    radius * scale,
                    *fill,
                ),
                Element::Text {
                    x,
                    y,
                    text,
                    size,
                    family,
                    weight,
                    color,
                } => draw_text(
                    &mut canvas,
                    system,
                    cache,
                    TextRun {
                        x: x * scale,
                        y: y * scale,
                        text,
                        size: size * scale,
                        family: *family,
                        weight: *weight,
                        color: *color,
                    },
                )?,
                Element::Image {
                    x,
                    y,
                    width,
                    height,
                    source,
                    circular,
                } => draw_image(
                    &mut canvas,
                    x * scale,
                    y * scale,
                    width * scale,
                    height * scale,
                    source,
                    *circular,
                )?,
            }
        }

        tracing::debug!(width, height, elements = surface.elements().len(), "surface rasterized");
        Ok(canvas)
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

fn pixel(c: Rgb) -> Pixel<u8> {
    Pixel([c.r, c.g, c.b])
}

fn blend(dst: &mut Pixel<u8>, src: [u8; 3], alpha: u8) {
    if alpha == 0 {
        return;
    }
    if alpha == 255 {
        dst.0 = src;
        return;
    }
    let a = alpha as u32;
    for (d, s) in dst.0.iter_mut().zip(src) {
        *d = ((s as u32 * a + *d as u32 * (255 - a) + 127) / 255) as u8;
    }
}

/// Pixel bounds of a float rectangle, clamped to the canvas.
fn bounds(canvas: &RgbImage, x: f32, y: f32, w: f32, h: f32) -> Option<(u32, u32, u32, u32)> {
    let x0 = x.round().max(0.0) as u32;
    let y0 = y.round().max(0.0) as u32;
    let x1 = ((x + w).round().max(0.0) as u32).min(canvas.width());
    let y1 = ((y + h).round().max(0.0) as u32).min(canvas.height());
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

/// Is the pixel center inside the rounded rectangle?
fn inside_rounded(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32, r: f32) -> bool {
    if r <= 0.0 {
        return true;
    }
    let cx = px.clamp(x + r, x + w - r);
    let cy = py.clamp(y + r, y + h - r);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= r * r
}

fn fill_rect(canvas: &mut RgbImage, x: f32, y: f32, w: f32, h: f32, radius: f32, fill: Rgb) {
    let Some((x0, y0, x1, y1)) = bounds(canvas, x, y, w, h) else {
        return;
    };
    let r = radius.min(w / 2.0).min(h / 2.0);
    let color = pixel(fill);
    for py in y0..y1 {
        for px in x0..x1 {
            if inside_rounded(px as f32 + 0.5, py as f32 + 0.5, x, y, w, h, r) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

struct TextRun<'a> {
    x: f32,
    y: f32,
    text: &'a str,
    size: f32,
    family: FontFamily,
    weight: FontWeight,
    color: Rgb,
}

fn draw_text(
    canvas: &mut RgbImage,
    system: &mut FontSystem,
    cache: &mut SwashCache,
    run: TextRun<'_>,
) -> Result<(), ExportError> {
    if run.text.trim().is_empty() || run.size <= 0.0 {
        return Ok(());
    }
    if system.db().is_empty() {
        return Err(ExportError::Rasterize("no fonts are installed".to_string()));
    }
    // Same face the layout measured with.
    let face = run.family.face(run.weight);
    let attrs = Attrs::new()
        .family(Family::Name(face.family))
        .weight(Weight(face.weight));

    let mut buffer = Buffer::new(system, Metrics::new(run.size, run.size * LINE_HEIGHT));
    buffer.set_wrap(system, Wrap::None);
    buffer.set_size(system, None, None);
    buffer.set_text(system, run.text, attrs, Shaping::Advanced);
    buffer.shape_until_scroll(system, false);

    let (ox, oy) = (run.x.round() as i32, run.y.round() as i32);
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    let base = Color::rgb(run.color.r, run.color.g, run.color.b);
    buffer.draw(system, cache, base, |gx, gy, w, h, color| {
        let alpha = color.a();
        if alpha == 0 {
            return;
        }
        for dy in 0..h as i32 {
            for dx in 0..w as i32 {
                let (px, py) = (ox + gx + dx, oy + gy + dy);
                if px < 0 || py < 0 || px >= cw || py >= ch {
                    continue;
                }
                blend(
                    canvas.get_pixel_mut(px as u32, py as u32),
                    [color.r(), color.g(), color.b()],
                    alpha,
                );
            }
        }
    });
    Ok(())
}

fn draw_image(
    canvas: &mut RgbImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    source: &str,
    circular: bool,
) -> Result<(), ExportError> {
    let Some((x0, y0, x1, y1)) = bounds(canvas, x, y, w, h) else {
        return Ok(());
    };
    let (_, bytes) = decode_data_uri(source)
        .map_err(|e| ExportError::Rasterize(format!("profile image: {e}")))?;
    let decoded =
        decode_limited(&bytes).map_err(|e| ExportError::Rasterize(format!("profile image: {e}")))?;
    let (tw, th) = (x1 - x0, y1 - y0);
    let Some((cx0, cy0, cw, ch)) = cover_crop(decoded.width(), decoded.height(), tw, th) else {
        return Ok(());
    };

    // Crop to the box aspect in source pixels, then scale straight to the box,
    // like `object-fit: cover`.
    let fitted = decoded
        .crop_imm(cx0, cy0, cw, ch)
        .resize_exact(tw, th, FilterType::Triangle)
        .to_rgba8();

    let (cx, cy, r) = (x + w / 2.0, y + h / 2.0, w.min(h) / 2.0);
    for py in y0..y1 {
        for px in x0..x1 {
            if circular {
                let (dx, dy) = (px as f32 + 0.5 - cx, py as f32 + 0.5 - cy);
                if dx * dx + dy * dy > r * r {
                    continue;
                }
            }
            let src = fitted.get_pixel(px - x0, py - y0).0;
            blend(canvas.get_pixel_mut(px, py), [src[0], src[1], src[2]], src[3]);
        }
    }
    Ok(())
}

/// Centered source region with the target's aspect ratio: `(x, y, w, h)`.
fn cover_crop(sw: u32, sh: u32, tw: u32, th: u32) -> Option<(u32, u32, u32, u32)> {
    if sw == 0 || sh == 0 || tw == 0 || th == 0 {
        return None;
    }
    let (sw64, sh64, tw64, th64) = (sw as u64, sh as u64, tw as u64, th as u64);
    let (cw, ch) = if sw64 * th64 > sh64 * tw64 {
        (((sh64 * tw64) / th64).clamp(1, sw64) as u32, sh)
    } else {
        (sw, ((sw64 * th64) / tw64).clamp(1, sh64) as u32)
    };
    Some(((sw - cw) / 2, (sh - ch) / 2, cw, ch))
}
