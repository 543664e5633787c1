//! Profile photo intake: type and size checks, then inline `data:` URI encoding.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat, ImageReader, Limits};
use thiserror::Error;

use crate::i18n::{t, Key, Locale};

/// MIME types the upload form accepts.
pub const ACCEPTED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Default upload limit (5 MB).
pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Largest accepted width or height, in pixels.
pub const MAX_IMAGE_EDGE: u32 = 4096;

/// Decoder allocation ceiling; a full-size RGBA image at the edge limit fits.
const MAX_DECODE_ALLOC: u64 = 4 * MAX_IMAGE_EDGE as u64 * MAX_IMAGE_EDGE as u64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("image is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("file content does not match a supported image format")]
    Unrecognized,

    #[error("image is {width}x{height} px, limit is {MAX_IMAGE_EDGE} px per side")]
    Dimensions { width: u32, height: u32 },

    #[error("image cannot be decoded: {0}")]
    Undecodable(String),

    #[error("malformed data URI")]
    MalformedDataUri,
}

impl ImageError {
    pub fn message(&self, locale: Locale) -> &'static str {
        match self {
            ImageError::TooLarge { .. } => t(locale, Key::ImageTooLarge),
            ImageError::Dimensions { .. } => t(locale, Key::ImageDimensions),
            _ => t(locale, Key::ImageUnsupported),
        }
    }
}

fn mime_of(format: ImageFormat) -> Option<&'static str> {
    match format {
        ImageFormat::Jpeg => Some("image/jpeg"),
        ImageFormat::Png => Some("image/png"),
        ImageFormat::Gif => Some("image/gif"),
        ImageFormat::WebP => Some("image/webp"),
        _ => None,
    }
}

/// Validates an uploaded file and returns it as a `data:<mime>;base64,...` URI.
///
/// The size check runs first, then the declared MIME type, then the content is
/// sniffed so a renamed non-image cannot slip through. When no type is
/// declared the sniffed format decides.
pub fn accept_profile_image(
    content_type: Option<&str>,
    bytes: &[u8],
    limit: usize,
) -> Result<String, ImageError> {
    if bytes.len() > limit {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    if let Some(ct) = &declared {
        if !ACCEPTED_TYPES.contains(&ct.as_str()) {
            return Err(ImageError::UnsupportedType(ct.clone()));
        }
    }

    let sniffed = image::guess_format(bytes)
        .ok()
        .and_then(mime_of)
        .ok_or(ImageError::Unrecognized)?;

    // Header only; the edge check below reports the actual size.
    let (width, height) = reader(bytes, Limits::default())?
        .into_dimensions()
        .map_err(|_| ImageError::Unrecognized)?;
    if width > MAX_IMAGE_EDGE || height > MAX_IMAGE_EDGE {
        return Err(ImageError::Dimensions { width, height });
    }

    Ok(format!("data:{sniffed};base64,{}", STANDARD.encode(bytes)))
}

fn reader(bytes: &[u8], limits: Limits) -> Result<ImageReader<Cursor<&[u8]>>, ImageError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|_| ImageError::Unrecognized)?;
    reader.limits(limits);
    Ok(reader)
}

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_IMAGE_EDGE);
    limits.max_image_height = Some(MAX_IMAGE_EDGE);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    limits
}

/// Decodes image bytes under the same size limits as intake. Stored resumes
/// may carry images that never went through an upload.
pub fn decode_limited(bytes: &[u8]) -> Result<DynamicImage, ImageError> {
    reader(bytes, decode_limits())?
        .decode()
        .map_err(|e| ImageError::Undecodable(e.to_string()))
}

/// Splits a base64 `data:` URI into its MIME type and decoded bytes.
pub fn decode_data_uri(uri: &str) -> Result<(String, Vec<u8>), ImageError> {
    let rest = uri.strip_prefix("data:").ok_or(ImageError::MalformedDataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUri)?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or(ImageError::MalformedDataUri)?;
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|_| ImageError::MalformedDataUri)?;
    Ok((mime.to_string(), bytes))
}
