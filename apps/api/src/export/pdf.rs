//! Raster -> A4 PDF. The image is scaled to the page width and cut into
//! page-height segments; every segment is one JPEG XObject on its own page,
//! drawn from the top-left corner.

use image::codecs::jpeg::JpegEncoder;
use image::{imageops, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::export::ExportError;
use crate::layout::page::{page_slice_height, scaled_height_pt, A4_HEIGHT_PT, A4_WIDTH_PT};

const JPEG_QUALITY: u8 = 92;

/// Overrun (in points) tolerated before the rest of the image spills onto a new
/// page. Covers rounding between the pixel grid and the point grid.
const TAIL_TOLERANCE_PT: f32 = 0.5;

/// Row ranges `(top, height)` of the image, one per page.
pub fn segments(width: u32, height: u32) -> Vec<(u32, u32)> {
    let slice = page_slice_height(width);
    let mut out: Vec<(u32, u32)> = Vec::new();
    let mut top = 0;
    while top < height {
        let remaining = height - top;
        let take = if scaled_height_pt(width, remaining) <= A4_HEIGHT_PT + TAIL_TOLERANCE_PT {
            remaining
        } else {
            slice.min(remaining)
        };
        out.push((top, take));
        top += take;
    }
    out
}

fn encode_jpeg(segment: &RgbImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY)
        .encode_image(segment)
        .map_err(|e| ExportError::Pdf(format!("jpeg encoding failed: {e}")))?;
    Ok(bytes)
}

/// Builds the PDF for `raster`. `title` goes into the document info.
pub fn build_pdf(raster: &RgbImage, title: &str) -> Result<Vec<u8>, ExportError> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(ExportError::Pdf("empty raster".to_string()));
    }

    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut page_ids: Vec<ObjectId> = Vec::new();

    for (index, (top, rows)) in segments(width, height).into_iter().enumerate() {
        let segment = imageops::crop_imm(raster, 0, top, width, rows).to_image();
        let jpeg = encode_jpeg(&segment)?;
        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => rows as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let name = format!("Im{}", index + 1);
        let draw_height = scaled_height_pt(width, rows);
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        A4_WIDTH_PT.into(),
                        0.into(),
                        0.into(),
                        draw_height.into(),
                        0.into(),
                        (A4_HEIGHT_PT - draw_height).into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(name.clone().into_bytes())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(format!("content stream: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), A4_WIDTH_PT.into(), A4_HEIGHT_PT.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! {
                    name.as_str() => image_id,
                },
            },
        });
        page_ids.push(page_id);
    }

    let page_count = page_ids.len();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.into_iter().map(Object::from).collect::<Vec<_>>(),
            "Count" => page_count as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(title.as_bytes().to_vec(), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("cvfacile ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ExportError::Pdf(format!("pdf write failed: {e}")))?;
    tracing::debug!(pages = page_count, bytes = out.len(), "pdf assembled");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page::{PAGE_HEIGHT_PX, PAGE_WIDTH_PX, SUPERSAMPLE};
    use image::Rgb;

    const W: u32 = PAGE_WIDTH_PX as u32 * SUPERSAMPLE;

    #[test]
    fn test_exact_a4_raster_is_one_page() {
        let h = PAGE_HEIGHT_PX as u32 * SUPERSAMPLE;
        assert_eq!(segments(W, h), vec![(0, h)]);
    }

    #[test]
    fn test_tall_raster_is_split_into_page_slices() {
        let slice = page_slice_height(W);
        let h = slice * 2 + 100;
        let segs = segments(W, h);
        assert_eq!(segs, vec![(0, slice), (slice, slice), (2 * slice, 100)]);
        for (_, rows) in segs {
            assert!(scaled_height_pt(W, rows) <= A4_HEIGHT_PT + TAIL_TOLERANCE_PT);
        }
    }

    #[test]
    fn test_segments_cover_every_row_once() {
        let h = 7_777;
        let segs = segments(W, h);
        let total: u32 = segs.iter().map(|(_, rows)| rows).sum();
        assert_eq!(total, h);
        for pair in segs.windows(2) {
            assert_eq!(pair[0].0 + pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_pdf_has_one_page_per_segment() {
        let raster = RgbImage::from_pixel(W, page_slice_height(W) + 50, Rgb([255, 255, 255]));
        let bytes = build_pdf(&raster, "CV Ada Lovelace").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_images_are_jpeg_xobjects() {
        let raster = RgbImage::from_pixel(100, 140, Rgb([10, 20, 30]));
        let bytes = build_pdf(&raster, "t").unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let images = doc
            .objects
            .values()
            .filter_map(|o| o.as_stream().ok())
            .filter(|s| s.dict.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Image".as_slice()))
            .inspect(|s| {
                assert_eq!(s.dict.get(b"Filter").and_then(Object::as_name).unwrap(), b"DCTDecode");
            })
            .count();
        assert_eq!(images, 1);
    }
}
