//! PDF export: rasterize a rendered surface at 2x, then wrap the raster in an
//! A4 document.
//!
//! # Cancellation
//! `export_surface` is not cancellable. Once the blocking worker starts it runs
//! to completion; dropping the returned future only discards the result.

pub mod filename;
pub mod handlers;
pub mod pdf;
pub mod raster;

use std::sync::Arc;

use thiserror::Error;

use crate::render::Surface;

pub use filename::{content_disposition, export_filename};
pub use raster::Rasterizer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no rendered surface for this handle")]
    SurfaceNotFound,

    #[error("rasterization failed: {0}")]
    Rasterize(String),

    #[error("pdf assembly failed: {0}")]
    Pdf(String),

    #[error("export worker failed: {0}")]
    Worker(String),
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
}

/// Synchronous pipeline: measure, rasterize, paginate, encode.
pub fn export_blocking(
    rasterizer: &Rasterizer,
    surface: &Surface,
    title: &str,
) -> Result<ExportedPdf, ExportError> {
    let raster = rasterizer.rasterize(surface)?;
    let (width_px, height_px) = raster.dimensions();
    let bytes = pdf::build_pdf(&raster, title)?;
    Ok(ExportedPdf {
        bytes,
        width_px,
        height_px,
    })
}

/// Runs the pipeline on a blocking worker.
pub async fn export_surface(
    rasterizer: Arc<Rasterizer>,
    surface: Arc<Surface>,
    title: String,
) -> Result<ExportedPdf, ExportError> {
    // CPU-bound: rasterization and JPEG encoding must stay off the async executor.
    tokio::task::spawn_blocking(move || export_blocking(&rasterizer, &surface, &title))
        .await
        .map_err(|e| ExportError::Worker(e.to_string()))?
}
