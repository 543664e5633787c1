use std::sync::Arc;

use crate::config::Config;
use crate::export::Rasterizer;
use crate::render::SurfaceRegistry;
use crate::storage::{ResumeRepository, StorageBackend};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repo: Arc<ResumeRepository>,
    /// Surfaces rendered by the preview endpoint, kept for export by handle.
    pub surfaces: Arc<SurfaceRegistry>,
    /// Font system and glyph cache; one per process.
    pub rasterizer: Arc<Rasterizer>,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn StorageBackend>, rasterizer: Arc<Rasterizer>) -> Self {
        let repo = ResumeRepository::new(backend, config.default_locale);
        let surfaces = SurfaceRegistry::new(config.surface_cache_limit);
        Self {
            config,
            repo: Arc::new(repo),
            surfaces: Arc::new(surfaces),
            rasterizer,
        }
    }
}
