mod config;
mod editor;
mod errors;
mod export;
mod i18n;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod storage;
mod style;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StorageKind};
use crate::export::Rasterizer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{FileBackend, MemoryBackend, StorageBackend};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Facile API v{}", env!("CARGO_PKG_VERSION"));

    // Saved-resume storage
    let backend: Arc<dyn StorageBackend> = match config.storage_backend {
        StorageKind::File => {
            let backend = FileBackend::open(&config.storage_dir).with_context(|| {
                format!("cannot open storage directory {}", config.storage_dir.display())
            })?;
            info!("File storage at {}", backend.dir().display());
            Arc::new(backend)
        }
        StorageKind::Memory => {
            info!("In-memory storage (records are lost on restart)");
            Arc::new(MemoryBackend::new())
        }
    };

    // Parsing the bundled faces is CPU-bound; keep it off the async executor.
    let rasterizer = tokio::task::spawn_blocking(Rasterizer::new)
        .await
        .context("font database initialization panicked")?;

    info!(
        "Default language: {}, surface cache: {}",
        config.default_locale.tag(),
        config.surface_cache_limit
    );

    let state = AppState::new(config.clone(), backend, Arc::new(rasterizer));

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
