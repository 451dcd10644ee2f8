mod config;
mod editors;
mod errors;
mod export;
mod feedback;
mod models;
mod navigation;
mod render;
mod routes;
mod state;
mod storage;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::pdf::CommandRasterizer;
use crate::feedback::EmailJsRelay;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::FileStorage;
use crate::store::ProfileStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeGen v{}", env!("CARGO_PKG_VERSION"));

    // Local storage slots
    let storage = FileStorage::open(&config.data_dir)
        .with_context(|| format!("Cannot open data directory {}", config.data_dir.display()))?;
    info!("Storing builder state in {}", storage.dir().display());
    let store = ProfileStore::load(Arc::new(storage));

    let rasterizer = Arc::new(
        CommandRasterizer::new(config.pdf_renderer.clone()).with_timeout(config.pdf_timeout),
    );
    info!("PDF renderer: {}", config.pdf_renderer);

    let feedback = Arc::new(
        EmailJsRelay::new(config.emailjs.clone())
            .context("Failed to build feedback client")?
            .with_endpoint(config.emailjs_endpoint.clone()),
    );

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let origin: HeaderValue = format!("http://{addr}")
        .parse()
        .context("Bind address does not form a valid origin")?;

    let state = AppState::new(store, rasterizer, feedback);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]),
        );

    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
