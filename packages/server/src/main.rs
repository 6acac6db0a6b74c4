use std::sync::Arc;

use anyhow::Context;
use common::storage::filesystem::FilesystemImageStore;
use tracing::{Level, info};

use listing_server::config::AppConfig;
use listing_server::database::{ensure_sqlite_dir, init_db};
use listing_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    ensure_sqlite_dir(&config.database.url).context("Failed to create database directory")?;
    let db = init_db(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Database ready");

    let images = FilesystemImageStore::new(
        config.storage.image_dir.clone(),
        config.storage.default_image.clone(),
        config.storage.max_image_size,
    )
    .await
    .context("Failed to initialize image store")?;
    info!("Image store at {}", images.image_dir().display());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        images: Arc::new(images),
        config,
    };
    let app = listing_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
