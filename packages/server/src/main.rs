use std::sync::Arc;

use anyhow::Context;
use common::StorageBackendKind;
use common::storage::BlobStore;
use common::storage::filesystem::FilesystemBlobStore;
use common::storage::s3::S3BlobStore;
use tokio::signal;
use tracing::{Level, info};

use catalog_server::config::AppConfig;
use catalog_server::database::init_db;
use catalog_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready");

    let blob_store: Arc<dyn BlobStore> = match config.storage.backend {
        StorageBackendKind::S3 => Arc::new(S3BlobStore::new(&config.storage)?),
        StorageBackendKind::Filesystem => {
            Arc::new(FilesystemBlobStore::new(config.storage.base_path.clone()).await?)
        }
    };
    info!(backend = ?config.storage.backend, bucket = %config.storage.bucket, "Blob store ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db: db.clone(),
        blob_store,
        config,
    };
    let app = catalog_server::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await?;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
