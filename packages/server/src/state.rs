use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::{ConnectionTrait, DatabaseConnection};

use crate::catalog::images::ImageService;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blob_store: Arc<dyn BlobStore>,
    pub config: AppConfig,
}

impl AppState {
    /// Image lifecycle service over the pooled connection.
    pub fn images(&self) -> ImageService<'_, DatabaseConnection> {
        ImageService::new(
            &self.db,
            self.blob_store.as_ref(),
            &self.config.storage.key_prefix,
        )
    }

    /// Image lifecycle service over `conn`, usually an open transaction.
    pub fn images_on<'a, C: ConnectionTrait>(&'a self, conn: &'a C) -> ImageService<'a, C> {
        ImageService::new(
            conn,
            self.blob_store.as_ref(),
            &self.config.storage.key_prefix,
        )
    }
}
