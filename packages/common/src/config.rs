use std::path::PathBuf;

use serde::Deserialize;

/// Which blob store backend holds catalog images.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// S3-compatible object storage (requires the `object-storage` feature).
    S3,
    /// Local directory, for development and tests.
    #[default]
    Filesystem,
}

/// App-level blob storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Backend selection. Default: "filesystem".
    #[serde(default)]
    pub backend: StorageBackendKind,
    /// Bucket holding the image objects. Default: "assets".
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Bucket region. Default: "ca-central-1".
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (MinIO, R2, ...). When set, `region` is only a label.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Static credentials. Read from the environment when absent.
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    /// Use path-style bucket addressing. Default: false.
    #[serde(default)]
    pub path_style: bool,
    /// Fixed path segment prepended to every object key. Default: "assets/uploads/".
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Lifetime of presigned upload URLs in seconds. Default: 900 (15 minutes).
    #[serde(default = "default_presign_expiry_secs")]
    pub presign_expiry_secs: u32,
    /// Root directory of the filesystem backend. Default: "./data/blobs".
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
}

fn default_bucket() -> String {
    "assets".into()
}
fn default_region() -> String {
    "ca-central-1".into()
}
fn default_key_prefix() -> String {
    "assets/uploads/".into()
}
fn default_presign_expiry_secs() -> u32 {
    900
}
fn default_base_path() -> PathBuf {
    PathBuf::from("./data/blobs")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
            key_prefix: default_key_prefix(),
            presign_expiry_secs: default_presign_expiry_secs(),
            base_path: default_base_path(),
        }
    }
}
