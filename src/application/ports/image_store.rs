use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StoragePath;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores the object and returns the URL it is reachable under.
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<String, ImageStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
