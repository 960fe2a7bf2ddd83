use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, ImageFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageFetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("image too large: {size} bytes exceeds limit of {limit}")]
    TooLarge { size: u64, limit: u64 },
}
