use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    CompressionError, ImageEncoder, ImageFetchError, ImageFetcher, ImageStore, ImageStoreError,
};
use crate::domain::{JobId, StoragePath};

/// Fetch, re-encode and re-host a single image.
pub struct ImageTransformer {
    fetcher: Arc<dyn ImageFetcher>,
    encoder: Arc<dyn ImageEncoder>,
    store: Arc<dyn ImageStore>,
}

impl ImageTransformer {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        encoder: Arc<dyn ImageEncoder>,
        store: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            fetcher,
            encoder,
            store,
        }
    }

    #[tracing::instrument(skip(self, job_id, url), fields(job_id = %job_id))]
    pub async fn transform(
        &self,
        job_id: JobId,
        row_index: usize,
        image_index: usize,
        url: &str,
    ) -> Result<String, ImageTransformError> {
        let data = self
            .fetcher
            .fetch(url)
            .await
            .map_err(ImageTransformError::Fetch)?;

        tracing::debug!(bytes = data.len(), "Image fetched, starting compression");

        let encoder = Arc::clone(&self.encoder);
        let compressed = tokio::task::spawn_blocking(move || encoder.compress(&data))
            .await
            .map_err(|e| ImageTransformError::Worker(e.to_string()))?
            .map_err(ImageTransformError::Compression)?;

        tracing::debug!(
            format = %compressed.format,
            original_bytes = compressed.original_size,
            compressed_bytes = compressed.data.len(),
            "Image compressed"
        );

        let path = StoragePath::for_image(&job_id, row_index, image_index, compressed.format);
        self.store
            .put(&path, Bytes::from(compressed.data))
            .await
            .map_err(ImageTransformError::Storage)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ImageTransformError {
    #[error("fetch: {0}")]
    Fetch(ImageFetchError),
    #[error("compression: {0}")]
    Compression(CompressionError),
    #[error("image store: {0}")]
    Storage(ImageStoreError),
    #[error("compression worker crashed: {0}")]
    Worker(String),
}

impl ImageTransformError {
    /// Fatal errors are systemic and abort the whole batch; the rest only void one image slot.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Worker(_))
    }
}
