use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ImageStore, ImageStoreError};
use crate::domain::StoragePath;

/// Image store over any `object_store` backend; URLs are `public_base_url` joined with the path.
pub struct ObjectImageStore {
    inner: Arc<dyn ObjectStore>,
    public_base_url: String,
}

impl ObjectImageStore {
    pub fn new(inner: Arc<dyn ObjectStore>, public_base_url: impl Into<String>) -> Self {
        Self {
            inner,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn local(base_path: PathBuf, public_base_url: &str) -> Result<Self, ImageStoreError> {
        std::fs::create_dir_all(&base_path).map_err(ImageStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ImageStoreError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(fs), public_base_url))
    }

    pub fn in_memory(public_base_url: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), public_base_url)
    }

    pub fn public_url(&self, path: &StoragePath) -> String {
        format!("{}/{}", self.public_base_url, path.as_str())
    }
}

#[async_trait]
impl ImageStore for ObjectImageStore {
    async fn put(&self, path: &StoragePath, data: Bytes) -> Result<String, ImageStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .put(&store_path, PutPayload::from(data))
            .await
            .map_err(|e| ImageStoreError::UploadFailed(e.to_string()))?;

        Ok(self.public_url(path))
    }
}
