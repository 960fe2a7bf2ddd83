use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;

use crate::application::ports::{ImageFetchError, ImageFetcher};
use crate::infrastructure::observability::sanitize_url;

pub struct ReqwestImageFetcher {
    client: Client,
    max_bytes: u64,
}

impl ReqwestImageFetcher {
    pub fn new(timeout: Duration, max_bytes: u64) -> Result<Self, ImageFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ImageFetchError::RequestFailed(e.to_string()))?;

        Ok(Self { client, max_bytes })
    }
}

#[async_trait]
impl ImageFetcher for ReqwestImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ImageFetchError> {
        tracing::debug!(url = %sanitize_url(url), "Fetching image");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ImageFetchError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ImageFetchError::Status(response.status().as_u16()));
        }

        if let Some(size) = response
            .content_length()
            .filter(|size| *size > self.max_bytes)
        {
            return Err(ImageFetchError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }

        // Bodies without Content-Length are capped while streaming.
        let capacity = response.content_length().unwrap_or(0).min(self.max_bytes);
        let mut body = BytesMut::with_capacity(capacity as usize);
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| ImageFetchError::RequestFailed(e.to_string()))?
        {
            let size = (body.len() + chunk.len()) as u64;
            if size > self.max_bytes {
                return Err(ImageFetchError::TooLarge {
                    size,
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }
}
