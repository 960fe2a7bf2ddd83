use crate::domain::ImageFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
    pub original_size: usize,
}

/// CPU-bound re-encoding; callers run it off the async executor.
pub trait ImageEncoder: Send + Sync {
    fn compress(&self, data: &[u8]) -> Result<CompressedImage, CompressionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}
