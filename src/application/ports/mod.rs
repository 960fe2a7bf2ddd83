mod image_encoder;
mod image_fetcher;
mod image_store;
mod job_repository;
mod repository_error;
mod row_parser;
mod webhook_notifier;

pub use image_encoder::{CompressedImage, CompressionError, ImageEncoder};
pub use image_fetcher::{ImageFetchError, ImageFetcher};
pub use image_store::{ImageStore, ImageStoreError};
pub use job_repository::{JobRepository, JobUpdate};
pub use repository_error::RepositoryError;
pub use row_parser::{RowParser, RowParserError};
pub use webhook_notifier::{WebhookNotifier, WebhookStatus};
