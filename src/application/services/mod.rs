mod batch_processor;
mod image_transformer;
mod intake_service;
mod row_validator;

pub use batch_processor::{BatchError, BatchProcessor, COMPLETED_MESSAGE};
pub use image_transformer::{ImageTransformError, ImageTransformer};
pub use intake_service::{IntakeError, IntakeService};
pub use row_validator::{RowValidationError, validate_rows};
