mod image_crate_encoder;

pub use image_crate_encoder::{DEFAULT_QUALITY, ImageCrateEncoder};
