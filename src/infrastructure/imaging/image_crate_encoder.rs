use std::io::Cursor;

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use tiff::encoder::compression::{Deflate, DeflateLevel};
use tiff::encoder::{TiffEncoder, colortype};

use crate::application::ports::{CompressedImage, CompressionError, ImageEncoder};
use crate::domain::ImageFormat;

pub const DEFAULT_QUALITY: u8 = 50;

/// Re-encodes in the source format at `quality`.
///
/// JPEG and WebP are lossy at that quality. TIFF is rewritten with Deflate, PNG with the
/// matching deflate effort; both stay lossless, so no palette quantization happens for PNG.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateEncoder {
    quality: u8,
}

impl ImageCrateEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    fn png_compression(&self) -> CompressionType {
        if self.quality <= 50 {
            CompressionType::Best
        } else {
            CompressionType::Default
        }
    }

    fn tiff_deflate_level(&self) -> DeflateLevel {
        if self.quality <= 50 {
            DeflateLevel::Best
        } else {
            DeflateLevel::Balanced
        }
    }

    fn encode_webp(&self, img: &DynamicImage) -> Result<Vec<u8>, CompressionError> {
        let encoded = if img.color().has_alpha() {
            let rgba = img.to_rgba8();
            webp::Encoder::from_rgba(&rgba, rgba.width(), rgba.height())
                .encode_simple(false, f32::from(self.quality))
        } else {
            let rgb = img.to_rgb8();
            webp::Encoder::from_rgb(&rgb, rgb.width(), rgb.height())
                .encode_simple(false, f32::from(self.quality))
        };

        encoded
            .map(|memory| memory.to_vec())
            .map_err(|e| CompressionError::Encode(format!("webp: {:?}", e)))
    }

    fn encode_tiff(&self, img: &DynamicImage) -> Result<Vec<u8>, CompressionError> {
        let mut out: Vec<u8> = Vec::new();
        {
            let mut encoder = TiffEncoder::new(Cursor::new(&mut out))
                .map_err(|e| CompressionError::Encode(e.to_string()))?;
            let compression = Deflate::with_level(self.tiff_deflate_level());

            let written = if img.color().has_alpha() {
                let rgba = img.to_rgba8();
                encoder.write_image_with_compression::<colortype::RGBA8, _>(
                    rgba.width(),
                    rgba.height(),
                    compression,
                    rgba.as_raw(),
                )
            } else {
                let rgb = img.to_rgb8();
                encoder.write_image_with_compression::<colortype::RGB8, _>(
                    rgb.width(),
                    rgb.height(),
                    compression,
                    rgb.as_raw(),
                )
            };
            written.map_err(|e| CompressionError::Encode(e.to_string()))?;
        }

        Ok(out)
    }
}

impl Default for ImageCrateEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY)
    }
}

impl ImageEncoder for ImageCrateEncoder {
    fn compress(&self, data: &[u8]) -> Result<CompressedImage, CompressionError> {
        let detected = image::guess_format(data)
            .map_err(|_| CompressionError::UnsupportedFormat("unrecognized".to_string()))?;
        let format = ImageFormat::from_image_crate(detected).ok_or_else(|| {
            CompressionError::UnsupportedFormat(format!("{:?}", detected).to_lowercase())
        })?;

        let img = image::load_from_memory_with_format(data, detected)
            .map_err(|e| CompressionError::Decode(e.to_string()))?;

        let out = match format {
            ImageFormat::Jpeg => {
                let mut out = Vec::new();
                DynamicImage::ImageRgb8(img.to_rgb8())
                    .write_with_encoder(JpegEncoder::new_with_quality(&mut out, self.quality))
                    .map_err(|e| CompressionError::Encode(e.to_string()))?;
                out
            }
            ImageFormat::Png => {
                let mut out = Vec::new();
                img.write_with_encoder(PngEncoder::new_with_quality(
                    &mut out,
                    self.png_compression(),
                    FilterType::Adaptive,
                ))
                .map_err(|e| CompressionError::Encode(e.to_string()))?;
                out
            }
            ImageFormat::WebP => self.encode_webp(&img)?,
            ImageFormat::Tiff => self.encode_tiff(&img)?,
        };

        Ok(CompressedImage {
            format,
            data: out,
            original_size: data.len(),
        })
    }
}
