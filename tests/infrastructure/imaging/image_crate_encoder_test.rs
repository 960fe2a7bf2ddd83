use batchpress::application::ports::{CompressionError, ImageEncoder};
use batchpress::domain::ImageFormat;
use batchpress::infrastructure::imaging::{DEFAULT_QUALITY, ImageCrateEncoder};

use crate::helpers::{
    fast_png_bytes, gif_header_bytes, jpeg_bytes, lossy_webp_bytes, lzw_tiff_bytes, png_bytes,
    tiff_bytes, webp_bytes,
};

fn assert_same_dimensions_as(input: &[u8], encoded: &[u8]) {
    let original = image::load_from_memory(input).expect("input should decode");
    let decoded = image::load_from_memory(encoded).expect("output should decode");
    assert_eq!(
        (decoded.width(), decoded.height()),
        (original.width(), original.height())
    );
}

fn assert_does_not_grow(input: Vec<u8>, expected: ImageFormat) {
    let compressed = ImageCrateEncoder::default()
        .compress(&input)
        .expect("image should compress");

    assert_eq!(compressed.format, expected);
    assert!(
        compressed.data.len() <= input.len(),
        "{} grew from {} to {} bytes",
        expected,
        input.len(),
        compressed.data.len()
    );
    assert_same_dimensions_as(&input, &compressed.data);
}

#[test]
fn given_default_encoder_when_created_then_quality_is_fifty() {
    assert_eq!(ImageCrateEncoder::default().quality(), DEFAULT_QUALITY);
    assert_eq!(DEFAULT_QUALITY, 50);
}

#[test]
fn given_out_of_range_quality_when_created_then_it_is_clamped() {
    assert_eq!(ImageCrateEncoder::new(0).quality(), 1);
    assert_eq!(ImageCrateEncoder::new(250).quality(), 100);
}

#[test]
fn given_jpeg_when_compressed_then_output_stays_jpeg() {
    let input = jpeg_bytes();

    let compressed = ImageCrateEncoder::default()
        .compress(&input)
        .expect("jpeg should compress");

    assert_eq!(compressed.format, ImageFormat::Jpeg);
    assert_eq!(compressed.original_size, input.len());
    assert_eq!(
        image::guess_format(&compressed.data).expect("format"),
        image::ImageFormat::Jpeg
    );
    assert_same_dimensions_as(&input, &compressed.data);
}

#[test]
fn given_lower_quality_when_compressing_jpeg_then_output_is_not_larger() {
    let input = jpeg_bytes();

    let high = ImageCrateEncoder::new(95).compress(&input).expect("compress");
    let low = ImageCrateEncoder::new(10).compress(&input).expect("compress");

    assert!(low.data.len() <= high.data.len());
}

#[test]
fn given_png_webp_and_tiff_when_compressed_then_source_format_is_kept() {
    let cases = [
        (png_bytes(), ImageFormat::Png),
        (webp_bytes(), ImageFormat::WebP),
        (tiff_bytes(), ImageFormat::Tiff),
    ];

    for (input, expected) in cases {
        let compressed = ImageCrateEncoder::default()
            .compress(&input)
            .expect("image should compress");

        assert_eq!(compressed.format, expected);
        assert_same_dimensions_as(&input, &compressed.data);
    }
}

#[test]
fn given_lossy_webp_when_compressed_then_output_does_not_grow() {
    assert_does_not_grow(lossy_webp_bytes(90.0), ImageFormat::WebP);
}

#[test]
fn given_lower_quality_when_compressing_webp_then_output_is_not_larger() {
    let input = lossy_webp_bytes(95.0);

    let high = ImageCrateEncoder::new(95).compress(&input).expect("compress");
    let low = ImageCrateEncoder::new(10).compress(&input).expect("compress");

    assert!(low.data.len() <= high.data.len());
}

#[test]
fn given_lzw_tiff_when_compressed_then_output_does_not_grow() {
    assert_does_not_grow(lzw_tiff_bytes(), ImageFormat::Tiff);
}

#[test]
fn given_uncompressed_tiff_when_compressed_then_output_does_not_grow() {
    assert_does_not_grow(tiff_bytes(), ImageFormat::Tiff);
}

#[test]
fn given_fast_deflate_png_when_compressed_then_output_does_not_grow() {
    assert_does_not_grow(fast_png_bytes(), ImageFormat::Png);
}

#[test]
fn given_gif_when_compressed_then_format_is_unsupported() {
    let result = ImageCrateEncoder::default().compress(&gif_header_bytes());

    match result {
        Err(CompressionError::UnsupportedFormat(format)) => assert_eq!(format, "gif"),
        other => panic!("expected unsupported format, got {:?}", other.map(|c| c.format)),
    }
}

#[test]
fn given_arbitrary_bytes_when_compressed_then_format_is_unrecognized() {
    assert!(matches!(
        ImageCrateEncoder::default().compress(b"plain text, not pixels"),
        Err(CompressionError::UnsupportedFormat(_))
    ));
}

#[test]
fn given_truncated_png_when_compressed_then_decode_error_is_returned() {
    let mut input = png_bytes();
    input.truncate(40);

    assert!(matches!(
        ImageCrateEncoder::default().compress(&input),
        Err(CompressionError::Decode(_))
    ));
}
