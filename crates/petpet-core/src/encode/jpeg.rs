//! JPEG encoding for still output.
//!
//! JPEG has no alpha channel, so RGBA input is composited onto a white
//! background before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::io::Cursor;

use super::EncodeError;
use crate::transform::flatten;

/// Default quality for still output.
pub const JPEG_QUALITY: u8 = 90;

/// Encode an RGBA image as JPEG, flattening transparency onto white.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use petpet_core::encode::encode_jpeg;
///
/// let img = RgbaImage::new(16, 16); // fully transparent
/// let jpeg = encode_jpeg(&img, 90).unwrap();
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let flat = flatten(image, [255, 255, 255]);
    let rgb: Vec<u8> = flat
        .pixels()
        .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
        .collect();
    encode_rgb_jpeg(&rgb, image.width(), image.height(), quality)
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
pub fn encode_rgb_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
