//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, image_frame_count } from '@petpet/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}, ${image_frame_count(bytes)} frame(s)`);
//! ```

use crate::types::JsImage;
use petpet_core::decode::{self, decode_frame, decode_source};
use wasm_bindgen::prelude::*;

/// Decode the first frame of a JPEG, PNG, GIF or WebP image to RGBA.
///
/// JPEG EXIF orientation is applied.
///
/// # Errors
///
/// Returns an error if the format is not recognised or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImage, JsValue> {
    let source = decode_source(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
    decode_frame(&source, 0)
        .map(JsImage::from_rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Number of frames in an encoded image (1 for stills).
#[wasm_bindgen]
pub fn image_frame_count(bytes: &[u8]) -> Result<usize, JsValue> {
    decode_source(bytes)
        .map(|source| source.frame_count())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0 = Nearest, 1 = Bilinear, 2 = Bicubic, anything else Lanczos3.
#[wasm_bindgen]
pub fn resize(image: &JsImage, width: u32, height: u32, filter: u8) -> Result<JsImage, JsValue> {
    let src = crate::transform::to_core(image)?;
    let filter = match filter {
        0 => decode::FilterType::Nearest,
        1 => decode::FilterType::Bilinear,
        2 => decode::FilterType::Bicubic,
        _ => decode::FilterType::Lanczos3,
    };
    Ok(JsImage::from_rgba(decode::resize(&src, width, height, filter)))
}
