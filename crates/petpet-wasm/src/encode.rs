//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@petpet/wasm';
//!
//! const jpeg = encode_jpeg_from_image(image, 90);
//! await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
//! ```

use crate::transform::to_core;
use crate::types::JsImage;
use petpet_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a JsImage to JPEG bytes.
///
/// Transparent areas are flattened onto white.
///
/// # Arguments
///
/// * `image` - The image to encode
/// * `quality` - JPEG quality (1-100, recommended: 90)
///
/// # Errors
///
/// Returns an error if the image has zero size or its pixel buffer doesn't
/// match its dimensions.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    let src = to_core(image)?;
    encode::encode_jpeg(&src, quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for encode bindings.
///
/// Note: functions returning `Result<T, JsValue>` only work on wasm32 targets.
/// The underlying encoder is covered by `petpet_core::encode`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_converts_and_encodes() {
        let img = JsImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let core = img.to_rgba().unwrap();
        let jpeg = encode::encode_jpeg(&core, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_image() {
        let img = JsImage::new(50, 50, vec![128u8; 50 * 50 * 4]);
        let jpeg = encode_jpeg_from_image(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_dimensions() {
        let img = JsImage::new(0, 10, vec![]);
        assert!(encode_jpeg_from_image(&img, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let img = JsImage::new(100, 100, vec![128u8; 50 * 50 * 4]);
        assert!(encode_jpeg_from_image(&img, 90).is_err());
    }
}
