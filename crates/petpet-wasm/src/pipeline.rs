//! Full still-or-animated pipeline bindings.
//!
//! These take encoded input bytes and return encoded output: JPEG for still
//! sources, GIF for animated ones.
//!
//! # Example
//!
//! ```typescript
//! import { render_perspective } from '@petpet/wasm';
//!
//! const out = render_perspective(bytes, [0, 6, 49, 6, 49, 61, 0, 61], { max_frames: 30, zoom: 0.8 });
//! const blob = new Blob([out.bytes()], { type: out.mime_type });
//! ```

use crate::transform::quad_from_points;
use crate::types::JsEncodedOutput;
use petpet_core::transform::{fit_size, perspective, SizeSpec};
use petpet_core::{make_jpg_or_gif_from_bytes, AnimationBudget};
use wasm_bindgen::prelude::*;

/// Deserialize an optional `{ max_frames, zoom }` object; `undefined` or
/// `null` gives the default budget.
fn budget_from_js(value: JsValue) -> Result<AnimationBudget, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(AnimationBudget::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid animation budget: {}", e)))
}

/// Fit every frame of the source onto a canvas.
///
/// # Arguments
///
/// * `bytes` - Encoded source image (JPEG, PNG, GIF or WebP)
/// * `spec` - `{ width, height, mode?, direction?, bg_color? }`; `width`
///   and `height` must be at least 1. Enum values are lowercase strings:
///   `mode` is `"inside"` or `"include"`, `direction` is `"center"`,
///   `"north"`, `"south"`, `"west"`, `"east"`, `"northwest"`,
///   `"northeast"`, `"southwest"` or `"southeast"`.
/// * `budget` - optional `{ max_frames?, zoom? }`
#[wasm_bindgen]
pub fn render_fit(bytes: &[u8], spec: JsValue, budget: JsValue) -> Result<JsEncodedOutput, JsValue> {
    let spec: SizeSpec = serde_wasm_bindgen::from_value(spec)
        .map_err(|e| JsValue::from_str(&format!("Invalid size spec: {}", e)))?;
    spec.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let budget = budget_from_js(budget)?;
    make_jpg_or_gif_from_bytes(bytes, |frame| Ok(fit_size(frame, &spec)), &budget)
        .map(JsEncodedOutput::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Warp every frame of the source onto a quadrilateral.
///
/// `points` is `[x0, y0, x1, y1, x2, y2, x3, y3]` (top-left, top-right,
/// bottom-right, bottom-left).
#[wasm_bindgen]
pub fn render_perspective(
    bytes: &[u8],
    points: &[f64],
    budget: JsValue,
) -> Result<JsEncodedOutput, JsValue> {
    let quad = quad_from_points(points)
        .ok_or_else(|| JsValue::from_str("Expected 8 coordinates (4 corners)"))?;
    let budget = budget_from_js(budget)?;
    make_jpg_or_gif_from_bytes(bytes, |frame| Ok(perspective(frame, &quad)?), &budget)
        .map(JsEncodedOutput::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Delay, Frame, Rgba, RgbaImage};
    use petpet_core::transform::{FitDirection, FitMode};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gif_bytes(frames: usize) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            for i in 0..frames {
                let img = RgbaImage::from_pixel(16, 16, Rgba([(i * 20) as u8, 0, 0, 255]));
                encoder
                    .encode_frame(Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(50, 1)))
                    .unwrap();
            }
        }
        out
    }

    #[wasm_bindgen_test]
    fn test_render_fit_animated_gives_gif() {
        let spec = serde_wasm_bindgen::to_value(&SizeSpec::new(8, 8)).unwrap();
        let out = render_fit(&gif_bytes(4), spec, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.format(), "gif");
        assert!(out.is_animated());
    }

    #[wasm_bindgen_test]
    fn test_render_perspective_with_budget() {
        let budget = serde_wasm_bindgen::to_value(&AnimationBudget::new(2, 0.5).unwrap()).unwrap();
        let points = [0.0, 0.0, 20.0, 2.0, 20.0, 18.0, 0.0, 20.0];
        let out = render_perspective(&gif_bytes(6), &points, budget).unwrap();
        assert_eq!(out.format(), "gif");
    }

    #[wasm_bindgen_test]
    fn test_invalid_budget_rejected() {
        let budget = serde_wasm_bindgen::to_value(&AnimationBudget {
            max_frames: 0,
            zoom: 1.0,
        })
        .unwrap();
        let points = [0.0, 0.0, 20.0, 0.0, 20.0, 20.0, 0.0, 20.0];
        assert!(render_perspective(&gif_bytes(3), &points, budget).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_fit_zero_side_rejected() {
        let spec = serde_wasm_bindgen::to_value(&SizeSpec::new(0, 8)).unwrap();
        assert!(render_fit(&gif_bytes(3), spec, JsValue::UNDEFINED).is_err());
    }

    #[wasm_bindgen_test]
    fn test_render_fit_lowercase_enums() {
        let direction = serde_wasm_bindgen::to_value(&FitDirection::NorthWest).unwrap();
        assert_eq!(direction.as_string().as_deref(), Some("northwest"));

        let spec = SizeSpec::new(8, 8)
            .with_mode(FitMode::Inside)
            .with_direction(FitDirection::NorthWest);
        let spec = serde_wasm_bindgen::to_value(&spec).unwrap();
        let out = render_fit(&gif_bytes(2), spec, JsValue::UNDEFINED).unwrap();
        assert_eq!(out.format(), "gif");
    }

    #[wasm_bindgen_test]
    fn test_wrong_point_count() {
        assert!(render_perspective(&gif_bytes(2), &[0.0; 4], JsValue::UNDEFINED).is_err());
    }
}
