//! WASM bindings for image transformation operations.
//!
//! Every function takes a `JsImage` and returns a new one; the input is left
//! untouched.

use crate::types::{direction_from_u8, mode_from_u8, JsImage};
use image::RgbaImage;
use petpet_core::transform::{self as ops, InterpolationFilter, Quadrilateral, SizeSpec};
use wasm_bindgen::prelude::*;

pub(crate) fn to_core(image: &JsImage) -> Result<RgbaImage, JsValue> {
    image.to_rgba().ok_or_else(|| {
        JsValue::from_str(&format!(
            "Invalid pixel data: expected {} bytes for {}x{} RGBA, got {}",
            image.width() as usize * image.height() as usize * 4,
            image.width(),
            image.height(),
            image.byte_length()
        ))
    })
}

/// Parse eight numbers `[x0, y0, x1, y1, x2, y2, x3, y3]` as destination
/// corners in top-left, top-right, bottom-right, bottom-left order.
pub(crate) fn quad_from_points(points: &[f64]) -> Option<Quadrilateral> {
    match points {
        [x0, y0, x1, y1, x2, y2, x3, y3] => Some(Quadrilateral::new(
            (*x0, *y0),
            (*x1, *y1),
            (*x2, *y2),
            (*x3, *y3),
        )),
        _ => None,
    }
}

/// Scale and position an image on a `width x height` canvas.
///
/// # Arguments
///
/// * `mode` - 0 = inside (letterbox), 1 = include (cover)
/// * `direction` - 0 = center, 1-8 = compass directions clockwise from north
///
/// # Errors
///
/// Returns an error if `width` or `height` is zero.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const avatar = fit_size(image, 200, 200, 1, 0);
/// ```
#[wasm_bindgen]
pub fn fit_size(
    image: &JsImage,
    width: u32,
    height: u32,
    mode: u8,
    direction: u8,
) -> Result<JsImage, JsValue> {
    let spec = SizeSpec::new(width, height)
        .with_mode(mode_from_u8(mode))
        .with_direction(direction_from_u8(direction));
    spec.validate().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let src = to_core(image)?;
    Ok(JsImage::from_rgba(ops::fit_size(&src, &spec)))
}

/// Warp an image onto a quadrilateral.
///
/// `points` is `[x0, y0, x1, y1, x2, y2, x3, y3]`: top-left, top-right,
/// bottom-right, bottom-left. The output canvas is the bounding extent of the
/// corners.
///
/// # Errors
///
/// Returns an error for a point list of the wrong length or a degenerate
/// quadrilateral.
#[wasm_bindgen]
pub fn perspective(image: &JsImage, points: &[f64]) -> Result<JsImage, JsValue> {
    let quad = quad_from_points(points)
        .ok_or_else(|| JsValue::from_str("Expected 8 coordinates (4 corners)"))?;
    let src = to_core(image)?;
    ops::perspective(&src, &quad)
        .map(JsImage::from_rgba)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate an image counter-clockwise about its centre.
///
/// With `expand` the canvas grows to hold the whole rotated image.
#[wasm_bindgen]
pub fn rotate(image: &JsImage, angle_degrees: f64, expand: bool) -> Result<JsImage, JsValue> {
    let src = to_core(image)?;
    Ok(JsImage::from_rgba(ops::rotate(
        &src,
        angle_degrees,
        expand,
        InterpolationFilter::Bicubic,
    )))
}

/// Mask an image to its inscribed ellipse.
#[wasm_bindgen]
pub fn circle(image: &JsImage) -> Result<JsImage, JsValue> {
    Ok(JsImage::from_rgba(ops::circle(&to_core(image)?)))
}

/// Centre-crop an image to a square.
#[wasm_bindgen]
pub fn square(image: &JsImage) -> Result<JsImage, JsValue> {
    Ok(JsImage::from_rgba(ops::square(&to_core(image)?)))
}
