//! Image rotation about the centre.
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source position it comes from and interpolate there.
//!
//! For rotation by angle θ, the inverse transform is:
//! ```text
//! src_x = (dst_x - cx) * cos(-θ) - (dst_y - cy) * sin(-θ) + src_cx
//! src_y = (dst_x - cx) * sin(-θ) + (dst_y - cy) * cos(-θ) + src_cy
//! ```

use image::RgbaImage;

use super::sample::{sample, InterpolationFilter};

/// Compute the dimensions of the bounding box for a rotated image.
///
/// # Example
///
/// ```
/// use petpet_core::transform::compute_rotated_bounds;
///
/// let (w, h) = compute_rotated_bounds(100, 50, 90.0);
/// assert_eq!((w, h), (50, 100));
/// ```
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let angle_normalized = angle_degrees % 360.0;
    let abs_angle = angle_normalized.abs();

    // Exact quarter turns avoid trig rounding.
    if abs_angle < 0.001 || (360.0 - abs_angle).abs() < 0.001 || (abs_angle - 180.0).abs() < 0.001
    {
        return (width, height);
    }
    if (abs_angle - 90.0).abs() < 0.001 || (abs_angle - 270.0).abs() < 0.001 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();
    let (w, h) = (f64::from(width), f64::from(height));

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image counter-clockwise by `angle_degrees` about its centre.
///
/// With `expand` the canvas grows to the rotated bounding box so nothing is
/// clipped; without it the output keeps the source size. Areas not covered
/// by the source are transparent.
pub fn rotate(
    image: &RgbaImage,
    angle_degrees: f64,
    expand: bool,
    filter: InterpolationFilter,
) -> RgbaImage {
    if angle_degrees.abs() < 0.001 {
        return image.clone();
    }

    let (src_w, src_h) = (f64::from(image.width()), f64::from(image.height()));
    let (dst_w, dst_h) = if expand {
        compute_rotated_bounds(image.width(), image.height(), angle_degrees)
    } else {
        image.dimensions()
    };

    // Image y grows downwards, so a visual counter-clockwise turn is a
    // clockwise one in pixel coordinates.
    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let (src_cx, src_cy) = (src_w / 2.0, src_h / 2.0);
    let (dst_cx, dst_cy) = (f64::from(dst_w) / 2.0, f64::from(dst_h) / 2.0);

    RgbaImage::from_fn(dst_w, dst_h, |x, y| {
        let dx = f64::from(x) + 0.5 - dst_cx;
        let dy = f64::from(y) + 0.5 - dst_cy;

        let src_x = dx * cos - dy * sin + src_cx;
        let src_y = dx * sin + dy * cos + src_cy;

        sample(image, src_x, src_y, filter)
    })
}
