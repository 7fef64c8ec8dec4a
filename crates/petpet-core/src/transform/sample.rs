//! Inverse-mapping pixel samplers shared by rotation and perspective warps.
//!
//! Coordinates passed to [`sample`] are continuous "area" coordinates: the
//! pixel at column `i` covers `[i, i + 1)` and its centre sits at `i + 0.5`.
//! Points outside `[0, width) x [0, height)` sample as fully transparent.

use image::{Rgba, RgbaImage};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Interpolation filter for warp operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Bilinear interpolation over the 2x2 neighbourhood.
    Bilinear,
    /// Cubic convolution over the 4x4 neighbourhood.
    #[default]
    Bicubic,
}

/// Sample `image` at area coordinates `(x, y)`.
pub(crate) fn sample(image: &RgbaImage, x: f64, y: f64, filter: InterpolationFilter) -> Rgba<u8> {
    let (w, h) = (f64::from(image.width()), f64::from(image.height()));
    if !(x >= 0.0 && x < w && y >= 0.0 && y < h) {
        return TRANSPARENT;
    }

    // Shift to pixel-centre coordinates.
    let (px, py) = (x - 0.5, y - 0.5);
    match filter {
        InterpolationFilter::Bilinear => sample_bilinear(image, px, py),
        InterpolationFilter::Bicubic => sample_bicubic(image, px, py),
    }
}

#[inline]
fn clamped_pixel(image: &RgbaImage, x: i64, y: i64) -> [f64; 4] {
    let cx = x.clamp(0, i64::from(image.width()) - 1) as u32;
    let cy = y.clamp(0, i64::from(image.height()) - 1) as u32;
    image.get_pixel(cx, cy).0.map(f64::from)
}

fn sample_bilinear(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = clamped_pixel(image, x0, y0);
    let p10 = clamped_pixel(image, x0 + 1, y0);
    let p01 = clamped_pixel(image, x0, y0 + 1);
    let p11 = clamped_pixel(image, x0 + 1, y0 + 1);

    let mut result = [0u8; 4];
    for (c, out) in result.iter_mut().enumerate() {
        let v = p00[c] * (1.0 - fx) * (1.0 - fy)
            + p10[c] * fx * (1.0 - fy)
            + p01[c] * (1.0 - fx) * fy
            + p11[c] * fx * fy;
        *out = v.round().clamp(0.0, 255.0) as u8;
    }
    Rgba(result)
}

fn sample_bicubic(image: &RgbaImage, x: f64, y: f64) -> Rgba<u8> {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let wx = cubic_weights(fx);
    let wy = cubic_weights(fy);

    let mut sum = [0.0f64; 4];
    for (j, wyj) in wy.iter().enumerate() {
        for (i, wxi) in wx.iter().enumerate() {
            let p = clamped_pixel(image, x0 - 1 + i as i64, y0 - 1 + j as i64);
            let weight = wxi * wyj;
            for (acc, v) in sum.iter_mut().zip(p) {
                *acc += v * weight;
            }
        }
    }

    Rgba(sum.map(|v| v.round().clamp(0.0, 255.0) as u8))
}

/// Weights for the taps at offsets -1, 0, 1, 2 around a fractional position.
#[inline]
fn cubic_weights(t: f64) -> [f64; 4] {
    [
        cubic_kernel(t + 1.0),
        cubic_kernel(t),
        cubic_kernel(1.0 - t),
        cubic_kernel(2.0 - t),
    ]
}

/// Keys cubic convolution kernel with a = -0.5.
///
/// ```text
/// W(x) = (a+2)|x|^3 - (a+3)|x|^2 + 1        for |x| < 1
/// W(x) = a|x|^3 - 5a|x|^2 + 8a|x| - 4a      for 1 <= |x| < 2
/// W(x) = 0                                  otherwise
/// ```
fn cubic_kernel(x: f64) -> f64 {
    const A: f64 = -0.5;
    let x = x.abs();
    if x < 1.0 {
        ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        (((x - 5.0) * x + 8.0) * x - 4.0) * A
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            Rgba([v, v, v, 255])
        })
    }

    #[test]
    fn test_kernel_interpolates_at_integers() {
        assert!((cubic_kernel(0.0) - 1.0).abs() < f64::EPSILON);
        assert!(cubic_kernel(1.0).abs() < f64::EPSILON);
        assert!(cubic_kernel(2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weights_partition_unity() {
        for t in [0.0, 0.1, 0.25, 0.5, 0.75, 0.99] {
            let sum: f64 = cubic_weights(t).iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "t = {t}, sum = {sum}");
        }
    }

    #[test]
    fn test_pixel_centres_are_exact() {
        let img = checker(5, 5);
        for filter in [InterpolationFilter::Bilinear, InterpolationFilter::Bicubic] {
            for y in 0..5 {
                for x in 0..5 {
                    let s = sample(&img, x as f64 + 0.5, y as f64 + 0.5, filter);
                    assert_eq!(s, *img.get_pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn test_outside_is_transparent() {
        let img = checker(4, 4);
        assert_eq!(sample(&img, -0.01, 1.0, InterpolationFilter::Bicubic), TRANSPARENT);
        assert_eq!(sample(&img, 4.0, 1.0, InterpolationFilter::Bicubic), TRANSPARENT);
        assert_eq!(sample(&img, 1.0, f64::NAN, InterpolationFilter::Bicubic), TRANSPARENT);
    }

    #[test]
    fn test_uniform_image_stays_uniform() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([40, 80, 120, 200]));
        let s = sample(&img, 2.3, 4.7, InterpolationFilter::Bicubic);
        assert_eq!(s, Rgba([40, 80, 120, 200]));
    }
}
