//! Small shape helpers applied to avatars before or inside a transform.

use image::{Rgba, RgbaImage};

/// Centre-crop an image to a square of its shorter side.
pub fn square(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let length = w.min(h);
    if w == h {
        return image.clone();
    }
    let left = (w - length) / 2;
    let top = (h - length) / 2;
    image::imageops::crop_imm(image, left, top, length, length).to_image()
}

/// Mask an image to the ellipse inscribed one pixel inside its bounds.
///
/// The alpha channel is replaced: 255 inside the ellipse, 0 outside.
pub fn circle(image: &RgbaImage) -> RgbaImage {
    let (w, h) = (f64::from(image.width()), f64::from(image.height()));
    let (cx, cy) = (w / 2.0, h / 2.0);
    let (rx, ry) = ((w - 2.0) / 2.0, (h - 2.0) / 2.0);

    let mut out = image.clone();
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let inside = rx > 0.0 && ry > 0.0 && {
            let nx = (f64::from(x) + 0.5 - cx) / rx;
            let ny = (f64::from(y) + 0.5 - cy) / ry;
            nx * nx + ny * ny <= 1.0
        };
        pixel.0[3] = if inside { 255 } else { 0 };
    }
    out
}

/// Composite an image over an opaque background colour.
///
/// The result is fully opaque, ready for formats without alpha.
pub fn flatten(image: &RgbaImage, bg: [u8; 3]) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let alpha = u32::from(a);
        let blend = |fg: u8, bg: u8| -> u8 {
            ((u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255) as u8
        };
        *pixel = Rgba([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2]), 255]);
    }
    out
}

/// Prepare a user avatar: drop transparency onto white, then square it.
pub fn to_avatar(image: &RgbaImage) -> RgbaImage {
    square(&flatten(image, [255, 255, 255]))
}
