//! Resampling helpers shared by the fitter and the frame transformer.
//!
//! Both functions return new rasters and never modify the input.

use image::RgbaImage;

use super::FilterType;

/// Resize an image to exact dimensions.
///
/// Zero dimensions are raised to 1 pixel so callers that truncate a scaled
/// size never ask for an empty raster.
pub fn resize(image: &RgbaImage, width: u32, height: u32, filter: FilterType) -> RgbaImage {
    let (width, height) = (width.max(1), height.max(1));

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (width, height) {
        return image.clone();
    }

    image::imageops::resize(image, width, height, filter.to_image_filter())
}

/// Uniformly scale an image by `ratio`, truncating the new size.
///
/// This is the zoom applied to every emitted animation frame; the Lanczos3
/// filter keeps downscaled frames antialiased.
pub fn scale(image: &RgbaImage, ratio: f64) -> RgbaImage {
    let (width, height) = scaled_dimensions(image.width(), image.height(), ratio);
    resize(image, width, height, FilterType::Lanczos3)
}

/// Dimensions of a `width x height` raster scaled by `ratio`, truncated,
/// never below 1x1.
pub fn scaled_dimensions(width: u32, height: u32, ratio: f64) -> (u32, u32) {
    let w = (f64::from(width) * ratio) as u32;
    let h = (f64::from(height) * ratio) as u32;
    (w.max(1), h.max(1))
}
