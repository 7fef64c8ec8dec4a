//! Fitting an image into a fixed-size canvas.
//!
//! [`fit_size`] scales the source uniformly and pastes it onto a canvas of
//! exactly the requested size. The [`FitMode`] decides whether the scaled
//! image must fit inside the canvas (letterboxing) or cover it (cropping);
//! the [`FitDirection`] decides which canvas edges the image is pinned to.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::decode::{resize, FilterType};
use crate::error::PipelineError;

/// How the source is scaled relative to the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// The scaled image lies entirely inside the canvas; leftover area is
    /// filled with the background colour.
    Inside,
    /// The scaled image covers the whole canvas; overflow is cropped.
    #[default]
    Include,
}

/// Which canvas edges the scaled image is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitDirection {
    #[default]
    Center,
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl FitDirection {
    fn pins_top(self) -> bool {
        matches!(self, Self::North | Self::NorthWest | Self::NorthEast)
    }

    fn pins_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthWest | Self::SouthEast)
    }

    fn pins_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn pins_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }
}

/// Target canvas and fitting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSpec {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    #[serde(default)]
    pub mode: FitMode,
    #[serde(default)]
    pub direction: FitDirection,
    /// RGBA canvas fill; transparent when `None`.
    #[serde(default)]
    pub bg_color: Option<[u8; 4]>,
}

impl SizeSpec {
    /// A centred cover-fit into `width x height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: FitMode::default(),
            direction: FitDirection::default(),
            bg_color: None,
        }
    }

    pub fn with_mode(mut self, mode: FitMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_direction(mut self, direction: FitDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_bg_color(mut self, color: [u8; 4]) -> Self {
        self.bg_color = Some(color);
        self
    }

    /// Check that both canvas sides are at least one pixel; needed for specs
    /// built by hand or deserialized.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidSize` for a zero width or height.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.width == 0 || self.height == 0 {
            return Err(PipelineError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Where and how large the scaled source is placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitLayout {
    /// Uniform scale factor applied to the source.
    pub ratio: f64,
    pub scaled_width: u32,
    pub scaled_height: u32,
    /// Offset of the scaled image's top-left corner; negative when the
    /// image overflows the canvas.
    pub x: i64,
    pub y: i64,
}

/// Compute the scale and placement for a `src_width x src_height` source.
///
/// Scaled dimensions are rounded, then clamped so `Inside` never exceeds the
/// canvas and `Include` never falls short of it; both stay at least 1px.
/// Centred offsets truncate toward zero, so an odd overflow crops one pixel
/// more from the right/bottom than from the left/top.
pub fn compute_fit(src_width: u32, src_height: u32, spec: &SizeSpec) -> FitLayout {
    let (w, h) = (f64::from(spec.width), f64::from(spec.height));
    let (sw, sh) = (f64::from(src_width.max(1)), f64::from(src_height.max(1)));

    let ratio = match spec.mode {
        FitMode::Inside => (w / sw).min(h / sh),
        FitMode::Include => (w / sw).max(h / sh),
    };

    let mut scaled_width = (sw * ratio).round() as u32;
    let mut scaled_height = (sh * ratio).round() as u32;
    match spec.mode {
        FitMode::Inside => {
            scaled_width = scaled_width.min(spec.width);
            scaled_height = scaled_height.min(spec.height);
        }
        FitMode::Include => {
            scaled_width = scaled_width.max(spec.width);
            scaled_height = scaled_height.max(spec.height);
        }
    }
    let scaled_width = scaled_width.max(1);
    let scaled_height = scaled_height.max(1);

    let (cw, ch) = (i64::from(spec.width), i64::from(spec.height));
    let (iw, ih) = (i64::from(scaled_width), i64::from(scaled_height));
    let dir = spec.direction;

    let x = if dir.pins_left() {
        0
    } else if dir.pins_right() {
        cw - iw
    } else {
        (cw - iw) / 2
    };
    let y = if dir.pins_top() {
        0
    } else if dir.pins_bottom() {
        ch - ih
    } else {
        (ch - ih) / 2
    };

    FitLayout {
        ratio,
        scaled_width,
        scaled_height,
        x,
        y,
    }
}

/// Fit `image` into a canvas of exactly `spec.width x spec.height`.
///
/// A zero-sided spec yields an empty canvas; check it with
/// [`SizeSpec::validate`] first when it comes from outside.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use petpet_core::transform::{fit_size, FitMode, SizeSpec};
///
/// let photo = RgbaImage::new(800, 600);
/// let thumb = fit_size(&photo, &SizeSpec::new(200, 200).with_mode(FitMode::Include));
/// assert_eq!(thumb.dimensions(), (200, 200));
/// ```
pub fn fit_size(image: &RgbaImage, spec: &SizeSpec) -> RgbaImage {
    let fill = Rgba(spec.bg_color.unwrap_or([0, 0, 0, 0]));
    let mut canvas = RgbaImage::from_pixel(spec.width, spec.height, fill);
    if image.width() == 0 || image.height() == 0 || spec.width == 0 || spec.height == 0 {
        return canvas;
    }

    let layout = compute_fit(image.width(), image.height(), spec);
    let scaled = resize(
        image,
        layout.scaled_width,
        layout.scaled_height,
        FilterType::Lanczos3,
    );
    image::imageops::replace(&mut canvas, &scaled, layout.x, layout.y);
    canvas
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = FitMode> {
        prop_oneof![Just(FitMode::Inside), Just(FitMode::Include)]
    }

    fn direction_strategy() -> impl Strategy<Value = FitDirection> {
        prop_oneof![
            Just(FitDirection::Center),
            Just(FitDirection::North),
            Just(FitDirection::South),
            Just(FitDirection::West),
            Just(FitDirection::East),
            Just(FitDirection::NorthWest),
            Just(FitDirection::NorthEast),
            Just(FitDirection::SouthWest),
            Just(FitDirection::SouthEast),
        ]
    }

    fn spec_strategy() -> impl Strategy<Value = SizeSpec> {
        (1u32..=120, 1u32..=120, mode_strategy(), direction_strategy()).prop_map(
            |(w, h, mode, direction)| SizeSpec::new(w, h).with_mode(mode).with_direction(direction),
        )
    }

    proptest! {
        /// Property: output is always exactly the requested size.
        #[test]
        fn prop_output_matches_spec(
            (src_w, src_h) in (1u32..=150, 1u32..=150),
            spec in spec_strategy(),
        ) {
            let src = RgbaImage::from_pixel(src_w, src_h, Rgba([1, 2, 3, 255]));
            let out = fit_size(&src, &spec);
            prop_assert_eq!(out.dimensions(), (spec.width, spec.height));
        }

        /// Property: Inside keeps the scaled content within the canvas.
        #[test]
        fn prop_inside_is_contained(
            (src_w, src_h) in (1u32..=4000, 1u32..=4000),
            spec in spec_strategy(),
        ) {
            let spec = spec.with_mode(FitMode::Inside);
            let layout = compute_fit(src_w, src_h, &spec);
            prop_assert!(layout.scaled_width <= spec.width);
            prop_assert!(layout.scaled_height <= spec.height);
            prop_assert!(layout.x >= 0 && layout.y >= 0);
            prop_assert!(layout.x + i64::from(layout.scaled_width) <= i64::from(spec.width));
            prop_assert!(layout.y + i64::from(layout.scaled_height) <= i64::from(spec.height));
        }

        /// Property: Include covers the whole canvas.
        #[test]
        fn prop_include_covers(
            (src_w, src_h) in (1u32..=4000, 1u32..=4000),
            spec in spec_strategy(),
        ) {
            let spec = spec.with_mode(FitMode::Include);
            let layout = compute_fit(src_w, src_h, &spec);
            prop_assert!(layout.scaled_width >= spec.width);
            prop_assert!(layout.scaled_height >= spec.height);
            prop_assert!(layout.x <= 0 && layout.y <= 0);
            prop_assert!(layout.x + i64::from(layout.scaled_width) >= i64::from(spec.width));
            prop_assert!(layout.y + i64::from(layout.scaled_height) >= i64::from(spec.height));
        }
    }
}
