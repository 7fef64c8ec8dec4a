//! Core types for source decoding.

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delay used when a container reports a zero inter-frame delay.
///
/// Browsers and most GIF viewers clamp 0 ms frames to roughly 100 ms.
pub const DEFAULT_FRAME_DELAY_MS: u32 = 100;

/// Error types for source decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The byte stream is not a recognized image container.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The container was recognized but its contents could not be decoded.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// A frame index beyond the source's frame count was requested.
    #[error("Frame {index} out of range (source has {count} frames)")]
    FrameOutOfRange { index: usize, count: usize },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Catmull-Rom bicubic interpolation.
    Bicubic,
    /// Lanczos3 interpolation (antialiased, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Bicubic => image::imageops::FilterType::CatmullRom,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Animation metadata of a multi-frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationInfo {
    /// Number of frames in the source.
    pub frame_count: usize,
    /// Native inter-frame delay in milliseconds.
    pub delay_ms: u32,
}

impl AnimationInfo {
    /// Native inter-frame delay in seconds.
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.delay_ms) / 1000.0
    }
}

/// A decoded source image: one still raster or a sequence of fully
/// composited animation frames sharing the same dimensions.
///
/// Frames are stored RGBA so every transform can rely on an alpha channel.
/// Nothing in here tracks a "current" frame; use
/// [`decode_frame`](super::decode_frame) to pull a frame by index.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub(crate) frames: Vec<RgbaImage>,
    pub(crate) delay_ms: u32,
}

impl SourceImage {
    /// Wrap a single raster as a still source.
    pub fn still(image: RgbaImage) -> Self {
        Self {
            frames: vec![image],
            delay_ms: 0,
        }
    }

    /// Build an animated source from composited frames.
    ///
    /// A zero `delay_ms` is replaced with [`DEFAULT_FRAME_DELAY_MS`]. A single
    /// frame produces a still source.
    pub fn animated(frames: Vec<RgbaImage>, delay_ms: u32) -> Self {
        let delay_ms = if delay_ms == 0 {
            DEFAULT_FRAME_DELAY_MS
        } else {
            delay_ms
        };
        Self { frames, delay_ms }
    }

    /// Width of every frame in pixels.
    pub fn width(&self) -> u32 {
        self.frames.first().map_or(0, |f| f.width())
    }

    /// Height of every frame in pixels.
    pub fn height(&self) -> u32 {
        self.frames.first().map_or(0, |f| f.height())
    }

    /// Number of frames (1 for stills).
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// True when the source carries more than one frame.
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Animation metadata, `None` for stills.
    pub fn animation(&self) -> Option<AnimationInfo> {
        self.is_animated().then_some(AnimationInfo {
            frame_count: self.frames.len(),
            delay_ms: self.delay_ms,
        })
    }

    /// Check if this source has no usable pixels.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() || self.width() == 0 || self.height() == 0
    }

    /// Check that every frame shares the first frame's dimensions.
    pub fn has_uniform_frames(&self) -> bool {
        let dims = (self.width(), self.height());
        self.frames.iter().all(|f| f.dimensions() == dims)
    }
}
