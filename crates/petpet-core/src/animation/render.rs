//! Applying a frame transform to a still or animated source.

use image::RgbaImage;

use super::sampler::{sample_frames, AnimationBudget};
use crate::decode::{decode_frame, scale, SourceImage};
use crate::error::PipelineError;

/// A ready-to-encode animation: frames of one size sharing one duration.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSet {
    pub frames: Vec<RgbaImage>,
    /// Display time of every frame, in seconds.
    pub duration_secs: f64,
}

impl FrameSet {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared frame dimensions, `None` when empty.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(RgbaImage::dimensions)
    }

    /// Total playback time in seconds.
    pub fn total_duration_secs(&self) -> f64 {
        self.duration_secs * self.frames.len() as f64
    }
}

/// Result of [`render`]: one still image, or an animation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutput {
    Still(RgbaImage),
    Animated(FrameSet),
}

/// A transformed frame before the dimension check.
struct RenderedFrame {
    /// Size the transform produced, before zoom.
    transformed: (u32, u32),
    image: RgbaImage,
}

/// Run `transform` over a source.
///
/// A still source is transformed once and returned as
/// [`RenderOutput::Still`]. An animated source is subsampled to the budget's
/// frame cap, each kept frame is transformed and scaled by the budget's
/// zoom, and the frames come back as [`RenderOutput::Animated`] in source
/// order.
///
/// With the `parallel` feature the per-frame work runs on the rayon pool.
///
/// # Errors
///
/// - `InvalidBudget` if the budget fails validation
/// - `UnsupportedSource` if the source is empty or its frames differ in size
/// - `EmptyFrame` if the transform returns a raster with a zero side
/// - `DimensionMismatch` if the transform returns different sizes for
///   different frames
/// - any error returned by `transform`; one failing frame fails the whole
///   render
///
/// # Example
///
/// ```ignore
/// use petpet_core::animation::{render, AnimationBudget};
/// use petpet_core::transform::{fit_size, SizeSpec};
///
/// let spec = SizeSpec::new(128, 128);
/// let output = render(&source, |frame| Ok(fit_size(frame, &spec)), &AnimationBudget::default())?;
/// ```
pub fn render<F>(
    source: &SourceImage,
    transform: F,
    budget: &AnimationBudget,
) -> Result<RenderOutput, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError> + Sync,
{
    budget.validate()?;
    if source.is_empty() {
        return Err(PipelineError::UnsupportedSource(
            "source has no pixels".to_string(),
        ));
    }
    if !source.has_uniform_frames() {
        return Err(PipelineError::UnsupportedSource(
            "source frames differ in size".to_string(),
        ));
    }

    let Some(info) = source.animation() else {
        let frame = decode_frame(source, 0)?;
        let still = transform(&frame)?;
        ensure_non_empty(0, &still)?;
        tracing::debug!(
            width = still.width(),
            height = still.height(),
            "rendered still"
        );
        return Ok(RenderOutput::Still(still));
    };

    let sample = sample_frames(info.frame_count, info.duration_secs(), budget.max_frames);
    let rendered = transform_frames(source, &sample.indices, &transform, budget.zoom)?;

    let mut frames = Vec::with_capacity(rendered.len());
    let expected = rendered.first().map(|f| f.transformed);
    for (frame, &index) in rendered.into_iter().zip(sample.indices.iter()) {
        if let Some(expected) = expected {
            if frame.transformed != expected {
                return Err(PipelineError::DimensionMismatch {
                    index,
                    expected,
                    actual: frame.transformed,
                });
            }
        }
        frames.push(frame.image);
    }

    let frame_set = FrameSet {
        frames,
        duration_secs: sample.duration_secs,
    };
    tracing::debug!(
        source_frames = info.frame_count,
        frames = frame_set.len(),
        duration_secs = frame_set.duration_secs,
        dimensions = ?frame_set.dimensions(),
        "rendered animation"
    );
    Ok(RenderOutput::Animated(frame_set))
}

fn render_frame<F>(
    source: &SourceImage,
    index: usize,
    transform: &F,
    zoom: f64,
) -> Result<RenderedFrame, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError>,
{
    let frame = decode_frame(source, index)?;
    let transformed = transform(&frame)?;
    ensure_non_empty(index, &transformed)?;
    Ok(RenderedFrame {
        transformed: transformed.dimensions(),
        image: scale(&transformed, zoom),
    })
}

/// Reject a zero-sided transform result before zoom clamps it to 1px.
fn ensure_non_empty(index: usize, image: &RgbaImage) -> Result<(), PipelineError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::EmptyFrame {
            index,
            width,
            height,
        });
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn transform_frames<F>(
    source: &SourceImage,
    indices: &[usize],
    transform: &F,
    zoom: f64,
) -> Result<Vec<RenderedFrame>, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError> + Sync,
{
    use rayon::prelude::*;

    // Indexed parallel collect keeps source order.
    indices
        .par_iter()
        .map(|&index| render_frame(source, index, transform, zoom))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn transform_frames<F>(
    source: &SourceImage,
    indices: &[usize],
    transform: &F,
    zoom: f64,
) -> Result<Vec<RenderedFrame>, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError> + Sync,
{
    indices
        .iter()
        .map(|&index| render_frame(source, index, transform, zoom))
        .collect()
}
