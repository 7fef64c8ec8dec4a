//! Render-then-encode entry points.

use image::RgbaImage;

use crate::animation::{render, AnimationBudget};
use crate::decode::{decode_source, SourceImage};
use crate::encode::{encode_output, EncodedOutput};
use crate::error::PipelineError;

/// Apply `transform` to a source and encode the result.
///
/// Still sources become JPEG, animated sources become a looping GIF bounded
/// by `budget`.
///
/// # Example
///
/// ```ignore
/// use petpet_core::{make_jpg_or_gif, AnimationBudget};
/// use petpet_core::transform::{fit_size, SizeSpec};
///
/// let spec = SizeSpec::new(200, 200);
/// let out = make_jpg_or_gif(&source, |f| Ok(fit_size(f, &spec)), &AnimationBudget::default())?;
/// std::fs::write(format!("out.{}", out.format.extension()), &out.bytes)?;
/// ```
pub fn make_jpg_or_gif<F>(
    source: &SourceImage,
    transform: F,
    budget: &AnimationBudget,
) -> Result<EncodedOutput, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError> + Sync,
{
    let output = render(source, transform, budget)?;
    Ok(encode_output(&output)?)
}

/// [`make_jpg_or_gif`] over encoded input bytes.
pub fn make_jpg_or_gif_from_bytes<F>(
    bytes: &[u8],
    transform: F,
    budget: &AnimationBudget,
) -> Result<EncodedOutput, PipelineError>
where
    F: Fn(&RgbaImage) -> Result<RgbaImage, PipelineError> + Sync,
{
    let source = decode_source(bytes)?;
    make_jpg_or_gif(&source, transform, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::OutputFormat;
    use crate::transform::{fit_size, perspective, Quadrilateral, SizeSpec};
    use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
    use image::{AnimationDecoder, Delay, Frame, Rgba};
    use std::io::Cursor;

    fn gif_bytes(frames: usize, delay_ms: u32) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = GifEncoder::new(&mut out);
            encoder.set_repeat(Repeat::Infinite).unwrap();
            for i in 0..frames {
                let img = RgbaImage::from_pixel(20, 10, Rgba([(i * 10) as u8, 0, 0, 255]));
                encoder
                    .encode_frame(Frame::from_parts(
                        img,
                        0,
                        0,
                        Delay::from_numer_denom_ms(delay_ms, 1),
                    ))
                    .unwrap();
            }
        }
        out
    }

    #[test]
    fn test_still_source_gives_jpeg() {
        let source = SourceImage::still(RgbaImage::from_pixel(64, 48, Rgba([9, 9, 9, 255])));
        let spec = SizeSpec::new(32, 32);
        let out = make_jpg_or_gif(&source, |f| Ok(fit_size(f, &spec)), &AnimationBudget::default())
            .unwrap();
        assert_eq!(out.format, OutputFormat::Jpeg);

        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    #[test]
    fn test_animated_bytes_give_gif_within_budget() {
        let bytes = gif_bytes(8, 60);
        let budget = AnimationBudget::new(4, 0.5).unwrap();
        let out = make_jpg_or_gif_from_bytes(&bytes, |f| Ok(f.clone()), &budget).unwrap();
        assert_eq!(out.format, OutputFormat::Gif);

        let frames = GifDecoder::new(Cursor::new(out.bytes))
            .unwrap()
            .into_frames()
            .collect_frames()
            .unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].buffer().dimensions(), (10, 5));
        let (numer, denom) = frames[0].delay().numer_denom_ms();
        assert_eq!(numer / denom, 120);
    }

    #[test]
    fn test_geometry_failure_surfaces() {
        let source = SourceImage::still(RgbaImage::new(10, 10));
        let quad = Quadrilateral::new((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 5.0));
        let err = make_jpg_or_gif(
            &source,
            |f| Ok(perspective(f, &quad)?),
            &AnimationBudget::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Geometry(_)));
    }

    #[test]
    fn test_zero_sized_fit_fails_alike_for_still_and_animation() {
        let spec = SizeSpec::new(0, 10);
        let fit = |f: &RgbaImage| -> Result<RgbaImage, PipelineError> { Ok(fit_size(f, &spec)) };

        let still = SourceImage::still(RgbaImage::new(8, 8));
        let err = make_jpg_or_gif(&still, fit, &AnimationBudget::default()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFrame { .. }));

        let err = make_jpg_or_gif_from_bytes(&gif_bytes(3, 50), fit, &AnimationBudget::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyFrame { .. }));
    }

    #[test]
    fn test_garbage_bytes_are_decode_errors() {
        let err = make_jpg_or_gif_from_bytes(b"nope", |f| Ok(f.clone()), &AnimationBudget::default())
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
