//! Still and animated source decoding.

use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, Frame, ImageFormat, ImageReader, RgbaImage};

use super::orientation::{apply_orientation, get_orientation};
use super::{DecodeError, SourceImage};

/// Decode encoded image bytes into a [`SourceImage`].
///
/// GIF and animated WebP are decoded through their animation decoders, which
/// yield fully composited RGBA frames. Everything else the `image` crate can
/// read becomes a single RGBA frame; JPEG stills get their EXIF orientation
/// applied.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the container is not recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails part way.
pub fn decode_source(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;

    let source = match format {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(corrupted)?;
            from_frames(decoder.into_frames().collect_frames().map_err(corrupted)?)
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(Cursor::new(bytes)).map_err(corrupted)?;
            if decoder.has_animation() {
                from_frames(decoder.into_frames().collect_frames().map_err(corrupted)?)
            } else {
                decode_still(bytes, format)?
            }
        }
        _ => decode_still(bytes, format)?,
    };

    if source.is_empty() {
        return Err(DecodeError::CorruptedFile("image has no pixels".to_string()));
    }

    tracing::debug!(
        ?format,
        width = source.width(),
        height = source.height(),
        frames = source.frame_count(),
        delay_ms = source.delay_ms,
        "decoded source"
    );
    Ok(source)
}

/// Fetch frame `index` of a source as an owned RGBA raster.
///
/// There is no cursor: any index may be requested in any order, from any
/// thread.
///
/// # Errors
///
/// Returns `DecodeError::FrameOutOfRange` if `index >= source.frame_count()`.
pub fn decode_frame(source: &SourceImage, index: usize) -> Result<RgbaImage, DecodeError> {
    source
        .frames
        .get(index)
        .cloned()
        .ok_or(DecodeError::FrameOutOfRange {
            index,
            count: source.frames.len(),
        })
}

fn decode_still(bytes: &[u8], format: ImageFormat) -> Result<SourceImage, DecodeError> {
    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(corrupted)?;

    let img = if format == ImageFormat::Jpeg {
        apply_orientation(img, get_orientation(bytes))
    } else {
        img
    };

    Ok(SourceImage::still(img.into_rgba8()))
}

fn from_frames(frames: Vec<Frame>) -> SourceImage {
    // The first frame's delay stands for the whole animation.
    let delay_ms = frames
        .first()
        .map(|f| {
            let (numer, denom) = f.delay().numer_denom_ms();
            if denom == 0 {
                0
            } else {
                numer / denom
            }
        })
        .unwrap_or(0);

    let frames: Vec<RgbaImage> = frames.into_iter().map(Frame::into_buffer).collect();
    if frames.len() == 1 {
        let mut frames = frames;
        return SourceImage::still(frames.remove(0));
    }
    SourceImage::animated(frames, delay_ms)
}

fn corrupted(err: image::ImageError) -> DecodeError {
    DecodeError::CorruptedFile(err.to_string())
}
