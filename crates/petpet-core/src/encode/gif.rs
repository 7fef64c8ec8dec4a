//! Animated GIF encoding.

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};

use super::EncodeError;
use crate::animation::FrameSet;

/// Encode a frame set as an infinitely looping GIF.
///
/// Every frame gets the set's duration, rounded to whole milliseconds (the
/// GIF encoder stores centiseconds).
pub fn encode_gif(frame_set: &FrameSet) -> Result<Vec<u8>, EncodeError> {
    let Some((width, height)) = frame_set.dimensions() else {
        return Err(EncodeError::EmptyAnimation);
    };
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let delay_ms = (frame_set.duration_secs * 1000.0).round().max(1.0) as u32;
    let delay = Delay::from_numer_denom_ms(delay_ms, 1);

    let mut out = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut out);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        for frame in &frame_set.frames {
            encoder
                .encode_frame(Frame::from_parts(frame.clone(), 0, 0, delay))
                .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
        }
    }
    Ok(out)
}
