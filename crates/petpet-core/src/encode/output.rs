//! Container selection for rendered output.

use serde::{Deserialize, Serialize};

use super::{encode_gif, encode_jpeg, EncodeError, JPEG_QUALITY};
use crate::animation::RenderOutput;

/// Container of an encoded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Gif,
}

impl OutputFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Gif => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Gif => "gif",
        }
    }
}

/// Encoded bytes tagged with their container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

/// Encode a render result: stills as JPEG at [`JPEG_QUALITY`], animations
/// as GIF.
pub fn encode_output(output: &RenderOutput) -> Result<EncodedOutput, EncodeError> {
    let encoded = match output {
        RenderOutput::Still(image) => EncodedOutput {
            format: OutputFormat::Jpeg,
            bytes: encode_jpeg(image, JPEG_QUALITY)?,
        },
        RenderOutput::Animated(frame_set) => EncodedOutput {
            format: OutputFormat::Gif,
            bytes: encode_gif(frame_set)?,
        },
    };
    tracing::debug!(
        format = encoded.format.extension(),
        bytes = encoded.bytes.len(),
        "encoded output"
    );
    Ok(encoded)
}
