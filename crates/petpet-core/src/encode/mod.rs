//! Output encoding.
//!
//! Stills are written as JPEG, animations as looping GIF. [`encode_output`]
//! picks the container from a [`RenderOutput`](crate::animation::RenderOutput).
//!
//! # Examples
//!
//! ```ignore
//! use petpet_core::encode::{encode_jpeg, JPEG_QUALITY};
//!
//! let img = image::RgbaImage::new(100, 100);
//! let jpeg_bytes = encode_jpeg(&img, JPEG_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod gif;
mod jpeg;
mod output;

use thiserror::Error;

pub use gif::encode_gif;
pub use jpeg::{encode_jpeg, encode_rgb_jpeg, JPEG_QUALITY};
pub use output::{encode_output, EncodedOutput, OutputFormat};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel buffer length doesn't match dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Cannot encode an animation with no frames")]
    EmptyAnimation,

    /// The underlying codec failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}
