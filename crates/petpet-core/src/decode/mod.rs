//! Source decoding for the petpet pipeline.
//!
//! This module provides functionality for:
//! - Decoding still images (JPEG, PNG, WebP) and animated GIF/WebP sources
//! - Random access to individual animation frames
//! - Image resizing used by fitting and animation zoom
//!
//! # Frame Access
//!
//! A [`SourceImage`] holds every composited frame in memory. Frames are read
//! with [`decode_frame`], which takes an index and has no seek state, so
//! frames can be pulled out of order or from several threads at once.
//!
//! # Examples
//!
//! ```ignore
//! use petpet_core::decode::{decode_frame, decode_source};
//!
//! let bytes = std::fs::read("avatar.gif").unwrap();
//! let source = decode_source(&bytes).unwrap();
//! if let Some(info) = source.animation() {
//!     println!("{} frames, {} ms each", info.frame_count, info.delay_ms);
//! }
//! let first = decode_frame(&source, 0).unwrap();
//! ```

mod orientation;
mod resize;
mod source;
mod types;

pub use orientation::get_orientation;
pub use resize::{resize, scale, scaled_dimensions};
pub use source::{decode_frame, decode_source};
pub use types::{
    AnimationInfo, DecodeError, FilterType, Orientation, SourceImage, DEFAULT_FRAME_DELAY_MS,
};
