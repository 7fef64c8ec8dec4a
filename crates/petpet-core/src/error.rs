//! Pipeline-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::transform::GeometryError;

/// Errors surfaced by [`render`](crate::animation::render) and
/// [`make_jpg_or_gif`](crate::make_jpg_or_gif).
///
/// Every failure is deterministic in its inputs; retrying the same call
/// produces the same error.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The geometry kernel rejected a point configuration.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A transform produced frames of different sizes within one animation.
    #[error(
        "Frame {index} transformed to {}x{}, expected {}x{}",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        /// Source frame index of the offending frame.
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A transform returned a raster with no pixels.
    #[error("Frame {index} transformed to an empty {width}x{height} raster")]
    EmptyFrame {
        /// Source frame index of the offending frame.
        index: usize,
        width: u32,
        height: u32,
    },

    /// A fit target with a zero side.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// The source lacks something the pipeline needs.
    #[error("Unsupported source: {0}")]
    UnsupportedSource(String),

    /// Frame budget or zoom out of range.
    #[error("Invalid animation budget: {0}")]
    InvalidBudget(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
