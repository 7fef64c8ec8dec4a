//! Petpet Core - image transform and animation pipeline
//!
//! This crate turns a still or animated source image (typically a user
//! avatar) into a transformed JPEG or GIF: perspective warps onto arbitrary
//! quadrilaterals, canvas fitting, and a frame transformer that applies any
//! per-frame operation to an animation under a frame budget.
//!
//! # Modules
//!
//! - [`decode`] - source decoding (JPEG, PNG, GIF, WebP) and resampling
//! - [`transform`] - perspective warp, fitting, rotation, masks
//! - [`animation`] - frame sampling and the still-or-animated renderer
//! - [`encode`] - JPEG and GIF output
//! - [`text`] - font size fitting against a pluggable measurer
//!
//! # Example
//!
//! ```ignore
//! use petpet_core::{make_jpg_or_gif_from_bytes, AnimationBudget};
//! use petpet_core::transform::{perspective, Quadrilateral};
//!
//! let quad = Quadrilateral::new((0.0, 6.0), (49.0, 6.0), (49.0, 61.0), (0.0, 61.0));
//! let out = make_jpg_or_gif_from_bytes(&avatar, |f| Ok(perspective(f, &quad)?), &AnimationBudget::default())?;
//! ```

pub mod animation;
pub mod decode;
pub mod encode;
mod error;
mod pipeline;
pub mod text;
pub mod transform;

pub use animation::{render, AnimationBudget, FrameSet, RenderOutput};
pub use decode::{decode_source, SourceImage};
pub use encode::{EncodedOutput, OutputFormat};
pub use error::PipelineError;
pub use pipeline::{make_jpg_or_gif, make_jpg_or_gif_from_bytes};
pub use transform::{fit_size, perspective, GeometryError, Quadrilateral, SizeSpec};
