//! Still-or-animated rendering.
//!
//! [`render`] is the frame transformer: it takes a decoded source and a
//! per-frame transform and produces either one still image or a
//! [`FrameSet`] ready for an animated container. [`sample_frames`] decides
//! which source frames make it into the output and how long each is shown.
//!
//! # Budget
//!
//! An [`AnimationBudget`] bounds animated output: at most `max_frames`
//! frames, each scaled by `zoom`. Stills are never zoomed.

mod render;
mod sampler;

pub use render::{render, FrameSet, RenderOutput};
pub use sampler::{sample_frames, AnimationBudget, FrameSample, DEFAULT_MAX_FRAMES};
