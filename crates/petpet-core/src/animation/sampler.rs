//! Frame subsampling for animated output.
//!
//! Animated sources are capped at a maximum number of output frames. When a
//! source has more frames than that, a uniform stride picks frames across
//! the whole animation and each kept frame is displayed longer, so the total
//! playback time stays the same.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Default cap on emitted frames.
pub const DEFAULT_MAX_FRAMES: usize = 50;

/// Limits applied to animated output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationBudget {
    /// Maximum number of frames in the output animation.
    pub max_frames: usize,
    /// Linear scale applied to every emitted frame, in `(0, 1]`.
    pub zoom: f64,
}

impl Default for AnimationBudget {
    fn default() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            zoom: 1.0,
        }
    }
}

impl AnimationBudget {
    /// Create a validated budget.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::InvalidBudget` if `max_frames` is zero or
    /// `zoom` is outside `(0, 1]`.
    pub fn new(max_frames: usize, zoom: f64) -> Result<Self, PipelineError> {
        let budget = Self { max_frames, zoom };
        budget.validate()?;
        Ok(budget)
    }

    /// Check the budget's invariants; needed for budgets built by hand or
    /// deserialized.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_frames == 0 {
            return Err(PipelineError::InvalidBudget(
                "max_frames must be at least 1".to_string(),
            ));
        }
        if !(self.zoom > 0.0 && self.zoom <= 1.0) {
            return Err(PipelineError::InvalidBudget(format!(
                "zoom must be in (0, 1], got {}",
                self.zoom
            )));
        }
        Ok(())
    }
}

/// Which source frames to emit and how long each is shown.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSample {
    /// Strictly increasing source frame indices.
    pub indices: Vec<usize>,
    /// Display time of every emitted frame, in seconds.
    pub duration_secs: f64,
}

/// Pick at most `max_frames` frames out of `total_frames`.
///
/// With `ratio = total_frames / max_frames`:
/// - `ratio <= 1`: every frame is kept at the native duration.
/// - `ratio > 1`: frame `floor(i * ratio)` is kept for each `i` in
///   `0..max_frames` and the duration is stretched by `ratio`.
///
/// The stride is computed in integer arithmetic, which is the exact floor of
/// `i * ratio`. A `max_frames` of zero is treated as one.
pub fn sample_frames(total_frames: usize, native_duration_secs: f64, max_frames: usize) -> FrameSample {
    let max_frames = max_frames.max(1);

    if total_frames <= max_frames {
        tracing::debug!(
            total_frames,
            max_frames,
            kept_frames = total_frames,
            duration_secs = native_duration_secs,
            "keeping every animation frame"
        );
        return FrameSample {
            indices: (0..total_frames).collect(),
            duration_secs: native_duration_secs,
        };
    }

    let ratio = total_frames as f64 / max_frames as f64;
    let indices: Vec<usize> = (0..max_frames)
        .map(|i| i * total_frames / max_frames)
        .collect();
    let duration_secs = native_duration_secs * ratio;

    tracing::debug!(
        total_frames,
        max_frames,
        ratio,
        kept_frames = indices.len(),
        duration_secs,
        "subsampling animation frames"
    );

    FrameSample {
        indices,
        duration_secs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_budget_keeps_everything() {
        let sample = sample_frames(10, 0.05, 50);
        assert_eq!(sample.indices, (0..10).collect::<Vec<_>>());
        assert_eq!(sample.duration_secs, 0.05);
    }

    #[test]
    fn test_exactly_at_budget() {
        let sample = sample_frames(50, 0.1, 50);
        assert_eq!(sample.indices.len(), 50);
        assert_eq!(sample.duration_secs, 0.1);
    }

    #[test]
    fn test_120_frames_into_50() {
        let sample = sample_frames(120, 0.04, 50);

        assert_eq!(sample.indices.len(), 50);
        assert_eq!(sample.indices[0], 0);
        assert_eq!(sample.indices[1], 2);
        assert_eq!(sample.indices[5], 12);
        assert_eq!(sample.indices[49], 117);
        assert!((sample.duration_secs - 0.096).abs() < 1e-12);

        let total = sample.duration_secs * sample.indices.len() as f64;
        assert!((total - 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_stride_spans_whole_animation() {
        let sample = sample_frames(1000, 0.01, 4);
        assert_eq!(sample.indices, vec![0, 250, 500, 750]);
    }

    #[test]
    fn test_zero_frames() {
        let sample = sample_frames(0, 0.1, 50);
        assert!(sample.indices.is_empty());
    }

    #[test]
    fn test_zero_max_frames_treated_as_one() {
        let sample = sample_frames(7, 0.1, 0);
        assert_eq!(sample.indices, vec![0]);
        assert!((sample.duration_secs - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_budget_validation() {
        assert!(AnimationBudget::new(50, 1.0).is_ok());
        assert!(AnimationBudget::new(1, 0.01).is_ok());
        assert!(AnimationBudget::new(0, 1.0).is_err());
        assert!(AnimationBudget::new(10, 0.0).is_err());
        assert!(AnimationBudget::new(10, 1.5).is_err());
        assert!(AnimationBudget::new(10, f64::NAN).is_err());
    }

    #[test]
    fn test_default_budget() {
        let budget = AnimationBudget::default();
        assert_eq!(budget.max_frames, DEFAULT_MAX_FRAMES);
        assert_eq!(budget.zoom, 1.0);
        assert!(budget.validate().is_ok());
    }
}
