//! Font size fitting against a text measurer.
//!
//! Font loading and glyph rendering live outside this crate. Callers plug in
//! whatever rasterizer they use through [`TextMeasure`].

/// Measures the rendered extent of (possibly multi-line) text.
pub trait TextMeasure {
    /// Width and height in pixels of `text` at `font_size` with the given
    /// stroke width.
    fn measure(&self, text: &str, font_size: u32, stroke_width: u32) -> (f32, f32);
}

impl<F> TextMeasure for F
where
    F: Fn(&str, u32, u32) -> (f32, f32),
{
    fn measure(&self, text: &str, font_size: u32, stroke_width: u32) -> (f32, f32) {
        self(text, font_size, stroke_width)
    }
}

/// Largest font size in `min_fontsize..=max_fontsize` whose rendering of
/// `text` fits inside `max_width` x `max_height`.
///
/// Sizes are tried from the largest down. The stroke width at each size is
/// `floor(size * stroke_ratio)`. Returns 0 when no size in range fits.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    max_width: f32,
    max_height: f32,
    max_fontsize: u32,
    min_fontsize: u32,
    stroke_ratio: f32,
) -> u32 {
    let min_fontsize = min_fontsize.max(1);
    for size in (min_fontsize..=max_fontsize).rev() {
        let stroke_width = (size as f32 * stroke_ratio).floor().max(0.0) as u32;
        let (width, height) = measure.measure(text, size, stroke_width);
        if width <= max_width && height <= max_height {
            return size;
        }
    }
    tracing::debug!(
        text_len = text.len(),
        max_width,
        max_height,
        "no font size fits"
    );
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Monospace-ish measurer: each char is 0.6 em wide, one line is 1.2 em.
    fn mono(text: &str, size: u32, stroke: u32) -> (f32, f32) {
        let lines: Vec<&str> = text.lines().collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = longest as f32 * size as f32 * 0.6 + 2.0 * stroke as f32;
        let height = lines.len().max(1) as f32 * size as f32 * 1.2 + 2.0 * stroke as f32;
        (width, height)
    }

    #[test]
    fn test_returns_max_when_it_fits() {
        assert_eq!(fit_font_size(&mono, "hi", 1000.0, 1000.0, 40, 10, 0.0), 40);
    }

    #[test]
    fn test_shrinks_until_fit() {
        // 10 chars at 0.6 em must fit in 120 px: size 20.
        assert_eq!(fit_font_size(&mono, "abcdefghij", 120.0, 1000.0, 40, 5, 0.0), 20);
    }

    #[test]
    fn test_height_limits_multiline() {
        // 3 lines at 1.2 em within 72 px: size 20.
        assert_eq!(fit_font_size(&mono, "a\nb\nc", 1000.0, 72.0, 50, 5, 0.0), 20);
    }

    #[test]
    fn test_min_size_is_tried() {
        assert_eq!(fit_font_size(&mono, "abcdefghij", 60.0, 1000.0, 40, 10, 0.0), 10);
    }

    #[test]
    fn test_zero_when_nothing_fits() {
        assert_eq!(fit_font_size(&mono, "abcdefghij", 59.0, 1000.0, 40, 10, 0.0), 0);
    }

    #[test]
    fn test_stroke_width_is_floored() {
        let seen = RefCell::new(Vec::new());
        let recorder = |_: &str, size: u32, stroke: u32| {
            seen.borrow_mut().push((size, stroke));
            (f32::MAX, f32::MAX)
        };
        assert_eq!(fit_font_size(&recorder, "x", 10.0, 10.0, 12, 10, 0.25), 0);
        assert_eq!(*seen.borrow(), vec![(12, 3), (11, 2), (10, 2)]);
    }

    #[test]
    fn test_empty_range_returns_zero() {
        assert_eq!(fit_font_size(&mono, "x", 1000.0, 1000.0, 5, 10, 0.0), 0);
    }
}
