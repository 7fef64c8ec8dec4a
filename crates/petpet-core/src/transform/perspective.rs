//! Four-point perspective (homography) warps.
//!
//! A warp is described by where the source image's corners should land in
//! the output. The projective map is solved *from* those destination corners
//! *to* the source corners, so it can be used directly for inverse mapping:
//! every output pixel is projected back into the source and sampled there.
//!
//! ```text
//! src_x = (a*x + b*y + c) / (g*x + h*y + 1)
//! src_y = (d*x + e*y + f) / (g*x + h*y + 1)
//! ```
//!
//! The eight coefficients come from the 8x8 linear system built from the
//! four point correspondences, solved through its normal equations
//! `(A^T A) z = A^T b`. With four non-degenerate points the system has a
//! unique solution and the least-squares answer is that solution.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::sample::{sample, InterpolationFilter};

/// Relative tolerance for the three-point collinearity test, as a fraction
/// of the squared extent of the quadrilateral.
const COLLINEAR_TOLERANCE: f64 = 1e-9;

/// Smallest pivot accepted during elimination, relative to the largest
/// diagonal entry of the column-equilibrated normal matrix. Anything smaller
/// is treated as singular: the normal matrix squares the condition number of
/// the system, so this corresponds to a condition number of roughly 1e5 for
/// the underlying 8x8 system.
const MIN_PIVOT_RATIO: f64 = 1e-10;

/// Largest output canvas side [`perspective`] will allocate.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// Errors from the geometry kernel.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Three of the four corners lie on one line.
    #[error("Degenerate quadrilateral: corners {0:?} are collinear")]
    CollinearPoints([usize; 3]),

    /// The normal matrix is singular or too ill-conditioned to trust.
    #[error("Singular perspective system (pivot ratio {pivot_ratio:e})")]
    SingularSystem { pivot_ratio: f64 },

    /// The solve produced NaN or infinite coefficients.
    #[error("Perspective solve produced non-finite coefficients")]
    NonFinite,

    /// The destination corners span less than one pixel on an axis.
    #[error("Empty output canvas: {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    /// The destination corners span more than [`MAX_CANVAS_SIDE`] pixels on
    /// an axis.
    #[error("Output canvas too large: {width}x{height} (max side {MAX_CANVAS_SIDE})")]
    CanvasTooLarge { width: f64, height: f64 },
}

/// A point in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Four corners ordered top-left, top-right, bottom-right, bottom-left.
///
/// The order is part of the meaning: swapping two corners mirrors or twists
/// the warp rather than describing the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [Point2D; 4],
}

impl Quadrilateral {
    pub fn new(
        top_left: impl Into<Point2D>,
        top_right: impl Into<Point2D>,
        bottom_right: impl Into<Point2D>,
        bottom_left: impl Into<Point2D>,
    ) -> Self {
        Self {
            corners: [
                top_left.into(),
                top_right.into(),
                bottom_right.into(),
                bottom_left.into(),
            ],
        }
    }

    /// The corners of a `width x height` rectangle anchored at the origin.
    pub fn from_rect(width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self::new((0.0, 0.0), (w, 0.0), (w, h), (0.0, h))
    }

    /// Size of the canvas a warp onto these corners produces: the extent of
    /// the corners on each axis, truncated.
    pub fn output_size(&self) -> (u32, u32) {
        let (width, height) = self.spans();
        (width as u32, height as u32)
    }

    /// Untruncated extent of the corners on each axis.
    fn spans(&self) -> (f64, f64) {
        let (min_x, max_x) = extent(self.corners.iter().map(|p| p.x));
        let (min_y, max_y) = extent(self.corners.iter().map(|p| p.y));
        (max_x - min_x, max_y - min_y)
    }

    /// Index triple of the first three collinear corners, if any.
    fn collinear_triple(&self) -> Option<[usize; 3]> {
        const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

        let (min_x, max_x) = extent(self.corners.iter().map(|p| p.x));
        let (min_y, max_y) = extent(self.corners.iter().map(|p| p.y));
        let span = (max_x - min_x).max(max_y - min_y);
        let tolerance = COLLINEAR_TOLERANCE * span * span;

        TRIPLES.into_iter().find(|&[i, j, k]| {
            let (a, b, c) = (self.corners[i], self.corners[j], self.corners[k]);
            let cross = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
            !(cross.abs() > tolerance)
        })
    }
}

/// The eight coefficients `a..h` of a projective map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCoeffs(pub [f64; 8]);

impl PerspectiveCoeffs {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);

    /// Project `(x, y)`; `None` where the map sends the point to infinity.
    pub fn apply(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let [a, b, c, d, e, f, g, h] = self.0;
        let den = g * x + h * y + 1.0;
        if den.abs() < f64::EPSILON {
            return None;
        }
        Some(((a * x + b * y + c) / den, (d * x + e * y + f) / den))
    }
}

/// Solve the map that inverse-maps a warp of a `width x height` source onto
/// `destination`.
///
/// The returned coefficients send each destination corner back to the
/// matching source corner `(0,0), (W,0), (W,H), (0,H)`.
///
/// # Errors
///
/// `GeometryError::CollinearPoints` if any three destination corners are
/// collinear, `GeometryError::SingularSystem` if the normal matrix is too
/// ill-conditioned to solve reliably.
pub fn solve_perspective(
    destination: &Quadrilateral,
    width: u32,
    height: u32,
) -> Result<PerspectiveCoeffs, GeometryError> {
    solve_homography(destination, &Quadrilateral::from_rect(width, height))
}

/// Solve the projective map sending each corner of `from` to the matching
/// corner of `to`.
pub fn solve_homography(
    from: &Quadrilateral,
    to: &Quadrilateral,
) -> Result<PerspectiveCoeffs, GeometryError> {
    for quad in [from, to] {
        if let Some(triple) = quad.collinear_triple() {
            tracing::debug!(?triple, corners = ?quad.corners, "rejecting degenerate quadrilateral");
            return Err(GeometryError::CollinearPoints(triple));
        }
    }

    let mut a = [[0.0f64; 8]; 8];
    let mut b = [0.0f64; 8];
    for (i, (p, q)) in from.corners.iter().zip(to.corners.iter()).enumerate() {
        a[2 * i] = [p.x, p.y, 1.0, 0.0, 0.0, 0.0, -q.x * p.x, -q.x * p.y];
        a[2 * i + 1] = [0.0, 0.0, 0.0, p.x, p.y, 1.0, -q.y * p.x, -q.y * p.y];
        b[2 * i] = q.x;
        b[2 * i + 1] = q.y;
    }

    // Equilibrate columns so pixel-sized and squared-pixel-sized unknowns
    // share a scale; the normal equations square whatever imbalance is left.
    let mut col_scale = [1.0f64; 8];
    for (j, scale) in col_scale.iter_mut().enumerate() {
        let max = a.iter().map(|row| row[j].abs()).fold(0.0, f64::max);
        if max > 0.0 {
            *scale = max;
            for row in a.iter_mut() {
                row[j] /= max;
            }
        }
    }

    let mut ata = [[0.0f64; 8]; 8];
    let mut atb = [0.0f64; 8];
    for (i, row) in ata.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..8).map(|k| a[k][i] * a[k][j]).sum();
        }
        atb[i] = (0..8).map(|k| a[k][i] * b[k]).sum();
    }

    let z = solve_linear_system(ata, atb)?;

    let mut coeffs = [0.0f64; 8];
    for (c, (zj, sj)) in coeffs.iter_mut().zip(z.iter().zip(col_scale.iter())) {
        *c = zj / sj;
    }

    if coeffs.iter().any(|c| !c.is_finite()) {
        return Err(GeometryError::NonFinite);
    }
    Ok(PerspectiveCoeffs(coeffs))
}

/// Gaussian elimination with partial pivoting on an 8x8 system.
fn solve_linear_system(
    mut m: [[f64; 8]; 8],
    mut rhs: [f64; 8],
) -> Result<[f64; 8], GeometryError> {
    let scale = (0..8).map(|i| m[i][i].abs()).fold(0.0, f64::max);
    if !(scale > 0.0) {
        return Err(GeometryError::SingularSystem { pivot_ratio: 0.0 });
    }

    for col in 0..8 {
        let pivot_row = (col..8)
            .max_by(|&r1, &r2| m[r1][col].abs().total_cmp(&m[r2][col].abs()))
            .unwrap_or(col);
        let pivot_ratio = m[pivot_row][col].abs() / scale;
        if !(pivot_ratio >= MIN_PIVOT_RATIO) {
            tracing::debug!(col, pivot_ratio, "perspective normal matrix is singular");
            return Err(GeometryError::SingularSystem { pivot_ratio });
        }
        m.swap(col, pivot_row);
        rhs.swap(col, pivot_row);

        for row in (col + 1)..8 {
            let factor = m[row][col] / m[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..8 {
                m[row][k] -= factor * m[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = [0.0f64; 8];
    for row in (0..8).rev() {
        let tail: f64 = ((row + 1)..8).map(|k| m[row][k] * x[k]).sum();
        x[row] = (rhs[row] - tail) / m[row][row];
    }
    Ok(x)
}

/// Warp `image` so its corners land on `destination`.
///
/// The output canvas is [`Quadrilateral::output_size`]; destination
/// coordinates are used as-is, so corners placed at negative or oversized
/// coordinates are clipped by the canvas. Areas outside the warped source
/// are transparent.
///
/// # Errors
///
/// `CanvasTooLarge` if the corners span more than [`MAX_CANVAS_SIDE`] on an
/// axis, `EmptyCanvas` if they span less than one pixel, plus the solver
/// errors of [`solve_perspective`].
///
/// # Example
///
/// ```ignore
/// use petpet_core::transform::{perspective, Quadrilateral};
///
/// // Lean the top edge inwards.
/// let quad = Quadrilateral::new((20.0, 0.0), (80.0, 0.0), (100.0, 100.0), (0.0, 100.0));
/// let warped = perspective(&avatar, &quad)?;
/// ```
pub fn perspective(
    image: &RgbaImage,
    destination: &Quadrilateral,
) -> Result<RgbaImage, GeometryError> {
    let (span_x, span_y) = destination.spans();
    if !(span_x < f64::from(MAX_CANVAS_SIDE + 1) && span_y < f64::from(MAX_CANVAS_SIDE + 1)) {
        tracing::debug!(span_x, span_y, "rejecting oversized perspective canvas");
        return Err(GeometryError::CanvasTooLarge {
            width: span_x,
            height: span_y,
        });
    }
    let (width, height) = destination.output_size();
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptyCanvas { width, height });
    }
    let coeffs = solve_perspective(destination, image.width(), image.height())?;
    Ok(warp(
        image,
        &coeffs,
        width,
        height,
        InterpolationFilter::Bicubic,
    ))
}

/// Materialize a `width x height` canvas by sampling `image` at the
/// inverse-mapped position of every output pixel centre.
pub fn warp(
    image: &RgbaImage,
    coeffs: &PerspectiveCoeffs,
    width: u32,
    height: u32,
    filter: InterpolationFilter,
) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        match coeffs.apply(f64::from(x) + 0.5, f64::from(y) + 0.5) {
            Some((sx, sy)) => sample(image, sx, sy, filter),
            None => Rgba([0, 0, 0, 0]),
        }
    })
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
