//! Per-frame image transforms.
//!
//! Everything here maps one RGBA raster to a new one and is safe to call
//! from a transform closure handed to [`render`](crate::animation::render).
//!
//! - [`fit_size`] - scale and place an image on a fixed-size canvas
//! - [`perspective`] - warp an image onto four destination corners
//! - [`rotate`] - rotate about the centre, optionally expanding the canvas
//! - [`square`], [`circle`], [`flatten`], [`to_avatar`] - avatar shaping
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downwards
//! - Pixel `(i, j)` covers the area `[i, i+1) x [j, j+1)`
//! - Rotation angles are in degrees, positive = counter-clockwise

mod fit;
mod perspective;
mod rotation;
mod sample;
mod shape;

pub use fit::{compute_fit, fit_size, FitDirection, FitLayout, FitMode, SizeSpec};
pub use perspective::{
    perspective, solve_homography, solve_perspective, warp, GeometryError, PerspectiveCoeffs,
    Point2D, Quadrilateral, MAX_CANVAS_SIDE,
};
pub use rotation::{compute_rotated_bounds, rotate};
pub use sample::InterpolationFilter;
pub use shape::{circle, flatten, square, to_avatar};
