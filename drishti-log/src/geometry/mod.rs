//! Field geometry: alliance frames and screen-oriented helpers.
//!
//! Recorded poses are relative to an alliance's starting corner. The
//! helpers here are kept separate so the scene can compose them in the
//! order the field diagram needs (align, flip, scale).

mod frame;

pub use frame::{Alliance, AllianceFrame, AxisDirection};

use crate::core::FieldPoint;

/// Mirror a point vertically within a field of the given height.
///
/// Field coordinates grow upward; image rows grow downward.
///
/// # Example
/// ```
/// use drishti_log::core::FieldPoint;
/// use drishti_log::geometry::flip_y;
///
/// let p = flip_y(FieldPoint::new(10.0, 30.0), 100.0);
/// assert_eq!(p, FieldPoint::new(10.0, 70.0));
/// ```
#[inline]
pub fn flip_y(point: FieldPoint, field_height: f64) -> FieldPoint {
    FieldPoint::new(point.x, field_height - point.y)
}

/// Rotate a vector by `degrees`, treating it as a row vector.
///
/// Computes `v · R(θ)`, which turns the vector clockwise for positive
/// angles: `(x cos θ + y sin θ, -x sin θ + y cos θ)`.
#[inline]
pub fn rotate_vector(v: FieldPoint, degrees: f64) -> FieldPoint {
    let (s, c) = degrees.to_radians().sin_cos();
    FieldPoint::new(v.x * c + v.y * s, -v.x * s + v.y * c)
}
