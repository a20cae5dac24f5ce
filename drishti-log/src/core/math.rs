//! Angle arithmetic in degrees.
//!
//! Tracelog headings are recorded in degrees, so everything here works in
//! degrees rather than radians.

/// Wrap an angle into `[0, 360)`.
///
/// Uses the Euclidean remainder so negative inputs wrap upward. The extra
/// fold catches `rem_euclid` rounding tiny negative values up to exactly 360.
///
/// # Example
/// ```
/// use drishti_log::core::math::wrap_degrees;
///
/// assert_eq!(wrap_degrees(-90.0), 270.0);
/// assert_eq!(wrap_degrees(720.0), 0.0);
/// ```
#[inline]
pub fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
