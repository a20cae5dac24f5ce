//! Pose and point types in recorded (robot-log-native) coordinates.

use serde::{Deserialize, Serialize};

/// A 2D point in field units (inches for the recorded logs).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldPoint {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl FieldPoint {
    /// Create a new point.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise scale, used for unit conversions (feet to inches etc.).
    #[inline]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &FieldPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for FieldPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Robot pose as written by the recording firmware.
///
/// Heading is in degrees. Its zero and sign convention belong to the
/// firmware and are not validated here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in degrees
    pub heading: f64,
}

impl Pose {
    /// Create a new pose. No normalization is applied.
    #[inline]
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }

    /// Position part of the pose.
    #[inline]
    pub fn position(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }
}
