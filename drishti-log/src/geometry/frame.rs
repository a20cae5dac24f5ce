//! Alliance-relative coordinate frames.
//!
//! Each alliance records poses relative to its own starting corner, with
//! its own notion of "forward". An [`AllianceFrame`] maps those recorded
//! coordinates into the canonical field frame.
//!
//! ```text
//!  axis 0 (+X):  ( ox + x, oy + y )
//!  axis 1 (+Y):  ( ox - y, oy + x )
//!  axis 2 (-X):  ( ox - x, oy - y )
//!  axis 3 (-Y):  ( ox + y, oy - x )
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::math::wrap_degrees;
use crate::core::{FieldPoint, Pose};

/// Direction of the recorded +X axis in the field frame.
///
/// The discriminant is the number of quarter turns, which is also the
/// value written in the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AxisDirection {
    /// Recorded +X is field +X
    PlusX = 0,
    /// Recorded +X is field +Y
    PlusY = 1,
    /// Recorded +X is field -X
    MinusX = 2,
    /// Recorded +X is field -Y
    MinusY = 3,
}

impl AxisDirection {
    /// Number of quarter turns.
    #[inline]
    pub fn quarter_turns(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for AxisDirection {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(AxisDirection::PlusX),
            1 => Ok(AxisDirection::PlusY),
            2 => Ok(AxisDirection::MinusX),
            3 => Ok(AxisDirection::MinusY),
            other => Err(ConfigError::InvalidAxisDirection(other)),
        }
    }
}

impl From<AxisDirection> for i64 {
    fn from(axis: AxisDirection) -> Self {
        axis.quarter_turns()
    }
}

/// Alliance selecting an origin table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    /// Red alliance
    Red,
    /// Blue alliance
    Blue,
}

impl Alliance {
    /// Resolve a free-text alliance string.
    ///
    /// Case-insensitive substring match, `"blue"` tested first. Any text
    /// that merely contains "blue" (an event or team name, say) selects the
    /// blue frame; the recorded logs only ever write the bare color.
    pub fn resolve(text: &str) -> Result<Self, ConfigError> {
        let lower = text.to_lowercase();
        if lower.contains("blue") {
            Ok(Alliance::Blue)
        } else if lower.contains("red") {
            Ok(Alliance::Red)
        } else {
            Err(ConfigError::UnknownAlliance(text.to_string()))
        }
    }

    /// Lowercase name, as used in feed payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        }
    }
}

/// Origin and axis direction of one alliance's recording frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllianceFrame {
    /// Recorded (0, 0) expressed in field coordinates
    pub origin: FieldPoint,
    /// Direction of the recorded +X axis
    pub axis: AxisDirection,
}

impl AllianceFrame {
    /// Create a frame.
    pub fn new(origin: FieldPoint, axis: AxisDirection) -> Self {
        Self { origin, axis }
    }

    /// Map a recorded point into the field frame.
    pub fn align_with_origin(&self, point: FieldPoint) -> FieldPoint {
        let FieldPoint { x: ox, y: oy } = self.origin;
        let FieldPoint { x, y } = point;
        match self.axis {
            AxisDirection::PlusX => FieldPoint::new(ox + x, oy + y),
            AxisDirection::PlusY => FieldPoint::new(ox - y, oy + x),
            AxisDirection::MinusX => FieldPoint::new(ox - x, oy - y),
            AxisDirection::MinusY => FieldPoint::new(ox + y, oy - x),
        }
    }

    /// Map a field-frame point back into recorded coordinates.
    ///
    /// Exact inverse of [`align_with_origin`](Self::align_with_origin).
    pub fn unalign(&self, point: FieldPoint) -> FieldPoint {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        match self.axis {
            AxisDirection::PlusX => FieldPoint::new(dx, dy),
            AxisDirection::PlusY => FieldPoint::new(dy, -dx),
            AxisDirection::MinusX => FieldPoint::new(-dx, -dy),
            AxisDirection::MinusY => FieldPoint::new(-dy, dx),
        }
    }

    /// Convert a recorded heading (degrees) into the field frame.
    ///
    /// `-(angle - axis * 90) mod 360`, always in `[0, 360)`.
    pub fn apply_x_direction(&self, angle: f64) -> f64 {
        let offset = self.axis.quarter_turns() as f64 * 90.0;
        wrap_degrees(-(angle - offset))
    }

    /// Align position and heading together (`v3_align_with_origin`).
    pub fn align_pose(&self, pose: &Pose) -> Pose {
        let p = self.align_with_origin(pose.position());
        Pose::new(p.x, p.y, self.apply_x_direction(pose.heading))
    }
}
