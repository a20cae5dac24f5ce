//! Geometry properties over the configured alliance frames.

mod common;

use approx::assert_relative_eq;
use drishti_log::geometry::{flip_y, rotate_vector};
use drishti_log::{AllianceFrame, AxisDirection, ConfigError, FieldPoint, Pose};

const AXES: [AxisDirection; 4] = [
    AxisDirection::PlusX,
    AxisDirection::PlusY,
    AxisDirection::MinusX,
    AxisDirection::MinusY,
];

fn sample_points() -> Vec<FieldPoint> {
    let mut points = Vec::new();
    for i in -3..=3 {
        for j in -3..=3 {
            points.push(FieldPoint::new(i as f64 * 17.25, j as f64 * 9.5));
        }
    }
    points
}

#[test]
fn test_align_inverse_for_every_axis() {
    for axis in AXES {
        let frame = AllianceFrame::new(FieldPoint::new(123.0, -45.5), axis);
        for p in sample_points() {
            let back = frame.unalign(frame.align_with_origin(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_heading_range_for_any_angle() {
    let config = common::config();
    let angles = [-1e6, -720.5, -360.0, -0.1, 0.0, 359.999, 360.0, 725.0, 1e6];
    for alliance in ["red", "blue"] {
        for angle in angles {
            let h = config.apply_x_direction(alliance, angle).unwrap();
            assert!((0.0..360.0).contains(&h), "{} {} -> {}", alliance, angle, h);
        }
    }
}

#[test]
fn test_flip_is_involution() {
    let (_, height) = common::config().field_size();
    for p in sample_points() {
        let back = flip_y(flip_y(p, height), height);
        assert_relative_eq!(back.x, p.x);
        assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
    }
}

#[test]
fn test_red_and_blue_meet_mid_field() {
    let config = common::config();
    // both alliances driving 150 inches forward end at the field center
    let blue = config
        .v3_align_with_origin("blue", &Pose::new(150.0, 75.0, 0.0))
        .unwrap();
    let red = config
        .v3_align_with_origin("red", &Pose::new(150.0, 75.0, 0.0))
        .unwrap();
    assert_relative_eq!(blue.x, red.x);
    assert_relative_eq!(blue.y, red.y);
    assert_relative_eq!((blue.heading - red.heading).abs(), 180.0);
}

#[test]
fn test_rotate_vector_full_turn() {
    let v = FieldPoint::new(2.0, 5.0);
    let r = rotate_vector(v, 360.0);
    assert_relative_eq!(r.x, v.x, epsilon = 1e-9);
    assert_relative_eq!(r.y, v.y, epsilon = 1e-9);
}

#[test]
fn test_unknown_alliance_is_config_error() {
    let config = common::config();
    let err = config
        .align_with_origin("purple", FieldPoint::default())
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownAlliance(_)));
}
