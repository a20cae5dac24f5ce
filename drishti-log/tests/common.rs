//! Test utilities for Drishti.
//!
//! Builders for tracelog lines and a small settings file.

#![allow(dead_code)]

use drishti_log::FieldConfig;

/// Settings used by the integration tests: a 2:1 field drawn at 2 px/inch.
pub const SETTINGS_TOML: &str = r#"
game = "test_field"

[test_field]
field_dimensions = [300.0, 150.0]
screen_dimensions = [600, 300]
blue_origin = [0.0, 0.0]
blue_x_direction = 0
red_origin = [300.0, 150.0]
red_x_direction = 2
"#;

pub fn config() -> FieldConfig {
    FieldConfig::from_toml_str(SETTINGS_TOML).unwrap()
}

/// `StateInfo` event line.
pub fn state_info(time: f64, actual: (f64, f64, f64), target: (f64, f64, f64), state: &str) -> String {
    format!(
        r#"Auto_Info: <Event name="StateInfo" time="{}" xPos="{}" yPos="{}" heading="{}" xTarget="{}" yTarget="{}" headingTarget="{}" state="{}"/>"#,
        time, actual.0, actual.1, actual.2, target.0, target.1, target.2, state
    )
}

/// `RobotPose` event line with the packed pose string.
pub fn robot_pose(time: f64, x: f64, y: f64, angle: f64) -> String {
    format!(
        r#"Pose_Info: <Event name="RobotPose" time="{}" pose="x={}, y={}, angle={}"/>"#,
        time, x, y, angle
    )
}

pub fn match_info(kind: &str, number: u32) -> String {
    format!(
        r#"Match_Info: <Info name="MatchInfo" date="2020-03-07" type="{}" number="{}"/>"#,
        kind, number
    )
}

pub fn auto_choices(alliance: &str) -> String {
    format!(
        r#"Choices_Info: <Info name="AutoChoices" alliance="{}" start="center" preload="3"/>"#,
        alliance
    )
}

/// A short drive: three samples between console noise.
pub fn drive_log(alliance: &str) -> Vec<String> {
    vec![
        "[boot] robot code ready".to_string(),
        match_info("Qualification", 20),
        auto_choices(alliance),
        state_info(0.0, (0.0, 0.0, 0.0), (48.0, 0.0, 0.0), "DRIVE_OUT"),
        "[drive] pid tuned".to_string(),
        robot_pose(0.5, 12.0, 0.0, 0.0),
        robot_pose(1.0, 30.0, 1.0, 2.0),
        state_info(1.5, (48.0, 2.0, 5.0), (48.0, 48.0, 90.0), "TURN"),
        "Bad_Info: <Event name=\"RobotPose\" time=\"2.0\"".to_string(),
        robot_pose(2.0, 48.0, 20.0, 60.0),
    ]
}
