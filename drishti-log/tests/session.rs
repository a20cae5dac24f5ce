//! Session integration tests: loading, playback and scene building.

mod common;

use approx::assert_relative_eq;
use drishti_log::scene::{auto_choices_text, match_info_text};
use drishti_log::{
    Alliance, FieldConfig, ManualClock, MotionWorksFeed, ReplaySession, Scene, ScreenPoint,
    SessionError,
};

fn session() -> (ManualClock, ReplaySession<ManualClock>) {
    let clock = ManualClock::new();
    let session = ReplaySession::with_source(clock.clone());
    (clock, session)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_failed_reload_keeps_state() {
    let config = common::config();
    let (clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();
    session.set_step(3);
    session.clock_mut().start();
    clock.advance(0.25);
    let time_before = session.clock_mut().get_time();

    let err = session
        .load_lines(["nothing structured here"], &config)
        .unwrap_err();
    assert!(matches!(err, SessionError::Parse(_)));
    assert!(err.to_string().contains("no position info"));

    assert_eq!(session.step(), 3);
    assert_eq!(session.log().unwrap().samples.len(), 5);
    assert_eq!(session.loaded().unwrap().alliance, Alliance::Blue);
    assert_relative_eq!(session.clock_mut().get_time(), time_before, epsilon = 1e-9);
}

#[test]
fn test_unreadable_pose_string_keeps_state() {
    let config = common::config();
    let (_clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();
    session.set_step(2);

    let mut lines = common::drive_log("red");
    lines.push(r#"Pose_Info: <Event name="RobotPose" time="9" pose="y=2, angle=3"/>"#.to_string());
    let err = session.load_lines(lines, &config).unwrap_err();
    assert!(matches!(err, SessionError::Parse(_)));
    assert!(err.to_string().contains("specified variable x"));

    assert_eq!(session.step(), 2);
    assert_eq!(session.loaded().unwrap().alliance, Alliance::Blue);
}

#[test]
fn test_reload_replaces_log_and_drops_feed() {
    let config = common::config();
    let (_clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();
    session.attach_feed(
        MotionWorksFeed::from_json(r#"{"times": [0.0], "alliances": {"red": [], "blue": []}}"#)
            .unwrap(),
    );
    session.set_step(4);

    let mut other = common::drive_log("red");
    other[1] = common::match_info("Semifinal", 2);
    session.load_lines(other, &config).unwrap();

    assert_eq!(session.title().as_deref(), Some("Semifinal 2"));
    assert_eq!(session.step(), 0);
    assert!(session.feed().is_none());
    assert_eq!(session.loaded().unwrap().alliance, Alliance::Red);
}

#[test]
fn test_load_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let log_path = dir.path().join("match.log");
    std::fs::write(&log_path, common::drive_log("red").join("\n")).unwrap();
    let config_path = dir.path().join("settings.toml");
    std::fs::write(&config_path, common::SETTINGS_TOML).unwrap();

    let config = FieldConfig::load(&config_path).unwrap();
    let (_clock, mut session) = session();
    session.load_file(&log_path, &config).unwrap();
    assert_eq!(session.clock().max_time(), Some(2.0));
}

// ============================================================================
// Playback
// ============================================================================

#[test]
fn test_playback_walks_through_samples() {
    let config = common::config();
    let (clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();

    session.clock_mut().start();
    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push(session.update_step());
        clock.advance(0.5);
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 4]);
    assert!(session.clock().is_paused());
}

#[test]
fn test_raw_line_round_trip() {
    let config = common::config();
    let (_clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();

    // the malformed line 8 falls back to the sample on line 7
    session.set_step_from_line(8);
    assert_eq!(session.step(), 3);
    assert_eq!(session.current_line(), Some(7));
    assert_relative_eq!(session.clock_mut().get_time(), 1.5);
}

// ============================================================================
// Scene
// ============================================================================

#[test]
fn test_scene_for_red_robot() {
    let config = common::config();
    let (_clock, mut session) = session();
    session.load_lines(common::drive_log("red"), &config).unwrap();
    session.set_step(3);

    let scene = Scene::build(&mut session, &config, true);
    assert_eq!(scene.timer.text, "Time: 1.500");

    // red: (300 - 48, 150 - 2) = (252, 148), flipped to (252, 2)
    let robot = scene.robot.unwrap();
    assert_eq!(robot.center, ScreenPoint::new(504, 4));
    assert_relative_eq!(robot.heading, 175.0);

    let error = scene.error.unwrap();
    // target (252, 102) flipped to (252, 48)
    assert_eq!(error.target, ScreenPoint::new(504, 96));

    let info = scene.info.unwrap();
    assert!(info.text.ends_with("state: TURN"));
}

#[test]
fn test_info_window_texts() {
    let config = common::config();
    let (_clock, mut session) = session();
    session.load_lines(common::drive_log("blue"), &config).unwrap();
    let log = session.log().unwrap();

    assert_eq!(
        match_info_text(Some(&log.match_info)),
        "Date: 2020-03-07\nType: Qualification\nNumber: 20"
    );
    assert_eq!(
        auto_choices_text(Some(&log.auto_choices)),
        "alliance: blue\nstart: center\npreload: 3"
    );
}
