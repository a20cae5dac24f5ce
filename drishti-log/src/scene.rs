//! Screen-space description of one replay frame.
//!
//! [`Scene::build`] composes the geometry transforms (align, flip, scale)
//! for everything the field diagram draws. Renderers only place shapes
//! and text at the returned pixel positions.

use crate::config::FieldConfig;
use crate::core::{AutoChoices, FieldPoint, MatchInfo, Pose};
use crate::geometry::{rotate_vector, Alliance};
use crate::playback::TimeSource;
use crate::session::ReplaySession;

/// Length of the target heading indicator, in inches.
const HEADING_INDICATOR_LEN: f64 = 5.0;

/// Radius of a feed robot marker, in pixels.
pub const FEED_MARKER_RADIUS: f64 = 7.0;

/// Timer font size in pixels.
pub const TIMER_FONT_SIZE: f64 = 30.0;

/// Robot info font size in pixels.
pub const INFO_FONT_SIZE: f64 = 15.0;

/// Minimum horizontal room reserved for the robot info block.
const INFO_BLOCK_WIDTH: f64 = 215.0;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// Estimated rendered width of `text` at `font_size`.
fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * GLYPH_WIDTH_RATIO
}

/// A pixel position on the diagram, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    pub x: i64,
    pub y: i64,
}

impl ScreenPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    fn offset(self, other: ScreenPoint) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// The replayed robot.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotMarker {
    pub center: ScreenPoint,
    /// Field-frame heading in degrees, counter-clockwise
    pub heading: f64,
}

/// Line from the robot to its target plus the target heading indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorOverlay {
    pub robot: ScreenPoint,
    pub target: ScreenPoint,
    pub heading_tip: ScreenPoint,
}

/// One robot from the position feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMarker {
    pub alliance: Alliance,
    pub team_key: String,
    pub center: ScreenPoint,
    pub color: [u8; 3],
}

/// A block of text lines anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub line_spacing: f64,
    pub text: String,
}

/// Everything to draw for the current playback time.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub time: f64,
    pub robot: Option<RobotMarker>,
    pub error: Option<ErrorOverlay>,
    pub feed: Vec<FeedMarker>,
    pub timer: TextBlock,
    pub info: Option<TextBlock>,
    pub text_color: [u8; 3],
}

/// Scale field inches to diagram pixels, rounding half to even.
pub fn inches_to_pixels(config: &FieldConfig, point: FieldPoint) -> ScreenPoint {
    let (fw, fh) = config.field_size();
    let (sw, sh) = config.screen_size();
    ScreenPoint::new(
        (point.x * (sw / fw)).round_ties_even() as i64,
        (point.y * (sh / fh)).round_ties_even() as i64,
    )
}

/// Field point to pixel position: flip then scale.
fn to_screen(config: &FieldConfig, point: FieldPoint) -> ScreenPoint {
    inches_to_pixels(config, config.flip_y(point))
}

impl Scene {
    /// Build the frame for the session's current step and clock time.
    ///
    /// `show_error` adds the robot-to-target overlay when the sample has a
    /// target. Without a loaded log only the timer is produced.
    pub fn build<T: TimeSource>(
        session: &mut ReplaySession<T>,
        config: &FieldConfig,
        show_error: bool,
    ) -> Scene {
        let time = session.clock_mut().get_time();
        let (width, height) = config.screen_size();
        let blue = session
            .loaded()
            .is_some_and(|l| l.alliance == Alliance::Blue);

        let timer = TextBlock {
            x: 15.0,
            y: if blue { height - 70.0 } else { 40.0 },
            font_size: TIMER_FONT_SIZE,
            line_spacing: 5.0,
            text: format!("Time: {:.3}", time),
        };

        let mut scene = Scene {
            width,
            height,
            time,
            robot: None,
            error: None,
            feed: Vec::new(),
            timer,
            info: None,
            text_color: config.profile.text_color,
        };

        let (Some(loaded), Some(sample)) = (session.loaded(), session.current_sample()) else {
            return scene;
        };

        let actual = loaded.frame.align_pose(&sample.actual_pose);
        let robot_center = to_screen(config, actual.position());
        scene.robot = Some(RobotMarker {
            center: robot_center,
            heading: actual.heading,
        });

        if show_error {
            scene.error = sample.target_pose.map(|target| {
                let target = loaded.frame.align_pose(&target);
                let indicator = rotate_vector(
                    FieldPoint::new(0.0, HEADING_INDICATOR_LEN),
                    target.heading + 180.0,
                );
                let target_px = to_screen(config, target.position());
                ErrorOverlay {
                    robot: robot_center,
                    target: target_px,
                    heading_tip: target_px.offset(inches_to_pixels(config, indicator)),
                }
            });
        }

        // the state line is the one that grows
        let state_width = text_width(&format!("state: {}", sample.state_name), INFO_FONT_SIZE);
        scene.info = Some(TextBlock {
            x: width - INFO_BLOCK_WIDTH.max(state_width),
            y: if blue { height - 100.0 } else { 10.0 },
            font_size: INFO_FONT_SIZE,
            line_spacing: 3.0,
            text: robot_info_text(
                &sample.actual_pose,
                sample.target_pose.as_ref(),
                sample.time,
                &sample.state_name,
            ),
        });

        if let Some(feed) = session.feed() {
            scene.feed = feed
                .positions_at(time)
                .into_iter()
                .map(|p| FeedMarker {
                    alliance: p.alliance,
                    team_key: p.team_key.to_string(),
                    center: to_screen(config, p.position),
                    color: match p.alliance {
                        Alliance::Red => [255, 0, 0],
                        Alliance::Blue => [0, 0, 255],
                    },
                })
                .collect();
        }

        scene
    }
}

/// Robot info block: recorded pose against target, last time and state.
///
/// Values are in the recorded frame. A missing target prints as `-`.
pub fn robot_info_text(actual: &Pose, target: Option<&Pose>, time: f64, state: &str) -> String {
    let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.1}", v));
    format!(
        "x: {:12.1}/{}\ny: {:12.1}/{}\nheading: {:6.1}/{}\nlast time: {:.3}\nstate: {}",
        actual.x,
        fmt(target.map(|t| t.x)),
        actual.y,
        fmt(target.map(|t| t.y)),
        actual.heading,
        fmt(target.map(|t| t.heading)),
        time,
        state
    )
}

/// Match info window text. Empty fields when nothing is loaded.
pub fn match_info_text(info: Option<&MatchInfo>) -> String {
    let (date, kind, number) = info.map_or(("", "", ""), |i| {
        (i.date.as_str(), i.match_type.as_str(), i.match_number.as_str())
    });
    format!("Date: {}\nType: {}\nNumber: {}", date, kind, number)
}

/// Auto choices window text, one `key: value` per line.
pub fn auto_choices_text(choices: Option<&AutoChoices>) -> String {
    choices
        .map(|c| {
            c.entries
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}
