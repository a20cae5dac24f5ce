//! SVG rendering of a replay frame.
//!
//! Draws a [`Scene`] the way the live viewer lays it out: field
//! background, optional feed robots, the replayed robot, the target
//! overlay and the text blocks.

use std::path::Path;

use drishti_log::scene::{ScreenPoint, TextBlock};
use drishti_log::{GameProfile, Scene};
use svg::node::element::{Circle, Group, Image, Line, Rectangle, Text};
use svg::Document;

use crate::error::{Result, ViewerError};

/// Drawing colors.
mod colors {
    /// Background when no field image is configured
    pub const FIELD: &str = "rgb(0,100,255)";
    /// Robot body without a sprite
    pub const ROBOT: &str = "#333333";
    /// Robot front marker
    pub const ROBOT_FRONT: &str = "#FFD700";
    /// Robot to target line
    pub const ERROR_LINE: &str = "rgb(255,0,0)";
    /// Target heading indicator
    pub const HEADING: &str = "rgb(0,255,0)";
}

/// Side of the fallback robot square, in pixels.
const ROBOT_SIZE: f64 = 30.0;

/// Overlay line width, in pixels.
const OVERLAY_WIDTH: f64 = 5.0;

fn rgb(color: [u8; 3]) -> String {
    format!("rgb({},{},{})", color[0], color[1], color[2])
}

fn line(from: ScreenPoint, to: ScreenPoint, color: &str) -> Line {
    Line::new()
        .set("x1", from.x)
        .set("y1", from.y)
        .set("x2", to.x)
        .set("y2", to.y)
        .set("stroke", color)
        .set("stroke-width", OVERLAY_WIDTH)
        .set("stroke-linecap", "round")
}

fn text_block(block: &TextBlock, color: &str) -> Group {
    let mut group = Group::new()
        .set("font-family", "Courier New, monospace")
        .set("font-size", block.font_size)
        .set("fill", color);
    for (i, text) in block.text.lines().enumerate() {
        // SVG places text by baseline
        let y = block.y + (block.font_size + block.line_spacing) * i as f64 + block.font_size;
        group = group.add(
            Text::new(text)
                .set("x", block.x)
                .set("y", y)
                .set("xml:space", "preserve"),
        );
    }
    group
}

/// Build the SVG document for one frame.
pub fn render_scene(scene: &Scene, profile: &GameProfile) -> Document {
    let (width, height) = (scene.width, scene.height);
    let mut doc = Document::new()
        .set("width", width)
        .set("height", height)
        .set("viewBox", (0.0, 0.0, width, height));

    doc = match &profile.field_image {
        Some(path) => doc.add(
            Image::new()
                .set("href", path.display().to_string())
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height),
        ),
        None => doc.add(
            Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", colors::FIELD),
        ),
    };

    if let Some(robot) = &scene.robot {
        let (cx, cy) = (robot.center.x, robot.center.y);
        let half = ROBOT_SIZE / 2.0;
        // field headings are counter-clockwise, SVG rotation is clockwise
        let mut group = Group::new()
            .set("id", "robot")
            .set("transform", format!("rotate({} {} {})", -robot.heading, cx, cy));
        group = match &profile.robot_image {
            Some(path) => group.add(
                Image::new()
                    .set("href", path.display().to_string())
                    .set("x", cx as f64 - half)
                    .set("y", cy as f64 - half)
                    .set("width", ROBOT_SIZE)
                    .set("height", ROBOT_SIZE),
            ),
            None => group
                .add(
                    Rectangle::new()
                        .set("x", cx as f64 - half)
                        .set("y", cy as f64 - half)
                        .set("width", ROBOT_SIZE)
                        .set("height", ROBOT_SIZE)
                        .set("fill", colors::ROBOT),
                )
                .add(line(
                    robot.center,
                    ScreenPoint::new(cx + half as i64, cy),
                    colors::ROBOT_FRONT,
                )),
        };
        doc = doc.add(group);
    }

    if let Some(error) = &scene.error {
        doc = doc.add(
            Group::new()
                .set("id", "target")
                .add(line(error.robot, error.target, colors::ERROR_LINE))
                .add(line(error.target, error.heading_tip, colors::HEADING)),
        );
    }

    if !scene.feed.is_empty() {
        let mut group = Group::new().set("id", "feed");
        for marker in &scene.feed {
            group = group.add(
                Circle::new()
                    .set("cx", marker.center.x)
                    .set("cy", marker.center.y)
                    .set("r", drishti_log::scene::FEED_MARKER_RADIUS)
                    .set("fill", rgb(marker.color))
                    .set("data-team", marker.team_key.as_str()),
            );
        }
        doc = doc.add(group);
    }

    let text_color = rgb(scene.text_color);
    if let Some(info) = &scene.info {
        doc = doc.add(text_block(info, &text_color));
    }
    doc.add(text_block(&scene.timer, &text_color))
}

/// Write the frame to `path`.
pub fn save(path: &Path, doc: &Document) -> Result<()> {
    svg::save(path, doc).map_err(ViewerError::Svg)?;
    log::info!("Wrote frame to {}", path.display());
    Ok(())
}
