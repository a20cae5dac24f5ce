//! Field configuration loading and alliance-string entry points.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, Result};
use crate::core::{FieldPoint, Pose};
use crate::geometry::{self, Alliance, AllianceFrame, AxisDirection};

/// One game's field geometry, as written in the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProfile {
    /// Field width and height in inches
    pub field_dimensions: [f64; 2],
    /// Rendered diagram width and height in pixels
    pub screen_dimensions: [f64; 2],
    /// Blue recording origin in field coordinates
    pub blue_origin: [f64; 2],
    /// Blue recorded +X direction
    pub blue_x_direction: AxisDirection,
    /// Red recording origin in field coordinates
    pub red_origin: [f64; 2],
    /// Red recorded +X direction
    pub red_x_direction: AxisDirection,
    /// Field background image
    #[serde(default)]
    pub field_image: Option<PathBuf>,
    /// Robot sprite
    #[serde(default)]
    pub robot_image: Option<PathBuf>,
    /// Overlay text color (RGB)
    #[serde(default = "default_text_color")]
    pub text_color: [u8; 3],
}

fn default_text_color() -> [u8; 3] {
    [255, 255, 255]
}

/// Validated field configuration for the selected game.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Selected game profile name
    pub game: String,
    /// Geometry of that game
    pub profile: GameProfile,
}

impl FieldConfig {
    /// Build from an already-deserialized profile, validating dimensions.
    pub fn from_profile(game: impl Into<String>, profile: GameProfile) -> Result<Self> {
        for (label, [w, h]) in [
            ("field_dimensions", profile.field_dimensions),
            ("screen_dimensions", profile.screen_dimensions),
        ] {
            if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
                return Err(ConfigError::InvalidDimensions(format!(
                    "{} must be positive, got [{}, {}]",
                    label, w, h
                )));
            }
        }
        Ok(Self {
            game: game.into(),
            profile,
        })
    }

    /// Load a settings file. `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        log::info!(
            "Loaded field config `{}` from {}",
            config.game,
            path.display()
        );
        Ok(config)
    }

    /// Parse a TOML settings document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut table: toml::Table = content.parse()?;
        let game = match table.get("game") {
            Some(toml::Value::String(name)) => name.clone(),
            Some(_) => return Err(ConfigError::Parse("`game` must be a string".into())),
            None => return Err(ConfigError::MissingGame),
        };
        let section = table
            .remove(&game)
            .ok_or_else(|| ConfigError::MissingProfile(game.clone()))?;
        let profile: GameProfile = section.try_into()?;
        Self::from_profile(game, profile)
    }

    /// Parse a JSON settings document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut root: serde_json::Value = serde_json::from_str(content)?;
        let game = match root.get("game") {
            Some(serde_json::Value::String(name)) => name.clone(),
            Some(_) => return Err(ConfigError::Parse("`game` must be a string".into())),
            None => return Err(ConfigError::MissingGame),
        };
        let section = root
            .get_mut(&game)
            .map(serde_json::Value::take)
            .ok_or_else(|| ConfigError::MissingProfile(game.clone()))?;
        let profile: GameProfile = serde_json::from_value(section)?;
        Self::from_profile(game, profile)
    }

    /// Field size in inches.
    pub fn field_size(&self) -> (f64, f64) {
        let [w, h] = self.profile.field_dimensions;
        (w, h)
    }

    /// Diagram size in pixels.
    pub fn screen_size(&self) -> (f64, f64) {
        let [w, h] = self.profile.screen_dimensions;
        (w, h)
    }

    /// Recording frame of an alliance.
    pub fn frame(&self, alliance: Alliance) -> AllianceFrame {
        let (origin, axis) = match alliance {
            Alliance::Blue => (self.profile.blue_origin, self.profile.blue_x_direction),
            Alliance::Red => (self.profile.red_origin, self.profile.red_x_direction),
        };
        AllianceFrame::new(FieldPoint::new(origin[0], origin[1]), axis)
    }

    /// Resolve a free-text alliance and return its frame.
    pub fn frame_for(&self, alliance: &str) -> Result<AllianceFrame> {
        Ok(self.frame(Alliance::resolve(alliance)?))
    }

    /// Map a recorded point into the field frame.
    pub fn align_with_origin(&self, alliance: &str, point: FieldPoint) -> Result<FieldPoint> {
        Ok(self.frame_for(alliance)?.align_with_origin(point))
    }

    /// Convert a recorded heading into the field frame, in `[0, 360)`.
    pub fn apply_x_direction(&self, alliance: &str, angle: f64) -> Result<f64> {
        Ok(self.frame_for(alliance)?.apply_x_direction(angle))
    }

    /// Align position and heading of a recorded pose.
    pub fn v3_align_with_origin(&self, alliance: &str, pose: &Pose) -> Result<Pose> {
        Ok(self.frame_for(alliance)?.align_pose(pose))
    }

    /// Mirror a field point vertically for image-row coordinates.
    pub fn flip_y(&self, point: FieldPoint) -> FieldPoint {
        geometry::flip_y(point, self.profile.field_dimensions[1])
    }
}
