//! Game-profile settings for the field diagram.
//!
//! One settings file can hold several game profiles; the top-level `game`
//! entry selects which one is used.
//!
//! ## Example TOML
//!
//! ```toml
//! game = "infinite_recharge"
//!
//! [infinite_recharge]
//! field_dimensions = [629.25, 323.25]   # inches
//! screen_dimensions = [1000, 514]       # pixels
//! blue_origin = [0.0, 0.0]
//! blue_x_direction = 0                  # quarter turns, 0..=3
//! red_origin = [629.25, 323.25]
//! red_x_direction = 2
//! ```
//!
//! Files ending in `.json` are read as JSON with the same layout.

mod error;
mod field;

pub use error::{ConfigError, Result};
pub use field::{FieldConfig, GameProfile};
