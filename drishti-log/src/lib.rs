//! # Drishti
//!
//! Replay of autonomous-period tracelogs on a 2D field diagram.
//!
//! ## Overview
//!
//! The robot writes a plain text log in which some lines carry an XML
//! record after an `_Info` marker. Drishti turns that log into timestamped
//! pose samples, maps them from the alliance's recording frame into the
//! field frame, and drives a seekable playback clock over them.
//!
//! ## Features
//!
//! - **Tolerant Parsing**: Malformed records are classified and skipped; only an unreadable pose string or a structurally incomplete log fails the load
//! - **Alliance Frames**: Per-alliance origin and axis direction from the settings file
//! - **Playback Clock**: Pausable, seekable stopwatch clamped to the log length
//! - **Scene Building**: Pixel positions for robot, target overlay, feed robots and text
//! - **Position Feed**: Zebra MotionWorks payload decoding for the other five robots
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use drishti_log::{FieldConfig, ReplaySession, Scene};
//!
//! let config = FieldConfig::load(Path::new("drishti.toml"))?;
//! let mut session = ReplaySession::new();
//! session.load_file(Path::new("auto.log"), &config)?;
//!
//! session.clock_mut().start();
//! session.update_step();
//! let scene = Scene::build(&mut session, &config, true);
//! ```
//!
//! ## Coordinate System
//!
//! Field frame in inches, origin at the lower-left field corner as drawn:
//! - X: along the field length
//! - Y: across the field, up in the diagram
//! - Heading: degrees in `[0, 360)`
//!
//! Diagram pixels have their origin top-left, hence the `flip_y` step.

// Core types
pub mod core;

// Alliance frames and transforms
pub mod geometry;

// Settings file
pub mod config;

// Log parsing
pub mod parser;

// Playback clock
pub mod playback;

// Loaded log, clock and step cursor
pub mod session;

// Screen-space frame description
pub mod scene;

// Zebra MotionWorks feed
pub mod feed;

// Re-export commonly used types
pub use crate::core::{AutoChoices, FieldPoint, LineClass, MatchInfo, Pose, Sample};

pub use geometry::{Alliance, AllianceFrame, AxisDirection};

pub use config::{ConfigError, FieldConfig, GameProfile};

pub use parser::{load_log, parse_bytes, parse_lines, parse_str, ParseError, ParsedLog};

pub use playback::{ManualClock, Stopwatch, SystemClock, TimeSource};

pub use session::{ReplaySession, SessionError};

pub use scene::{Scene, ScreenPoint};

pub use feed::{FeedError, MotionWorksFeed, TeamTrack};
