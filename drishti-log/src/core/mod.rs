//! Core types shared by the parser, geometry and session layers.

pub mod math;
mod pose;
mod sample;

pub use pose::{FieldPoint, Pose};
pub use sample::{AutoChoices, INITIAL_STATE, LineClass, MatchInfo, Sample};
