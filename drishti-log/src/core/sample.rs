//! Timestamped observations and match metadata produced by the parser.

use serde::{Deserialize, Serialize};

use super::pose::Pose;

/// State name used until the first `StateInfo` event announces one.
pub const INITIAL_STATE: &str = "NONE";

/// One timestamped robot observation derived from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Match time in seconds
    pub time: f64,
    /// Measured pose
    pub actual_pose: Pose,
    /// Last announced target; `None` only before the first `StateInfo`
    pub target_pose: Option<Pose>,
    /// Last announced autonomous state
    pub state_name: String,
    /// Index of the raw log line this sample came from
    pub source_line_index: usize,
}

/// Match identification record (`Info name="MatchInfo"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    /// Date as written by the robot
    pub date: String,
    /// Match type, e.g. `Qualification`
    pub match_type: String,
    /// Match number, kept as text
    pub match_number: String,
}

/// Autonomous selections (`Info name="AutoChoices"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoChoices {
    /// Free-text alliance; selects the coordinate frame
    pub alliance: String,
    /// Every attribute except `name`, in document order
    pub entries: Vec<(String, String)>,
}

impl AutoChoices {
    /// Look up a choice by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Display classification of a raw log line.
///
/// Only used for highlighting; never drives parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineClass {
    /// No structured record marker
    Plain,
    /// Decoded pose-bearing event
    Pose,
    /// Decoded metadata record
    Meta,
    /// Marker present but the record could not be used
    Malformed,
}

impl LineClass {
    /// True for records that decoded and were accepted.
    #[inline]
    pub fn is_structured(&self) -> bool {
        matches!(self, LineClass::Pose | LineClass::Meta)
    }
}
