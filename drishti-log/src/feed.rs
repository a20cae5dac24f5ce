//! Zebra MotionWorks position feed.
//!
//! TheBlueAlliance match pages embed the tracked positions of all six
//! robots as a JSON blob (`data-zebramotionworks`). This module decodes
//! that blob and answers "where was everyone at time t". Fetching the page
//! is left to the caller.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::FieldPoint;
use crate::geometry::Alliance;

/// Feet to inches.
pub const FEET_TO_INCHES: f64 = 12.0;

/// Feed decoding error.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid feed payload: {0}")]
    Decode(String),

    #[error("no feed match key for match type `{0}`")]
    UnsupportedMatchType(String),

    #[error("feed has no timestamps")]
    Empty,

    #[error("team {team}: {xs} x values but {ys} y values")]
    LengthMismatch { team: String, xs: usize, ys: usize },
}

impl From<serde_json::Error> for FeedError {
    fn from(e: serde_json::Error) -> Self {
        FeedError::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Deserialize)]
struct RawFeed {
    times: Vec<f64>,
    alliances: RawAlliances,
}

#[derive(Deserialize)]
struct RawAlliances {
    red: Vec<RawTeam>,
    blue: Vec<RawTeam>,
}

#[derive(Deserialize)]
struct RawTeam {
    team_key: String,
    xs: Vec<Option<f64>>,
    ys: Vec<Option<f64>>,
}

/// One robot's tracked positions, in feet, aligned with the feed times.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamTrack {
    /// Team key, e.g. `frc1234`
    pub team_key: String,
    /// Position per timestamp; `None` where the tracker lost the robot
    pub samples: Vec<Option<FieldPoint>>,
}

impl TeamTrack {
    fn from_raw(raw: RawTeam) -> Result<Self> {
        if raw.xs.len() != raw.ys.len() {
            return Err(FeedError::LengthMismatch {
                team: raw.team_key,
                xs: raw.xs.len(),
                ys: raw.ys.len(),
            });
        }
        let samples = raw
            .xs
            .into_iter()
            .zip(raw.ys)
            .map(|(x, y)| Some(FieldPoint::new(x?, y?)))
            .collect();
        Ok(Self {
            team_key: raw.team_key,
            samples,
        })
    }

    /// Position at `index`, in feet.
    pub fn at(&self, index: usize) -> Option<FieldPoint> {
        self.samples.get(index).copied().flatten()
    }
}

/// A feed position ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPosition<'a> {
    pub alliance: Alliance,
    pub team_key: &'a str,
    /// Field position in inches
    pub position: FieldPoint,
}

/// Decoded MotionWorks feed for one match.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionWorksFeed {
    /// Sample times in seconds, non-decreasing
    pub times: Vec<f64>,
    pub red: Vec<TeamTrack>,
    pub blue: Vec<TeamTrack>,
}

impl MotionWorksFeed {
    /// Decode the `data-zebramotionworks` JSON payload.
    pub fn from_json(payload: &str) -> Result<Self> {
        let raw: RawFeed = serde_json::from_str(payload)?;
        if raw.times.is_empty() {
            return Err(FeedError::Empty);
        }
        let red = raw
            .alliances
            .red
            .into_iter()
            .map(TeamTrack::from_raw)
            .collect::<Result<Vec<_>>>()?;
        let blue = raw
            .alliances
            .blue
            .into_iter()
            .map(TeamTrack::from_raw)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            times: raw.times,
            red,
            blue,
        })
    }

    /// Read a saved payload from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let feed = Self::from_json(&content)?;
        log::info!(
            "Loaded feed {}: {} timestamps, {} teams",
            path.display(),
            feed.times.len(),
            feed.red.len() + feed.blue.len()
        );
        Ok(feed)
    }

    /// First index whose time is at or after `t`, else the last index.
    pub fn closest_time_index(&self, t: f64) -> usize {
        self.times
            .iter()
            .position(|&time| time >= t)
            .unwrap_or_else(|| self.times.len().saturating_sub(1))
    }

    /// Tracks of one alliance.
    pub fn tracks(&self, alliance: Alliance) -> &[TeamTrack] {
        match alliance {
            Alliance::Red => &self.red,
            Alliance::Blue => &self.blue,
        }
    }

    /// Every known robot position at `t`, converted to inches.
    ///
    /// Robots without a position at that index are skipped.
    pub fn positions_at(&self, t: f64) -> Vec<FeedPosition<'_>> {
        let index = self.closest_time_index(t);
        [Alliance::Red, Alliance::Blue]
            .into_iter()
            .flat_map(|alliance| {
                self.tracks(alliance).iter().filter_map(move |track| {
                    track.at(index).map(|p| FeedPosition {
                        alliance,
                        team_key: &track.team_key,
                        position: p.scaled(FEET_TO_INCHES),
                    })
                })
            })
            .collect()
    }
}

/// TheBlueAlliance match page URL for a logged match.
///
/// # Example
/// ```
/// use drishti_log::feed::match_url;
///
/// let url = match_url(2020, "wasno", "Qualification", "20").unwrap();
/// assert_eq!(url, "https://www.thebluealliance.com/match/2020wasno_qm20");
/// ```
pub fn match_url(year: u32, event: &str, match_type: &str, number: &str) -> Result<String> {
    let level = match match_type {
        "Qualification" => "qm",
        "Quarterfinal" => "qf",
        "Semifinal" => "sf",
        "Final" => "f",
        other => return Err(FeedError::UnsupportedMatchType(other.to_string())),
    };
    Ok(format!(
        "https://www.thebluealliance.com/match/{}{}_{}{}",
        year, event, level, number
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const PAYLOAD: &str = r#"{
        "times": [0.0, 0.1, 0.2, 0.3],
        "alliances": {
            "red": [
                {"team_key": "frc254", "xs": [1.0, 2.0, null, 4.0], "ys": [1.0, 2.0, 3.0, 4.0]}
            ],
            "blue": [
                {"team_key": "frc1678", "xs": [10.0, 11.0, 12.0, 13.0], "ys": [5.0, 5.5, 6.0, 6.5]},
                {"team_key": "frc971", "xs": [null, null, null, null], "ys": [null, null, null, null]}
            ]
        }
    }"#;

    #[test]
    fn test_decode_payload() {
        let feed = MotionWorksFeed::from_json(PAYLOAD).unwrap();
        assert_eq!(feed.times.len(), 4);
        assert_eq!(feed.red[0].team_key, "frc254");
        assert_eq!(feed.red[0].at(2), None);
        assert_eq!(feed.blue[0].at(1), Some(FieldPoint::new(11.0, 5.5)));
        assert_eq!(feed.blue[0].at(99), None);
    }

    #[test]
    fn test_closest_time_index() {
        let feed = MotionWorksFeed::from_json(PAYLOAD).unwrap();
        assert_eq!(feed.closest_time_index(-1.0), 0);
        assert_eq!(feed.closest_time_index(0.1), 1);
        assert_eq!(feed.closest_time_index(0.15), 2);
        assert_eq!(feed.closest_time_index(50.0), 3);
    }

    #[test]
    fn test_positions_skip_gaps_and_convert_units() {
        let feed = MotionWorksFeed::from_json(PAYLOAD).unwrap();
        let at = feed.positions_at(0.2);
        assert_eq!(at.len(), 1);
        assert_eq!(at[0].alliance, Alliance::Blue);
        assert_eq!(at[0].team_key, "frc1678");
        assert_relative_eq!(at[0].position.x, 144.0);
        assert_relative_eq!(at[0].position.y, 72.0);

        assert_eq!(feed.positions_at(0.0).len(), 2);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(
            MotionWorksFeed::from_json("{}"),
            Err(FeedError::Decode(_))
        ));
        assert!(matches!(
            MotionWorksFeed::from_json(r#"{"times": [], "alliances": {"red": [], "blue": []}}"#),
            Err(FeedError::Empty)
        ));
        let uneven = r#"{"times": [0.0], "alliances": {"red": [{"team_key": "frc1", "xs": [1.0], "ys": []}], "blue": []}}"#;
        assert!(matches!(
            MotionWorksFeed::from_json(uneven),
            Err(FeedError::LengthMismatch { xs: 1, ys: 0, .. })
        ));
    }

    #[test]
    fn test_match_url_levels() {
        assert!(match_url(2020, "wasno", "Semifinal", "2")
            .unwrap()
            .ends_with("2020wasno_sf2"));
        assert!(matches!(
            match_url(2020, "wasno", "Practice", "1"),
            Err(FeedError::UnsupportedMatchType(_))
        ));
    }
}
