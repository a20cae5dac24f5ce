//! Tolerant tracelog parser.
//!
//! Turns the raw text log into a [`ParsedLog`]: the pose samples, the match
//! metadata and a per-line classification used for highlighting.
//!
//! Lines without the `_Info` marker are ordinary console output. Marker
//! lines that fail to decode are classified as [`LineClass::Malformed`] and
//! skipped. A `RobotPose` whose packed pose string lacks a key aborts the
//! load, as does a log that ends up structurally incomplete.
//!
//! # Example
//! ```
//! use drishti_log::parser::parse_lines;
//!
//! let log = parse_lines([
//!     "robot boot",
//!     r#"S_Info: <Event name="StateInfo" time="0.5" xPos="0" yPos="0" heading="0" xTarget="1" yTarget="1" headingTarget="0" state="DRIVE"/>"#,
//!     r#"M_Info: <Info name="MatchInfo" date="2020-03-07" type="Qualification" number="12"/>"#,
//!     r#"A_Info: <Info name="AutoChoices" alliance="red"/>"#,
//! ])?;
//! assert_eq!(log.samples.len(), 1);
//! assert_eq!(log.match_info.match_number, "12");
//! # Ok::<(), drishti_log::parser::ParseError>(())
//! ```

mod error;
mod record;
pub mod scanner;

pub use error::{ParseError, RecordError, Result};
pub use record::{Record, RecordNode, RECORD_MARKER};

use std::path::Path;

use crate::core::{AutoChoices, LineClass, MatchInfo, Pose, Sample, INITIAL_STATE};

/// Result of parsing one log file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    /// Match identification (last one in the file)
    pub match_info: MatchInfo,
    /// Autonomous selections (last one in the file)
    pub auto_choices: AutoChoices,
    /// Samples in file order
    pub samples: Vec<Sample>,
    /// Raw lines, newline stripped
    pub lines: Vec<String>,
    /// Classification of each raw line
    pub classes: Vec<LineClass>,
}

impl ParsedLog {
    /// Free-text alliance of the recording robot.
    pub fn alliance(&self) -> &str {
        &self.auto_choices.alliance
    }

    /// Time of the last sample. Used as the playback limit.
    pub fn last_time(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.time)
    }

    /// Index of the sample recorded on `line`, if any.
    pub fn sample_at_line(&self, line: usize) -> Option<usize> {
        self.samples
            .iter()
            .position(|s| s.source_line_index == line)
    }
}

/// State carried from one line to the next.
#[derive(Debug, Clone)]
struct Accumulator {
    last_state: String,
    last_target: Option<Pose>,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self {
            last_state: INITIAL_STATE.to_string(),
            last_target: None,
        }
    }
}

/// Parser working set for one pass.
#[derive(Default)]
struct Fold {
    acc: Accumulator,
    samples: Vec<Sample>,
    match_info: Option<MatchInfo>,
    auto_choices: Option<AutoChoices>,
}

impl Fold {
    fn push_sample(&mut self, time: f64, actual_pose: Pose, line: usize) {
        if let Some(prev) = self.samples.last() {
            if time < prev.time {
                log::warn!(
                    "line {}: time {:.3} goes back from {:.3}, keeping file order",
                    line,
                    time,
                    prev.time
                );
            }
        }
        self.samples.push(Sample {
            time,
            actual_pose,
            target_pose: self.acc.last_target,
            state_name: self.acc.last_state.clone(),
            source_line_index: line,
        });
    }

    fn apply(&mut self, record: Record, line: usize) -> LineClass {
        match record {
            Record::StateInfo {
                time,
                state,
                target,
                actual,
            } => {
                self.acc.last_state = state;
                self.acc.last_target = Some(target);
                self.push_sample(time, actual, line);
                LineClass::Pose
            }
            Record::RobotPose { time, pose } => {
                self.push_sample(time, pose, line);
                LineClass::Pose
            }
            Record::MatchInfo(info) => {
                if self.match_info.replace(info).is_some() {
                    log::warn!("line {}: repeated MatchInfo, keeping the later one", line);
                }
                LineClass::Meta
            }
            Record::AutoChoices(choices) => {
                if self.auto_choices.replace(choices).is_some() {
                    log::warn!("line {}: repeated AutoChoices, keeping the later one", line);
                }
                LineClass::Meta
            }
        }
    }
}

/// Parse a sequence of log lines. Trailing `\n`/`\r\n` is stripped.
pub fn parse_lines<I, S>(lines: I) -> Result<ParsedLog>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fold = Fold::default();
    let mut raw = Vec::new();
    let mut classes = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();
        let line = line
            .strip_suffix('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .unwrap_or(line);

        let class = if !line.contains(RECORD_MARKER) {
            LineClass::Plain
        } else {
            match Record::from_line(line) {
                Ok(record) => fold.apply(record, index),
                Err(RecordError::Scan(e)) => {
                    log::error!("line {}: unreadable pose string", index);
                    return Err(e);
                }
                Err(e) => {
                    log::debug!("line {}: malformed record: {}", index, e);
                    LineClass::Malformed
                }
            }
        };
        raw.push(line.to_string());
        classes.push(class);
    }

    if fold.samples.is_empty() {
        return Err(ParseError::NoPositionInfo);
    }
    let match_info = fold.match_info.ok_or(ParseError::NoMatchInfo)?;
    let auto_choices = fold.auto_choices.ok_or(ParseError::NoAutoChoices)?;

    let malformed = classes
        .iter()
        .filter(|c| **c == LineClass::Malformed)
        .count();
    log::info!(
        "Parsed {} lines: {} samples, {} malformed records",
        raw.len(),
        fold.samples.len(),
        malformed
    );

    Ok(ParsedLog {
        match_info,
        auto_choices,
        samples: fold.samples,
        lines: raw,
        classes,
    })
}

/// Parse a whole log held in memory.
pub fn parse_str(text: &str) -> Result<ParsedLog> {
    parse_lines(text.lines())
}

/// Parse raw file bytes. Anything that is not UTF-8 text is rejected.
pub fn parse_bytes(bytes: &[u8]) -> Result<ParsedLog> {
    let text = std::str::from_utf8(bytes).map_err(|_| ParseError::NotText)?;
    parse_str(text)
}

/// Read and parse a log file.
pub fn load_log(path: &Path) -> Result<ParsedLog> {
    let bytes = std::fs::read(path)?;
    log::info!("Loading log {}", path.display());
    parse_bytes(&bytes)
}
