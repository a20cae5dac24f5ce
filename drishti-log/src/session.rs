//! Replay session: the loaded log, the playback clock and the step cursor.
//!
//! A session starts empty. [`ReplaySession::load_lines`] and
//! [`ReplaySession::load_file`] parse a log and swap it in as a unit; a
//! failed load leaves the previous log, clock and cursor exactly as they
//! were.

use std::path::Path;

use thiserror::Error;

use crate::config::{ConfigError, FieldConfig};
use crate::core::Sample;
use crate::feed::MotionWorksFeed;
use crate::geometry::{Alliance, AllianceFrame};
use crate::parser::{self, ParseError, ParsedLog};
use crate::playback::{Stopwatch, SystemClock, TimeSource};

/// Clock limit before any log is loaded, in seconds.
pub const DEFAULT_MAX_TIME: f64 = 30.0;

/// Session load failure.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Something went wrong parsing the file: {0}. Make sure the file is a valid autonomous log.")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// A parsed log together with the frame its alliance records in.
#[derive(Debug, Clone)]
pub struct LoadedLog {
    pub log: ParsedLog,
    pub alliance: Alliance,
    pub frame: AllianceFrame,
}

/// Index of the sample shown at playback time `elapsed`.
///
/// The sample just before the first one recorded after `elapsed`; the
/// first sample when playback has not reached it yet; the last sample
/// once everything has been played.
///
/// # Example
/// ```
/// use drishti_log::core::{Pose, Sample};
/// use drishti_log::session::current_sample_index;
///
/// let at = |time| Sample {
///     time,
///     actual_pose: Pose::default(),
///     target_pose: None,
///     state_name: "NONE".into(),
///     source_line_index: 0,
/// };
/// let samples = vec![at(0.5), at(1.0), at(2.0)];
/// assert_eq!(current_sample_index(&samples, 0.0), 0);
/// assert_eq!(current_sample_index(&samples, 1.5), 1);
/// assert_eq!(current_sample_index(&samples, 9.0), 2);
/// ```
pub fn current_sample_index(samples: &[Sample], elapsed: f64) -> usize {
    match samples.iter().position(|s| s.time > elapsed) {
        Some(i) => i.saturating_sub(1),
        None => samples.len().saturating_sub(1),
    }
}

/// Replay state driven by the viewer.
#[derive(Debug)]
pub struct ReplaySession<T: TimeSource = SystemClock> {
    loaded: Option<LoadedLog>,
    step: usize,
    clock: Stopwatch<T>,
    feed: Option<MotionWorksFeed>,
}

impl ReplaySession<SystemClock> {
    /// Empty session on the wall clock, paused at zero.
    pub fn new() -> Self {
        Self::with_source(SystemClock::new())
    }
}

impl Default for ReplaySession<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> ReplaySession<T> {
    /// Empty session reading time from `source`, paused at zero.
    pub fn with_source(source: T) -> Self {
        Self {
            loaded: None,
            step: 0,
            clock: Stopwatch::with_source(source, Some(DEFAULT_MAX_TIME), true),
            feed: None,
        }
    }

    /// Parse `lines` and replace the current log.
    pub fn load_lines<I, S>(&mut self, lines: I, config: &FieldConfig) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let log = parser::parse_lines(lines)?;
        self.install(log, config)
    }

    /// Read and parse a log file, replacing the current log.
    pub fn load_file(&mut self, path: &Path, config: &FieldConfig) -> Result<()> {
        let log = parser::load_log(path)?;
        self.install(log, config)
    }

    /// Swap in an already parsed log.
    pub fn install(&mut self, log: ParsedLog, config: &FieldConfig) -> Result<()> {
        let alliance = Alliance::resolve(log.alliance())?;
        let frame = config.frame(alliance);

        self.clock.set_max_time(Some(log.last_time()));
        self.clock.stop();
        self.step = 0;
        self.feed = None;
        log::info!(
            "Session loaded {} {}: {} samples, {:?} alliance",
            log.match_info.match_type,
            log.match_info.match_number,
            log.samples.len(),
            alliance
        );
        self.loaded = Some(LoadedLog {
            log,
            alliance,
            frame,
        });
        Ok(())
    }

    pub fn loaded(&self) -> Option<&LoadedLog> {
        self.loaded.as_ref()
    }

    pub fn log(&self) -> Option<&ParsedLog> {
        self.loaded.as_ref().map(|l| &l.log)
    }

    fn samples(&self) -> &[Sample] {
        match self.log() {
            Some(log) => &log.samples,
            None => &[],
        }
    }

    /// Window title for the loaded match, `"{type} {number}"`.
    pub fn title(&self) -> Option<String> {
        self.log().map(|log| {
            format!(
                "{} {}",
                log.match_info.match_type, log.match_info.match_number
            )
        })
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Sample under the cursor.
    pub fn current_sample(&self) -> Option<&Sample> {
        self.samples().get(self.step)
    }

    /// Raw log line of the sample under the cursor.
    pub fn current_line(&self) -> Option<usize> {
        self.current_sample().map(|s| s.source_line_index)
    }

    /// Move the cursor to the sample for the current clock time.
    pub fn update_step(&mut self) -> usize {
        let elapsed = self.clock.get_time();
        self.step = current_sample_index(self.samples(), elapsed);
        self.step
    }

    /// Advance one sample (stays on the last one) and seek the clock to it.
    pub fn next_step(&mut self) {
        let count = self.samples().len();
        if count == 0 {
            return;
        }
        if self.step + 1 < count {
            self.step += 1;
        }
        self.seek_to_step();
    }

    /// Go back one sample. On the first sample, rewind the clock to zero.
    pub fn prev_step(&mut self) {
        if self.samples().is_empty() {
            return;
        }
        if self.step == 0 {
            self.clock.reset();
            self.update_step();
        } else {
            self.step -= 1;
            self.seek_to_step();
        }
    }

    /// Jump to sample `n`, clamped to the last sample.
    pub fn set_step(&mut self, n: usize) {
        let count = self.samples().len();
        if count == 0 {
            return;
        }
        self.step = n.min(count - 1);
        self.seek_to_step();
    }

    /// Jump to the sample recorded at `line`, or at the nearest sample
    /// line above it. Lines above every sample select the first sample.
    pub fn set_step_from_line(&mut self, line: usize) {
        let Some(log) = self.log() else {
            return;
        };
        let target = (1..=line)
            .rev()
            .find_map(|l| log.sample_at_line(l))
            .unwrap_or(0);
        self.set_step(target);
    }

    fn seek_to_step(&mut self) {
        if let Some(time) = self.current_sample().map(|s| s.time) {
            self.clock.seek(time);
        }
    }

    /// Attach a position feed. Dropped again on the next load.
    pub fn attach_feed(&mut self, feed: MotionWorksFeed) {
        self.feed = Some(feed);
    }

    pub fn feed(&self) -> Option<&MotionWorksFeed> {
        self.feed.as_ref()
    }

    pub fn clock(&self) -> &Stopwatch<T> {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Stopwatch<T> {
        &mut self.clock
    }
}
