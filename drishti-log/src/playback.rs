//! Playback clock for scrubbing through a replay.
//!
//! [`Stopwatch`] is a pausable, seekable clock clamped to an optional
//! maximum. It reads "now" from a [`TimeSource`], so tests and scripted
//! replays can drive it with a [`ManualClock`] instead of wall time.
//!
//! # Example
//! ```
//! use drishti_log::playback::{ManualClock, Stopwatch};
//!
//! let clock = ManualClock::new();
//! let mut watch = Stopwatch::with_source(clock.clone(), Some(15.0), false);
//!
//! clock.advance(5.0);
//! watch.pause();
//! clock.advance(100.0);
//! assert_eq!(watch.get_time(), 5.0);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic source of "now", in seconds since an arbitrary epoch.
pub trait TimeSource {
    /// Seconds elapsed since this source's epoch.
    fn now(&self) -> f64;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `secs`. Negative values are ignored.
    pub fn advance(&self, secs: f64) {
        if secs > 0.0 {
            self.now.set(self.now.get() + Duration::from_secs_f64(secs));
        }
    }

    /// Set the absolute time. Negative values clamp to zero.
    pub fn set(&self, secs: f64) {
        self.now.set(Duration::from_secs_f64(secs.max(0.0)));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now.get().as_secs_f64()
    }
}

/// Pausable playback clock with an optional upper limit.
///
/// While running, elapsed time is `now - start`. Running past the limit
/// pauses the clock at the limit. While paused, time is frozen at the last
/// observed value.
#[derive(Debug, Clone)]
pub struct Stopwatch<T: TimeSource = SystemClock> {
    source: T,
    start: f64,
    last: f64,
    paused: bool,
    max_time: Option<f64>,
}

impl Stopwatch<SystemClock> {
    /// Create a wall-clock stopwatch.
    pub fn new(max_time: Option<f64>, start_paused: bool) -> Self {
        Self::with_source(SystemClock::new(), max_time, start_paused)
    }
}

impl<T: TimeSource> Stopwatch<T> {
    /// Create a stopwatch reading time from `source`.
    pub fn with_source(source: T, max_time: Option<f64>, start_paused: bool) -> Self {
        let start = source.now();
        Self {
            source,
            start,
            last: 0.0,
            paused: start_paused,
            max_time,
        }
    }

    /// Current playback time in seconds.
    ///
    /// Takes `&mut self` because reading past the limit while running
    /// pauses the clock.
    pub fn get_time(&mut self) -> f64 {
        if self.paused {
            return match self.max_time {
                Some(max) => self.last.min(max),
                None => self.last,
            };
        }
        let elapsed = self.source.now() - self.start;
        match self.max_time {
            Some(max) if elapsed > max => {
                self.paused = true;
                self.last = max;
                max
            }
            _ => elapsed,
        }
    }

    /// Jump to `t` seconds, keeping the paused/running state.
    pub fn seek(&mut self, t: f64) {
        self.last = t;
        self.start = self.source.now() - t;
    }

    /// Jump back to zero.
    pub fn reset(&mut self) {
        self.seek(0.0);
    }

    /// Jump to the limit and pause there. No-op without a limit.
    pub fn jump_to_max(&mut self) {
        if let Some(max) = self.max_time {
            self.seek(max);
            self.paused = true;
        }
    }

    /// Freeze time at its current value.
    pub fn pause(&mut self) {
        if !self.paused {
            self.last = self.get_time();
            self.paused = true;
        }
    }

    /// Resume from the frozen value.
    pub fn start(&mut self) {
        if self.paused {
            self.start = self.source.now() - self.last;
            self.paused = false;
        }
    }

    /// Pause and rewind to zero.
    pub fn stop(&mut self) {
        self.pause();
        self.reset();
    }

    /// Toggle between paused and running.
    pub fn toggle(&mut self) {
        if self.paused {
            self.start();
        } else {
            self.pause();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn max_time(&self) -> Option<f64> {
        self.max_time
    }

    pub fn set_max_time(&mut self, max_time: Option<f64>) {
        self.max_time = max_time;
    }

    /// The underlying time source.
    pub fn source(&self) -> &T {
        &self.source
    }
}
