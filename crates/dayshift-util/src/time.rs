//! Time utilities for dayshift
//!
//! The simulation runs on caller-supplied `dt` values in seconds. The runner
//! measures those deltas with [`MonotonicInstant`], which is immune to
//! wall-clock changes. Wall-clock time is only used to timestamp events.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Get the current local time (event timestamps only)
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Represents a point in monotonic time for measuring frame deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonotonicInstant(Instant);

impl MonotonicInstant {
    pub fn now() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }

    /// Duration since `earlier`, or zero if `earlier` is actually later
    pub fn duration_since(&self, earlier: MonotonicInstant) -> Duration {
        self.0.saturating_duration_since(earlier.0)
    }
}

/// Format a countdown for the timer display as `m:ss`.
///
/// Negative values render as `0:00`; partial seconds are floored.
pub fn format_countdown(seconds: f64) -> String {
    let t = seconds.max(0.0);
    let minutes = (t / 60.0).floor() as u64;
    let secs = (t % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, secs)
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Linear interpolation with `t` clamped to `[0, 1]`
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    from + (to - from) * t
}
