use std::fmt;

use chrono::{DateTime, Utc};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Whole days/hours/minutes/seconds of a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Elapsed {
    /// Split the time between `start` and `now`.
    ///
    /// A `start` in the future yields all zeros.
    pub fn between(start: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let ms = (now - start).num_milliseconds();
        if ms < 0 {
            tracing::debug!(%start, %now, "start date is in the future; clamping elapsed to zero");
            return Self::default();
        }
        Self::from_millis(ms)
    }

    pub fn from_millis(ms: i64) -> Self {
        Self {
            days: ms / MS_PER_DAY,
            hours: (ms / MS_PER_HOUR) % 24,
            minutes: (ms / MS_PER_MINUTE) % 60,
            seconds: (ms / MS_PER_SECOND) % 60,
        }
    }

    /// Day headline shown large on a tracker card, e.g. `3d`.
    pub fn days_text(&self) -> String {
        format!("{}d", self.days)
    }

    /// Sub-day remainder, e.g. `4h 5m 6s`.
    pub fn clock_text(&self) -> String {
        format!("{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.days_text(), self.clock_text())
    }
}
