//! Daily time windows over a channel's lifetime.

use crate::types::Timestamp;
use chrono::{DateTime, Utc};

/// Width of one export window in seconds
pub const DAY_SECS: f64 = 86400.0;

/// Half-open range `[start, end)` of epoch seconds bounding one history query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    /// Window start, inclusive
    pub start: f64,
    /// Window end, exclusive
    pub end: f64,
}

impl TimeWindow {
    /// Window of one day beginning at `start`
    pub fn day_from(start: f64) -> Self {
        Self {
            start,
            end: start + DAY_SECS,
        }
    }

    /// Lower bound for the history query
    pub fn oldest(&self) -> Timestamp {
        Timestamp::from_epoch(self.start)
    }

    /// Upper bound for the history query
    pub fn latest(&self) -> Timestamp {
        Timestamp::from_epoch(self.end)
    }

    /// UTC calendar date of the window start, `YYYY-MM-DD`
    ///
    /// Used as the artifact name for the window's batch.
    pub fn day_label(&self) -> String {
        let secs = self.start.floor() as i64;
        let nanos = ((self.start - self.start.floor()) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
            .map(|start| start.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "1970-01-01".to_string())
    }
}

/// Sequential one-day windows from channel creation until `now`
///
/// Yields a window for every start strictly before `now`; the last window may
/// extend past `now`.
#[derive(Debug, Clone)]
pub struct DayWindows {
    next_start: f64,
    now: f64,
}

impl DayWindows {
    /// Windows covering `[created, now)`
    pub fn new(created: f64, now: f64) -> Self {
        Self {
            next_start: created,
            now,
        }
    }
}

impl Iterator for DayWindows {
    type Item = TimeWindow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_start < self.now {
            let window = TimeWindow::day_from(self.next_start);
            self.next_start = window.end;
            Some(window)
        } else {
            None
        }
    }
}
