//! Per-run state captured once at startup.

use chrono::{DateTime, Local, TimeZone};

/// Prefix of every run directory
pub const RUN_DIR_PREFIX: &str = "slack_export_";

/// Local-time format of the run directory suffix
pub const RUN_DIR_FORMAT: &str = "%m-%d-%Y_%H%M%S";

/// Run timestamp and the "now" every channel's windows stop at
#[derive(Debug, Clone)]
pub struct RunContext {
    started_at: DateTime<Local>,
    now: f64,
}

impl RunContext {
    /// Capture the current time
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Context for a fixed start time
    pub fn at<Tz: TimeZone>(started_at: DateTime<Tz>) -> Self {
        let started_at = started_at.with_timezone(&Local);
        let now = started_at.timestamp() as f64
            + f64::from(started_at.timestamp_subsec_micros()) / 1_000_000.0;
        Self { started_at, now }
    }

    /// Override the end of the export range
    pub fn with_now(mut self, now: f64) -> Self {
        self.now = now;
        self
    }

    /// When the run started
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// End of the export range in epoch seconds
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Name of the directory this run writes into
    pub fn run_dir_name(&self) -> String {
        format!("{}{}", RUN_DIR_PREFIX, self.started_at.format(RUN_DIR_FORMAT))
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
