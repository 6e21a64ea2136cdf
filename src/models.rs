//! Core data types for the Sen.Environment builder.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Host operating system class, as far as build recipes care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformKind {
    Windows,
    Other,
}

impl PlatformKind {
    /// Platform the binary was compiled for.
    pub fn host() -> Self {
        if cfg!(windows) {
            PlatformKind::Windows
        } else {
            PlatformKind::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformKind::Windows => "Windows",
            PlatformKind::Other => "Other",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with a child process that exits unsuccessfully.
///
/// `Ignore` keeps the fire-and-forget behavior: only in-process signals
/// (unsupported platform, missing directory) abort a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitStatusPolicy {
    #[default]
    Ignore,
    Strict,
}

/// Terminal outcome of one orchestration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Done,
    Aborted,
}

/// Summary of a finished run, persisted as `last-run.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub outcome: RunOutcome,

    /// Local wall-clock time the run started
    pub started_at: DateTime<Local>,

    /// Sub-projects whose strategy completed, in build order
    pub built: Vec<String>,

    /// Elapsed time in milliseconds
    pub duration_ms: u64,

    /// Elapsed time as printed to the operator
    pub duration: String,

    /// Error message if the run aborted
    pub error: Option<String>,
}

impl RunReport {
    pub fn new(
        outcome: RunOutcome,
        started_at: DateTime<Local>,
        built: Vec<String>,
        elapsed: Duration,
        error: Option<String>,
    ) -> Self {
        RunReport {
            outcome,
            started_at,
            built,
            duration_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            duration: format_duration(elapsed),
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Done
    }
}

/// Format a duration as `H:MM:SS.ffffff`.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let micros = duration.subsec_micros();
    format!("{}:{:02}:{:02}.{:06}", hours, minutes, seconds, micros)
}
