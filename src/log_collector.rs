//! Run logger: console output plus a per-run log file.
//!
//! # Architecture
//!
//! ```text
//! log::info!/warn!/...
//!     |
//! [RunLogger]
//!     |
//! +---+-----------+
//! |               |
//! v               v
//! console         logs/<timestamp>.log
//! (milestones on stdout, everything else on stderr)
//! ```
//!
//! Records with target `milestone` are the operator-facing lines and are printed
//! without decoration. The file receives every record, debug included, but only
//! once it has been opened: until then lines are held in memory, so a run that
//! stops at its precondition leaves nothing on disk.

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::system::MILESTONE_TARGET;

/// Ensure the logs directory exists
pub fn ensure_logs_dir_exists(log_dir: &Path) -> Result<(), String> {
    std::fs::create_dir_all(log_dir)
        .map_err(|e| format!("Failed to create logs directory: {}", e))?;
    Ok(())
}

/// A log line with metadata
#[derive(Clone, Debug)]
pub struct LogLine {
    pub message: String,
    pub level: Level,
    pub milestone: bool,
    /// Timestamp of when the log was created
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: Level, message: String) -> Self {
        LogLine {
            message,
            level,
            milestone: false,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    pub fn milestone(message: String) -> Self {
        LogLine {
            milestone: true,
            ..LogLine::new(Level::Info, message)
        }
    }

    /// Console form of the line.
    pub fn console(&self) -> String {
        if self.milestone {
            self.message.clone()
        } else {
            format!("[{}] {}", self.level, self.message)
        }
    }

    /// Log file form of the line.
    pub fn persisted(&self) -> String {
        format!("[{}] [{}] {}\n", self.timestamp, self.level, self.message)
    }
}

/// Per-run log file `<log_dir>/<timestamp>.log`.
///
/// Cloning yields another handle to the same file, so the binary can keep one
/// after the logger has been installed.
#[derive(Clone)]
pub struct LogFile {
    path: PathBuf,
    sink: Arc<Mutex<FileSink>>,
}

enum FileSink {
    /// Not opened yet; lines wait here
    Pending(Vec<String>),
    Open(File),
}

impl LogFile {
    pub fn new(log_dir: &Path) -> Self {
        let filename = format!("{}.log", Local::now().format("%Y%m%d_%H%M%S"));
        LogFile {
            path: log_dir.join(filename),
            sink: Arc::new(Mutex::new(FileSink::Pending(Vec::new()))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        matches!(self.sink.lock().as_deref(), Ok(FileSink::Open(_)))
    }

    /// Create the log directory and file, then write out every held line.
    pub fn open(&self) -> Result<(), String> {
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| "Log file lock poisoned".to_string())?;
        let pending = match &mut *sink {
            FileSink::Open(_) => return Ok(()),
            FileSink::Pending(lines) => std::mem::take(lines),
        };

        if let Some(dir) = self.path.parent() {
            ensure_logs_dir_exists(dir)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| format!("Failed to open log file {}: {}", self.path.display(), e))?;
        for line in &pending {
            file.write_all(line.as_bytes())
                .map_err(|e| format!("Failed to write log file: {}", e))?;
        }
        *sink = FileSink::Open(file);
        Ok(())
    }

    fn append(&self, line: &str) {
        if let Ok(mut sink) = self.sink.lock() {
            match &mut *sink {
                FileSink::Pending(lines) => lines.push(line.to_string()),
                FileSink::Open(file) => {
                    let _ = file.write_all(line.as_bytes());
                }
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            if let FileSink::Open(file) = &mut *sink {
                let _ = file.flush();
            }
        }
    }
}

/// Logger installed for the lifetime of the binary.
pub struct RunLogger {
    console_level: LevelFilter,
    file: Option<LogFile>,
}

impl RunLogger {
    /// Console-only logger.
    pub fn console(console_level: LevelFilter) -> Self {
        RunLogger {
            console_level,
            file: None,
        }
    }

    /// Console logger that also feeds a `LogFile` under `log_dir`.
    ///
    /// Nothing is created on disk until `LogFile::open` is called.
    pub fn with_file(log_dir: &Path, console_level: LevelFilter) -> Self {
        RunLogger {
            console_level,
            file: Some(LogFile::new(log_dir)),
        }
    }

    /// Handle to the file sink, if any.
    pub fn log_file(&self) -> Option<LogFile> {
        self.file.clone()
    }

    pub fn log_path(&self) -> Option<&Path> {
        self.file.as_ref().map(LogFile::path)
    }

    /// Register as the global logger for the `log` crate.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self)).map(|()| log::set_max_level(LevelFilter::Debug))
    }

    fn write_line(&self, line: &LogLine) {
        if line.milestone {
            println!("{}", line.console());
        } else if line.level <= self.console_level {
            eprintln!("{}", line.console());
        }

        if let Some(file) = &self.file {
            file.append(&line.persisted());
        }
    }
}

impl Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= LevelFilter::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        let line = if record.target() == MILESTONE_TARGET {
            LogLine::milestone(message)
        } else {
            LogLine::new(record.level(), message)
        };
        self.write_line(&line);
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}
