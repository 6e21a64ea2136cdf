//! Coarse wall-clock timer for operator feedback.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

/// Accumulating stopwatch.
///
/// `start` is idempotent. `end` adds the time since the first `start` to the
/// accumulated total and leaves the start point in place, so calling `end`
/// twice counts the first interval twice.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    started_at: Option<Instant>,
    started_wall: Option<DateTime<Local>>,
    accumulated: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Timer::default()
    }

    pub fn start(&mut self) {
        if self.started_at.is_some() {
            return;
        }
        self.started_at = Some(Instant::now());
        self.started_wall = Some(Local::now());
    }

    /// No-op on a timer that was never started.
    pub fn end(&mut self) {
        let Some(started_at) = self.started_at else {
            return;
        };
        let delta = started_at.elapsed();
        self.accumulated = Some(match self.accumulated {
            Some(total) => total + delta,
            None => delta,
        });
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Local time of the first `start`.
    pub fn started_wall(&self) -> Option<DateTime<Local>> {
        self.started_wall
    }

    pub fn duration(&self) -> Option<Duration> {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut timer = Timer::new();
        timer.start();
        let first = timer.started_at();
        std::thread::sleep(Duration::from_millis(2));
        timer.start();
        assert_eq!(timer.started_at(), first);
    }

    #[test]
    fn test_end_accumulates() {
        let mut timer = Timer::new();
        assert!(timer.duration().is_none());
        timer.start();
        std::thread::sleep(Duration::from_millis(5));
        timer.end();
        let d = timer.duration().unwrap();
        assert!(d >= Duration::from_millis(5));
    }

    #[test]
    fn test_second_end_double_counts() {
        let mut timer = Timer::new();
        timer.start();
        std::thread::sleep(Duration::from_millis(5));
        timer.end();
        let first = timer.duration().unwrap();
        timer.end();
        let second = timer.duration().unwrap();
        assert!(second >= first * 2);
    }

    #[test]
    fn test_end_without_start_is_noop() {
        let mut timer = Timer::new();
        timer.end();
        assert!(timer.duration().is_none());
        assert!(timer.started_wall().is_none());
    }
}
