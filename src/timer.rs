use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;

use crate::run::{Run, RunState};

/// Source of wall-clock milliseconds, read once per action
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock for tests; clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn set(&self, millis: i64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// Paused millis including a pause still in progress.
pub fn paused_total(run: &Run, now: i64) -> i64 {
    let current = run.paused_at.map_or(0, |at| (now - at).max(0));
    run.paused_time + current
}

/// Millis on the run clock at `now`.
///
/// Zero before the first split press; frozen at the last timed split once
/// the run has ended.
pub fn elapsed(run: &Run, now: i64) -> i64 {
    let Some(rundate) = run.rundate else {
        return 0;
    };

    if run.state == RunState::Ended {
        return run.splits.last_time().unwrap_or(0);
    }

    (now - rundate - paused_total(run, now)).max(0)
}

/// `h:mm:ss.d` once past an hour, `m:ss.d` below.
pub fn format_millis(millis: i64) -> String {
    let sign = if millis < 0 { "-" } else { "" };
    let millis = millis.unsigned_abs();
    let tenths = (millis % 1_000) / 100;
    let secs = (millis / 1_000) % 60;
    let mins = (millis / 60_000) % 60;
    let hours = millis / 3_600_000;

    if hours > 0 {
        format!("{sign}{hours}:{mins:02}:{secs:02}.{tenths}")
    } else {
        format!("{sign}{mins}:{secs:02}.{tenths}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splits::Split;

    #[test]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new(1_000);
        let other = clock.clone();
        clock.advance(500);
        assert_eq!(other.now_millis(), 1_500);
        other.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    #[test]
    fn test_system_clock_is_epoch_millis() {
        assert!(SystemClock.now_millis() > 1_600_000_000_000);
    }

    #[test]
    fn test_elapsed_not_started() {
        let run = Run::with_waypoints("xyz", vec![1, 2]);
        assert_eq!(elapsed(&run, 50_000), 0);
    }

    #[test]
    fn test_elapsed_excludes_pauses() {
        let mut run = Run::with_waypoints("xyz", vec![1, 2]);
        run.state = RunState::Running;
        run.rundate = Some(1_000);
        run.paused_time = 2_000;
        assert_eq!(elapsed(&run, 10_000), 7_000);

        run.state = RunState::Paused;
        run.paused_at = Some(9_000);
        assert_eq!(paused_total(&run, 10_000), 3_000);
        assert_eq!(elapsed(&run, 10_000), 6_000);
        assert_eq!(elapsed(&run, 20_000), 6_000);
    }

    #[test]
    fn test_elapsed_frozen_when_ended() {
        let mut run = Run::with_waypoints("xyz", vec![1, 2]);
        run.rundate = Some(0);
        run.splits.append(Split::Time(1_000));
        run.splits.append(Split::Time(2_500));
        run.state = RunState::Ended;
        assert_eq!(elapsed(&run, 99_000), 2_500);
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(0), "0:00.0");
        assert_eq!(format_millis(61_250), "1:01.2");
        assert_eq!(format_millis(3_725_900), "1:02:05.9");
        assert_eq!(format_millis(-1_500), "-0:01.5");
    }
}
