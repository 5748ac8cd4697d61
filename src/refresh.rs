// Auto-refresh timing and stale-response bookkeeping for the preview loop.

use std::time::{Duration, Instant};

/// The single auto-refresh timer.
///
/// `rearm` always replaces the previous deadline, so there is never more
/// than one pending tick no matter how often the settings change.
#[derive(Debug)]
pub struct RefreshTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl RefreshTimer {
    pub fn disarmed() -> Self {
        Self {
            interval: Duration::ZERO,
            deadline: None,
        }
    }

    pub fn rearm(&mut self, interval: Duration) {
        self.rearm_at(Instant::now(), interval);
    }

    pub fn rearm_at(&mut self, now: Instant, interval: Duration) {
        self.interval = interval;
        self.deadline = Some(now + interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once per elapsed interval; firing schedules the next tick
    /// relative to `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if armed. Used to schedule repaints.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Monotonic tags for preview fetches.
///
/// Responses race freely (nothing in flight is cancelled), so each request
/// carries the tag it was issued with and only the newest one is applied.
#[derive(Debug, Default)]
pub struct PreviewSequence {
    latest: u64,
}

impl PreviewSequence {
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC: Duration = Duration::from_secs(1);

    #[test]
    fn test_rearm_replaces_previous_deadline() {
        let base = Instant::now();
        let mut timer = RefreshTimer::disarmed();

        timer.rearm_at(base, 5 * SEC);
        timer.rearm_at(base, 60 * SEC);

        // The 5s deadline is gone; only the 60s one exists.
        assert!(!timer.fire(base + 10 * SEC));
        assert!(timer.fire(base + 61 * SEC));
    }

    #[test]
    fn test_toggle_off_then_on_leaves_one_timer() {
        let base = Instant::now();
        let mut timer = RefreshTimer::disarmed();

        timer.rearm_at(base, 5 * SEC);
        timer.disarm();
        assert!(!timer.is_armed());
        assert!(!timer.fire(base + 10 * SEC));

        timer.rearm_at(base + 10 * SEC, 5 * SEC);
        assert!(timer.is_armed());
        assert!(!timer.fire(base + 12 * SEC));
        assert!(timer.fire(base + 15 * SEC));
        // Exactly one tick per interval.
        assert!(!timer.fire(base + 15 * SEC));
    }

    #[test]
    fn test_fire_reschedules_from_now() {
        let base = Instant::now();
        let mut timer = RefreshTimer::disarmed();
        timer.rearm_at(base, 5 * SEC);

        assert!(timer.fire(base + 7 * SEC));
        assert!(!timer.fire(base + 11 * SEC));
        assert!(timer.fire(base + 12 * SEC));
    }

    #[test]
    fn test_disarmed_never_fires() {
        let mut timer = RefreshTimer::disarmed();
        assert!(!timer.is_armed());
        assert!(!timer.fire(Instant::now()));
        assert_eq!(timer.remaining(Instant::now()), None);
    }

    #[test]
    fn test_stale_sequence_is_discarded() {
        let mut seq = PreviewSequence::default();
        let first = seq.issue();
        let second = seq.issue();

        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));

        let third = seq.issue();
        assert!(!seq.is_latest(second));
        assert!(seq.is_latest(third));
    }
}
