//! Deterministic interval timers owned by the session monitor.
//!
//! Timers are plain data: the host drives them by handing the monitor the
//! current time. Clearing the set is the only way to release them.

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Periodic comparison of idle time against the thresholds.
    InactivityCheck,
    /// One-second decrement of the visible warning countdown.
    WarningCountdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub next_due: DateTime<Utc>,
    pub period: Duration,
}

#[derive(Debug, Default)]
pub struct TimerSet {
    timers: Vec<ArmedTimer>,
    next_id: u64,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer whose first firing is one `period` after `now`.
    pub fn arm_interval(&mut self, kind: TimerKind, now: DateTime<Utc>, period: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(ArmedTimer {
            id,
            kind,
            next_due: now + period,
            period,
        });
        id
    }

    /// Cancel every timer; returns how many were armed.
    pub fn clear(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn count(&self, kind: TimerKind) -> usize {
        self.timers.iter().filter(|t| t.kind == kind).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArmedTimer> {
        self.timers.iter()
    }

    /// Earliest timer due at or before `until`. Ties go to the timer armed
    /// first.
    pub fn next_due(&self, until: DateTime<Utc>) -> Option<&ArmedTimer> {
        self.timers
            .iter()
            .filter(|t| t.next_due <= until)
            .min_by_key(|t| (t.next_due, t.id))
    }

    /// Move a fired timer to its next period. Unknown ids are ignored.
    pub fn reschedule(&mut self, id: TimerId) {
        if let Some(timer) = self.timers.iter_mut().find(|t| t.id == id) {
            timer.next_due += timer.period;
        }
    }
}
