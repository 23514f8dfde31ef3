//! Scheduled-task handles for the paging engine
//!
//! Timers here are plain deadlines owned by the component that armed them.
//! Nothing runs in the background: the UI loop calls `poll(now)` on each tick
//! and the owner asks its deadlines whether they are due. Cancelling a
//! deadline is just clearing it, so a torn-down timer can never call back.

use std::time::{Duration, Instant};

/// One-shot deadline
///
/// Armed with a delay, fires at most once, and is cleared when it fires or
/// when cancelled. Re-arming replaces the previous deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    /// A deadline that is not armed
    pub fn idle() -> Self {
        Self { due: None }
    }

    /// Arm (or re-arm) the deadline `after` from `now`
    pub fn arm(&mut self, now: Instant, after: Duration) {
        self.due = Some(now + after);
    }

    /// Drop the deadline without firing it
    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// When the deadline is due, if armed
    pub fn due_at(&self) -> Option<Instant> {
        self.due
    }

    /// Fire the deadline if it is due at `now`
    ///
    /// Returns true exactly once per arming. Calling this on an idle
    /// deadline is a no-op.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Repeating deadline with a fixed period
///
/// After firing it re-arms itself one period after the moment it was
/// polled, so a late poll produces a single tick rather than a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repeating {
    period: Duration,
    next: Deadline,
}

impl Repeating {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Deadline::idle(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking, first tick one period after `now`
    pub fn start(&mut self, now: Instant) {
        self.next.arm(now, self.period);
    }

    pub fn stop(&mut self) {
        self.next.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.next.is_armed()
    }

    /// Returns true when a tick is due, and schedules the following one
    pub fn tick_if_due(&mut self, now: Instant) -> bool {
        if self.next.fire_if_due(now) {
            self.next.arm(now, self.period);
            true
        } else {
            false
        }
    }
}
