//! Page transition state machine
//!
//! Settled or Animating(direction). Every accepted page change starts (or
//! restarts) the animation window; the last change always wins so that
//! rotation ticks never stall behind an in-flight animation.

use super::timer::Deadline;
use std::time::{Duration, Instant};

/// Default animation window after a page change
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(500);

/// Which way the page moved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward a higher page index
    Up,
    /// Toward a lower page index
    Down,
}

impl Direction {
    /// Direction of a move from `from` to `to`, None when the page is unchanged
    pub fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Some(Self::Up),
            std::cmp::Ordering::Less => Some(Self::Down),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStateMachine {
    duration: Duration,
    direction: Option<Direction>,
    clear: Deadline,
}

impl TransitionStateMachine {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            direction: None,
            clear: Deadline::idle(),
        }
    }

    /// Record a page change from `from` to `to`
    ///
    /// No-op when the page is unchanged. Otherwise enters Animating
    /// immediately, replacing any direction already in flight and
    /// restarting the clear timer.
    pub fn begin(&mut self, from: usize, to: usize, now: Instant) -> bool {
        let Some(direction) = Direction::between(from, to) else {
            return false;
        };
        self.direction = Some(direction);
        self.clear.arm(now, self.duration);
        true
    }

    /// Settle if the animation window has elapsed
    ///
    /// Returns true when this call settled the machine. Safe to call on an
    /// already settled machine.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.clear.fire_if_due(now) {
            self.direction = None;
            true
        } else {
            false
        }
    }

    pub fn is_animating(&self) -> bool {
        self.direction.is_some()
    }

    /// Direction of the running animation; None while settled
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Fraction of the animation window elapsed at `now` (0.0..=1.0)
    pub fn progress(&self, now: Instant) -> Option<f32> {
        self.direction?;
        let due = self.clear.due_at()?;
        let remaining = due.saturating_duration_since(now);
        if self.duration.is_zero() {
            return Some(1.0);
        }
        Some(1.0 - (remaining.as_secs_f32() / self.duration.as_secs_f32()).min(1.0))
    }

    /// Cancel the clear timer and settle immediately
    pub fn cancel(&mut self) {
        self.clear.cancel();
        self.direction = None;
    }
}

impl Default for TransitionStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSITION)
    }
}
