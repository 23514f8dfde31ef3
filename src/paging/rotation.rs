//! Auto-rotation scheduler
//!
//! Idle (no timer) or Running (timer armed). The scheduler only decides
//! *when* to move and *where* to; the controller applies the move through
//! its normal page-change path.

use super::timer::Repeating;
use std::time::{Duration, Instant};

/// Rotation settings, fixed for the lifetime of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationConfig {
    pub enabled: bool,
    pub interval: Duration,
}

impl RotationConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_secs(15),
        }
    }

    pub fn every(interval: Duration) -> Self {
        Self {
            enabled: true,
            interval,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    Idle,
    Running,
}

/// Page after `current`, wrapping to 1 after the last page
pub fn next_page(current: usize, total_pages: usize) -> usize {
    if current < total_pages {
        current + 1
    } else {
        1
    }
}

#[derive(Debug, Clone)]
pub struct RotationScheduler {
    config: RotationConfig,
    timer: Repeating,
    /// Page count the running timer was armed for
    armed_for: Option<usize>,
}

impl RotationScheduler {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            timer: Repeating::new(config.interval),
            armed_for: None,
        }
    }

    pub fn config(&self) -> RotationConfig {
        self.config
    }

    pub fn state(&self) -> RotationState {
        if self.timer.is_running() {
            RotationState::Running
        } else {
            RotationState::Idle
        }
    }

    /// Reconcile the timer with the current data
    ///
    /// Runs only when rotation is enabled, the data is ready and there is
    /// more than one page. A change in page count tears the timer down and
    /// re-arms it from `now`.
    pub fn sync(&mut self, total_pages: usize, data_ready: bool, now: Instant) -> RotationState {
        let should_run = self.config.enabled && data_ready && total_pages > 1;

        if !should_run {
            if self.armed_for.take().is_some() {
                tracing::trace!("rotation idle");
            }
            self.timer.stop();
            return RotationState::Idle;
        }

        if self.armed_for != Some(total_pages) {
            tracing::trace!(total_pages, "rotation armed");
            self.timer.start(now);
            self.armed_for = Some(total_pages);
        }
        RotationState::Running
    }

    /// Next page to request if a tick is due at `now`
    ///
    /// Never fires while Idle, so calling this after `dispose` or on a
    /// single page is always None.
    pub fn tick(&mut self, current_page: usize, now: Instant) -> Option<usize> {
        let total = self.armed_for?;
        if total <= 1 || !self.timer.tick_if_due(now) {
            return None;
        }
        Some(next_page(current_page, total))
    }

    /// Stop the timer for good until the next `sync`
    pub fn dispose(&mut self) {
        self.timer.stop();
        self.armed_for = None;
    }
}
