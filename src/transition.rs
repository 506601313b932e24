//! Transition coordinator: serializes index changes against the animation
//! window and owns the autoplay timer.
//!
//! ## Protocol
//!
//! Every navigation request (`next`, `previous`, `go_to`, and autoplay ticks,
//! which are just `next`) goes through [`TransitionCoordinator::request`]:
//!
//! ```text
//! Idle ──request──▶ Transitioning{from,to} ──commit timer──▶ Idle
//!   │                    │                                  │
//!   │             further requests                 re-arm autoplay
//!   │              are dropped                    (unless paused)
//! ```
//!
//! 1. A request while transitioning is dropped, never queued.
//! 2. Otherwise the pending autoplay timer is cancelled and a commit timer is
//!    armed for the transition window.
//! 3. When the commit timer fires the target index becomes visible.
//! 4. The coordinator returns to idle and, if not paused, arms a fresh
//!    autoplay interval.
//!
//! Pausing cancels autoplay outright; resuming arms a full interval. There is
//! no remaining-time bookkeeping.

use crate::timer::{Scheduler, TimerId, TimerKind};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTiming {
    /// How long an index change animates before it is committed.
    pub transition: Duration,
    /// Idle time between automatic advances.
    pub autoplay_interval: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning { from: usize, to: usize },
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Started { from: usize, to: usize },
    Dropped,
}

#[derive(Debug)]
pub struct TransitionCoordinator {
    timing: TransitionTiming,
    phase: Phase,
    paused: bool,
    autoplay: Option<TimerId>,
    commit: Option<TimerId>,
}

impl TransitionCoordinator {
    pub fn new(timing: TransitionTiming) -> Self {
        Self {
            timing,
            phase: Phase::Idle,
            paused: false,
            autoplay: None,
            commit: None,
        }
    }

    pub fn timing(&self) -> TransitionTiming {
        self.timing
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn autoplay_armed(&self) -> bool {
        self.autoplay.is_some()
    }

    /// Arm the first autoplay interval. Called once when the carousel mounts.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if !self.paused && !self.is_transitioning() {
            self.arm_autoplay(scheduler);
        }
    }

    pub fn request(&mut self, scheduler: &mut Scheduler, from: usize, to: usize) -> Navigation {
        if self.is_transitioning() {
            tracing::debug!(from, to, "navigation dropped during transition");
            return Navigation::Dropped;
        }
        self.cancel_autoplay(scheduler);
        self.phase = Phase::Transitioning { from, to };
        self.commit = Some(scheduler.schedule(self.timing.transition, TimerKind::CommitTransition));
        tracing::debug!(from, to, "transition started");
        Navigation::Started { from, to }
    }

    /// Handle a fired commit timer. Returns the index to make visible, or
    /// `None` for a stale timer.
    pub fn on_commit(&mut self, scheduler: &mut Scheduler, timer: TimerId) -> Option<usize> {
        if self.commit != Some(timer) {
            return None;
        }
        self.commit = None;
        let Phase::Transitioning { to, .. } = self.phase else {
            return None;
        };
        self.phase = Phase::Idle;
        if !self.paused {
            self.arm_autoplay(scheduler);
        }
        tracing::debug!(index = to, "transition committed");
        Some(to)
    }

    /// Handle a fired autoplay timer. Returns `true` when the carousel should
    /// advance.
    pub fn on_autoplay(&mut self, timer: TimerId) -> bool {
        if self.autoplay != Some(timer) {
            return false;
        }
        self.autoplay = None;
        !self.paused
    }

    /// Stop automatic advancement. Returns `false` if already paused.
    pub fn pause(&mut self, scheduler: &mut Scheduler) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        self.cancel_autoplay(scheduler);
        true
    }

    /// Restart automatic advancement from a full interval. Returns `false`
    /// if it was not paused.
    pub fn resume(&mut self, scheduler: &mut Scheduler) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        // An in-flight transition re-arms autoplay when it commits.
        if !self.is_transitioning() {
            self.arm_autoplay(scheduler);
        }
        true
    }

    fn arm_autoplay(&mut self, scheduler: &mut Scheduler) {
        self.cancel_autoplay(scheduler);
        self.autoplay = Some(scheduler.schedule(self.timing.autoplay_interval, TimerKind::Autoplay));
    }

    fn cancel_autoplay(&mut self, scheduler: &mut Scheduler) {
        if let Some(id) = self.autoplay.take() {
            scheduler.cancel(id);
        }
    }
}
