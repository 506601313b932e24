//! Virtual clock and one-shot timers.
//!
//! The carousel never sleeps. Everything that the browser would express as
//! `setTimeout`/`setInterval` is a one-shot entry in a [`Scheduler`], and the
//! host moves time forward explicitly with [`Scheduler::pop_due`] +
//! [`Scheduler::advance_to`]. This keeps every test deterministic: the same
//! inputs at the same virtual instants always produce the same trace.
//!
//! ## Ordering
//!
//! Timers fire in deadline order. Two timers with the same deadline fire in
//! the order they were scheduled (the id doubles as a sequence number).

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`], used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Autoplay interval elapsed; advance to the next slide.
    Autoplay,
    /// The transition window closed; commit the pending index.
    CommitTransition,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), TimerKind>,
    /// Deadline of each pending timer, for direct cancellation.
    deadlines: HashMap<u64, Duration>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, after: Duration, kind: TimerKind) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        let at = self.now + after;
        self.pending.insert((at, seq), kind);
        self.deadlines.insert(seq, at);
        tracing::trace!(?kind, at_ms = at.as_millis() as u64, "timer scheduled");
        TimerId(seq)
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled before.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id.0) {
            Some(at) => self.pending.remove(&(at, id.0)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(at, _)| *at)
    }

    /// Remove the earliest timer due at or before `deadline` and move the
    /// clock to its deadline. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<(TimerId, TimerKind)> {
        let (&(at, seq), _) = self.pending.first_key_value()?;
        if at > deadline {
            return None;
        }
        let kind = self.pending.remove(&(at, seq))?;
        self.deadlines.remove(&seq);
        self.now = self.now.max(at);
        Some((TimerId(seq), kind))
    }

    /// Move the clock forward. Time never runs backwards.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut s = Scheduler::new();
        let late = s.schedule(ms(400), TimerKind::Autoplay);
        let early = s.schedule(ms(300), TimerKind::CommitTransition);

        assert_eq!(s.pop_due(ms(1000)), Some((early, TimerKind::CommitTransition)));
        assert_eq!(s.now(), ms(300));
        assert_eq!(s.pop_due(ms(1000)), Some((late, TimerKind::Autoplay)));
        assert_eq!(s.pop_due(ms(1000)), None);
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        let first = s.schedule(ms(100), TimerKind::Autoplay);
        let second = s.schedule(ms(100), TimerKind::CommitTransition);
        assert_eq!(s.pop_due(ms(100)).map(|(id, _)| id), Some(first));
        assert_eq!(s.pop_due(ms(100)).map(|(id, _)| id), Some(second));
    }

    #[test]
    fn timer_not_due_stays_pending() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(4000), TimerKind::Autoplay);
        assert_eq!(s.pop_due(ms(3999)), None);
        assert!(s.is_pending(id));
        assert_eq!(s.next_deadline(), Some(ms(4000)));
    }

    #[test]
    fn cancel_removes_timer_once() {
        let mut s = Scheduler::new();
        let id = s.schedule(ms(10), TimerKind::Autoplay);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.pending_count(), 0);
        assert_eq!(s.pop_due(ms(100)), None);
    }

    #[test]
    fn cancel_only_touches_its_own_timer() {
        let mut s = Scheduler::new();
        let a = s.schedule(ms(100), TimerKind::Autoplay);
        let b = s.schedule(ms(100), TimerKind::CommitTransition);
        assert!(s.cancel(a));
        assert!(!s.is_pending(a));
        assert!(s.is_pending(b));
        assert_eq!(s.pop_due(ms(100)), Some((b, TimerKind::CommitTransition)));
        assert!(!s.is_pending(b));
        assert!(!s.cancel(b));
    }

    #[test]
    fn schedule_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(ms(1000));
        s.schedule(ms(300), TimerKind::CommitTransition);
        assert_eq!(s.next_deadline(), Some(ms(1300)));
    }

    #[test]
    fn clock_never_runs_backwards() {
        let mut s = Scheduler::new();
        s.advance_to(ms(500));
        s.advance_to(ms(200));
        assert_eq!(s.now(), ms(500));
    }
}
