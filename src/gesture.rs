//! Horizontal swipe detection for touch input.
//!
//! A swipe is the difference between the X coordinate at touch start and the
//! last X coordinate seen while moving. Only the sign and magnitude matter:
//!
//! - `start - end > threshold` → finger moved left → next slide
//! - `start - end < -threshold` → finger moved right → previous slide
//! - anything in between is a tap or a jitter and is ignored
//!
//! A touch that never moved, or a move without a start, resolves to nothing.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Next,
    Previous,
}

#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f64,
    start: Option<f64>,
    end: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start: None,
            end: None,
        }
    }

    pub fn touch_start(&mut self, x: f64) {
        self.start = Some(x);
        self.end = None;
    }

    pub fn touch_move(&mut self, x: f64) {
        self.end = Some(x);
    }

    /// Finish the gesture. Tracking state is cleared whatever the outcome.
    pub fn touch_end(&mut self) -> Option<Swipe> {
        let (start, end) = (self.start.take(), self.end.take());
        classify(start? - end?, self.threshold)
    }

    pub fn cancel(&mut self) {
        self.start = None;
        self.end = None;
    }
}

fn classify(distance: f64, threshold: f64) -> Option<Swipe> {
    if distance > threshold {
        Some(Swipe::Next)
    } else if distance < -threshold {
        Some(Swipe::Previous)
    } else {
        None
    }
}
