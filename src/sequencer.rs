//! Slide sequencer: the ordered slide list and the visible position.
//!
//! The sequencer only does index arithmetic. It never changes the index on
//! its own; [`crate::transition::TransitionCoordinator`] decides *when* a
//! computed target is committed.

use crate::types::Slide;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CarouselError {
    #[error("A carousel needs at least one slide")]
    EmptyReel,
}

#[derive(Debug, Clone)]
pub struct SlideSequencer {
    slides: Vec<Slide>,
    current: usize,
}

impl SlideSequencer {
    /// Build a sequencer positioned on the first slide.
    pub fn new(slides: Vec<Slide>) -> Result<Self, CarouselError> {
        if slides.is_empty() {
            return Err(CarouselError::EmptyReel);
        }
        Ok(Self { slides, current: 0 })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always `false`; construction rejects empty reels.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Index `next()` would move to.
    pub fn next_index(&self) -> usize {
        wrap_forward(self.current, self.len())
    }

    /// Index `previous()` would move to.
    pub fn previous_index(&self) -> usize {
        wrap_backward(self.current, self.len())
    }

    /// Validate a jump target.
    ///
    /// Callers only ever pass indicator indices, so an out-of-range target is
    /// a bug: debug builds panic, release builds clamp to the last slide.
    pub fn checked_target(&self, index: usize) -> usize {
        debug_assert!(
            index < self.len(),
            "slide index {index} out of range for {} slides",
            self.len()
        );
        index.min(self.len() - 1)
    }

    /// Make `index` the visible slide. Only the transition coordinator calls
    /// this, once the transition window has elapsed.
    pub(crate) fn commit(&mut self, index: usize) {
        self.current = self.checked_target(index);
    }
}

/// `(index + 1) mod len`.
pub fn wrap_forward(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// `(index - 1 + len) mod len`.
pub fn wrap_backward(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}
