//! Full-screen lightbox with zoom and drag-to-pan.
//!
//! A [`Lightbox`] only exists while the overlay is open; closing drops it,
//! which is how every open starts from `zoom = 1.0, pan = (0, 0)`.
//!
//! ## Pan bounds
//!
//! Zooming by `z` makes the image `z` times larger than its frame, so the
//! hidden overflow on each side of an axis is `(z - 1) * size / 2`. That is
//! the furthest the image may be dragged on that axis:
//!
//! ```text
//! max_pan.x = (zoom - 1) * rendered_width  / 2
//! max_pan.y = (zoom - 1) * rendered_height / 2
//! ```
//!
//! When the rendered size is unknown a fixed `fallback_pan_px` per zoom unit
//! is used on both axes. At `zoom == 1.0` both bounds are zero, so the image
//! cannot move.
//!
//! Every zoom change re-clamps the current pan, so zooming out never leaves
//! the image stranded outside its new bound.

use crate::types::Point;

/// Zoom limits and the size-unknown pan constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPolicy {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub fallback_pan_px: f64,
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 4.0,
            fallback_pan_px: 100.0,
        }
    }
}

impl ZoomPolicy {
    pub fn clamp(&self, zoom: f64) -> f64 {
        snap(zoom.clamp(self.min_zoom, self.max_zoom))
    }
}

/// Drop float noise from repeated `±0.1` steps so `1.0 + 0.1 - 0.1` is `1.0`.
fn snap(zoom: f64) -> f64 {
    (zoom * 1e6).round() / 1e6
}

/// Fit a natural image size inside a frame without upscaling.
pub fn rendered_size(natural: (u32, u32), frame: (u32, u32)) -> (f64, f64) {
    let (w, h) = (natural.0 as f64, natural.1 as f64);
    if w <= 0.0 || h <= 0.0 {
        return (0.0, 0.0);
    }
    let scale = (frame.0 as f64 / w).min(frame.1 as f64 / h).min(1.0);
    (w * scale, h * scale)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lightbox {
    policy: ZoomPolicy,
    open_slide: usize,
    rendered: Option<(f64, f64)>,
    zoom: f64,
    pan: Point,
    drag_anchor: Option<Point>,
}

impl Lightbox {
    /// Open on `slide`. `rendered` is the on-screen image size, if known.
    pub fn open(slide: usize, rendered: Option<(f64, f64)>, policy: ZoomPolicy) -> Self {
        Self {
            policy,
            open_slide: slide,
            rendered,
            zoom: policy.min_zoom,
            pan: Point::ORIGIN,
            drag_anchor: None,
        }
    }

    pub fn open_slide(&self) -> usize {
        self.open_slide
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn rendered(&self) -> Option<(f64, f64)> {
        self.rendered
    }

    /// Switch to another slide inside the overlay. Zoom and pan reset as on
    /// open.
    pub fn show(&mut self, slide: usize, rendered: Option<(f64, f64)>) {
        self.open_slide = slide;
        self.rendered = rendered;
        self.reset_zoom();
        self.drag_anchor = None;
    }

    /// The frame changed size; keep pan inside the new bound.
    pub fn set_rendered(&mut self, rendered: Option<(f64, f64)>) {
        self.rendered = rendered;
        self.pan = self.clamp_pan(self.pan);
    }

    /// Relative zoom (wheel, buttons). Returns the new level.
    pub fn set_zoom(&mut self, delta: f64) -> f64 {
        self.set_zoom_level(self.zoom + delta)
    }

    /// Absolute zoom (slider). Returns the new level.
    pub fn set_zoom_level(&mut self, level: f64) -> f64 {
        if level.is_nan() {
            return self.zoom;
        }
        self.zoom = self.policy.clamp(level);
        self.pan = self.clamp_pan(self.pan);
        if !self.can_pan() {
            self.drag_anchor = None;
        }
        tracing::debug!(zoom = self.zoom, "zoom changed");
        self.zoom
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = self.policy.min_zoom;
        self.pan = Point::ORIGIN;
    }

    /// Start dragging. Ignored unless zoomed in.
    pub fn begin_pan(&mut self, pointer: Point) -> bool {
        if !self.can_pan() || !pointer.is_finite() {
            return false;
        }
        self.drag_anchor = Some(pointer - self.pan);
        true
    }

    /// Follow the pointer while dragging. Returns `true` when the pan moved.
    pub fn update_pan(&mut self, pointer: Point) -> bool {
        let Some(anchor) = self.drag_anchor else {
            return false;
        };
        if !self.can_pan() || !pointer.is_finite() {
            return false;
        }
        let next = self.clamp_pan(pointer - anchor);
        if next == self.pan {
            return false;
        }
        self.pan = next;
        true
    }

    /// Stop dragging. The pan offset is kept.
    pub fn end_pan(&mut self) -> bool {
        self.drag_anchor.take().is_some()
    }

    /// Per-axis pan bound at the current zoom.
    pub fn max_pan(&self) -> Point {
        let overflow = (self.zoom - 1.0).max(0.0);
        match self.rendered {
            Some((w, h)) => Point::new(overflow * w / 2.0, overflow * h / 2.0),
            None => {
                let bound = overflow * self.policy.fallback_pan_px;
                Point::new(bound, bound)
            }
        }
    }

    fn can_pan(&self) -> bool {
        self.zoom > 1.0
    }

    fn clamp_pan(&self, proposed: Point) -> Point {
        let max = self.max_pan();
        Point::new(
            proposed.x.clamp(-max.x, max.x),
            proposed.y.clamp(-max.y, max.y),
        )
    }
}
