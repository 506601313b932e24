//! Shared types used across the carousel engine, the scanner and the renderer.
//!
//! [`Slide`] is serialized into `reel.json` by the scan command and read back
//! by everything downstream, so its field names are part of the on-disk format.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// One image-plus-metadata entry in the carousel's ordered sequence.
///
/// Slides are immutable once a reel is built. Ordering is meaningful (it is
/// the traversal order) and is never re-sorted at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Opaque image reference (relative path or URL).
    pub source: String,
    /// Alternative text for the image element.
    pub alt: String,
    /// Short title shown over the slide and in the lightbox header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Raw date string, usually ISO (`2025-03-15`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Free-form time string (`04:52 PM`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Natural pixel size `(width, height)`, when it could be probed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,
}

impl Slide {
    pub fn new(source: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            alt: alt.into(),
            caption: None,
            date: None,
            time: None,
            dimensions: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_moment(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self.time = Some(time.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }
}

/// A 2D position or offset in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}
