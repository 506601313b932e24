//! Shared test utilities for the our-story test suite.
//!
//! Provides slide and reel builders, ready-made hero/gallery carousels, and
//! small helpers for moving virtual time.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut c = gallery(4);
//! c.next();
//! settle(&mut c);
//! assert_eq!(c.current_index(), 1);
//! ```

use std::path::Path;
use std::time::Duration;

use crate::carousel::Carousel;
use crate::config::{CarouselSettings, LightboxConfig, SiteConfig};
use crate::scan::Reel;
use crate::types::Slide;

// =========================================================================
// Slides and reels
// =========================================================================

/// Slide `index` (0-based) with no caption and unknown dimensions.
pub fn test_slide(index: usize) -> Slide {
    let n = index + 1;
    Slide::new(format!("images/{n:03}.jpg"), format!("Slide {n}"))
}

pub fn test_slides(count: usize) -> Vec<Slide> {
    (0..count).map(test_slide).collect()
}

/// A reel of `count` plain slides with stock config.
pub fn test_reel(count: usize) -> Reel {
    Reel {
        slides: test_slides(count),
        files: (1..=count).map(|n| format!("{n:03}.jpg")).collect(),
        config: SiteConfig::default(),
    }
}

// =========================================================================
// Carousels
// =========================================================================

/// Gallery carousel: touch, lightbox navigation and zoom buttons enabled.
pub fn gallery(count: usize) -> Carousel {
    Carousel::with_settings(
        test_slides(count),
        CarouselSettings::gallery(),
        LightboxConfig::default(),
    )
    .unwrap()
}

/// Hero carousel: no touch, no lightbox navigation.
pub fn hero(count: usize) -> Carousel {
    Carousel::with_settings(
        test_slides(count),
        CarouselSettings::hero(),
        LightboxConfig::default(),
    )
    .unwrap()
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Let a pending transition commit.
pub fn settle(carousel: &mut Carousel) {
    let window = carousel.settings().transition_ms;
    carousel.advance(ms(window));
}

// =========================================================================
// Files
// =========================================================================

/// Write a file with an image extension but no decodable content.
pub fn write_fake_image(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"not really an image").unwrap();
}

/// Write a real PNG of the given size.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 120, 90]))
        .save(path)
        .unwrap();
}
