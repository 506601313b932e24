//! # Our Story
//!
//! A headless engine for the photo carousels on a single-audience story
//! page: a hero rotator at the top and a moments gallery below, both with a
//! full-screen lightbox that zooms and pans.
//!
//! # Architecture
//!
//! ```text
//! 1. Scan       story/  →  reel.json      (photos + sidecars → ordered slides)
//! 2. Simulate   reel + script → trace     (replay inputs on a virtual clock)
//! 3. Render     reel + views  →  dist/    (static HTML snapshot)
//! ```
//!
//! The engine itself ([`carousel`]) does no I/O and never reads a wall
//! clock. Hosts feed it [`carousel::Input`]s and move time forward with
//! [`carousel::Carousel::advance`]; everything observable comes back as
//! [`carousel::CarouselEvent`]s and [`carousel::CarouselView`] snapshots.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | The component: input dispatch, capability flags, events, view |
//! | [`sequencer`] | Which slide is visible; wrap-around index math |
//! | [`transition`] | Transition window, dropped requests, autoplay arm/cancel |
//! | [`timer`] | Virtual-clock one-shot timers |
//! | [`lightbox`] | Zoom clamping and pan bounds for the full-screen overlay |
//! | [`gesture`] | Horizontal swipe classification |
//! | [`theme`] | Light/dark preference with subscribers and persistence |
//! | [`config`] | `config.toml` loading, validation, merging and color CSS |
//! | [`counter`] | Days together and the next-anniversary countdown |
//! | [`scan`] | Reel directory → ordered [`types::Slide`] list |
//! | [`naming`] | `NNN-Title` filename convention |
//! | [`metadata`] | Caption/alt resolution from sidecars; display dates |
//! | [`simulate`] | TOML input scripts and timestamped traces |
//! | [`render`] | Maud HTML for the page, carousels and lightbox |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Source of Truth for the Visible Slide
//!
//! Only the [`sequencer::SlideSequencer`] holds the current index, and only a
//! committed transition changes it. Buttons, dots, keys, swipes and autoplay
//! all go through the same request path, so "at most one transition in
//! flight" holds no matter where a request came from.
//!
//! ## Virtual Time
//!
//! Timers live in a [`timer::Scheduler`] keyed by deadline. Cancelling is a
//! map removal, so a cancelled autoplay tick can never fire late, and tests
//! can assert exact millisecond timings without sleeping.
//!
//! ## Lightbox Lifetime
//!
//! A [`lightbox::Lightbox`] value exists only while the overlay is open.
//! Closing drops it, so zoom and pan can't leak into the next open.
//!
//! ## Capability Flags, Not Variants
//!
//! Hero and gallery are the same type configured by
//! [`config::CarouselSettings`]. Inputs for disabled features are ignored
//! rather than rejected.

pub mod carousel;
pub mod config;
pub mod counter;
pub mod gesture;
pub mod lightbox;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod sequencer;
pub mod simulate;
pub mod theme;
pub mod timer;
pub mod transition;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
