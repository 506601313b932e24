//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every slide is shown by its position and caption first, with the files it
//! came from as indented context lines. Positions are 1-based and
//! zero-padded so the inventory lines up with the `NNN-` filenames.
//!
//! ## Scan
//!
//! ```text
//! Slides (3)
//! 001 First Dance
//!     Source: 001-First-Dance.jpg
//!     Alt: Two people dancing
//!     When: Saturday, March 15, 2025 · 04:52 PM
//!     Size: 2048x1536
//! 002 (002.jpg)
//!     Size: unknown
//!
//! Config
//!     config.toml
//!     Autoplay every 4000ms, 300ms transitions
//! ```
//!
//! ## Simulate
//!
//! ```text
//!   4000ms  transition 001 → 002
//!   4300ms  showing 002
//!   5100ms  lightbox opened on 002
//!
//! Final state
//!     Slide 002 of 003
//!     Autoplay paused
//!     Lightbox 2 / 3, zoom 150%, pan (20, -10)
//! ```
//!
//! ## Counter
//!
//! ```text
//! Together since April 6, 2025
//!     409 days · 58 weeks · 13 months · 1 year
//! Next anniversary
//!     April 6, 2027 (2nd) - Our special day
//!     321 days to go
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::carousel::{CarouselEvent, CarouselView};
use crate::counter::{Together, format_long_date};
use crate::metadata::format_display_date;
use crate::scan::Reel;
use crate::simulate::Trace;
use std::path::Path;

/// Format a 0-based slide index as a 3-digit, 1-based position.
fn format_index(index: usize) -> String {
    format!("{:0>3}", index + 1)
}

fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Captioned slides show the caption; uncaptioned show the filename.
///
/// ```text
/// 001 First Dance
/// 002 (002.jpg)
/// ```
fn slide_line(index: usize, caption: Option<&str>, filename: &str) -> String {
    match caption {
        Some(c) if !c.is_empty() => format!("{} {}", format_index(index), c),
        _ => format!("{} ({})", format_index(index), filename),
    }
}

fn moment(date: Option<&str>, time: Option<&str>) -> Option<String> {
    match (date, time) {
        (Some(d), Some(t)) => Some(format!("{} · {}", format_display_date(d), t)),
        (Some(d), None) => Some(format_display_date(d)),
        (None, Some(t)) => Some(t.to_string()),
        (None, None) => None,
    }
}

/// Format the scan inventory.
pub fn format_scan_output(reel: &Reel, source_root: &Path) -> Vec<String> {
    let mut lines = vec![format!("Slides ({})", reel.slides.len())];

    for (i, (slide, file)) in reel.slides.iter().zip(&reel.files).enumerate() {
        let ctx = indent(1);
        lines.push(slide_line(i, slide.caption.as_deref(), file));
        if slide.caption.is_some() {
            lines.push(format!("{ctx}Source: {file}"));
        }
        if slide.caption.as_deref() != Some(slide.alt.as_str()) {
            lines.push(format!("{ctx}Alt: {}", slide.alt));
        }
        if let Some(when) = moment(slide.date.as_deref(), slide.time.as_deref()) {
            lines.push(format!("{ctx}When: {when}"));
        }
        for ext in ["toml", "txt"] {
            let sidecar = Path::new(file).with_extension(ext);
            if source_root.join(&sidecar).exists() {
                lines.push(format!("{ctx}Sidecar: {}", sidecar.display()));
            }
        }
        match slide.dimensions {
            Some((w, h)) => lines.push(format!("{ctx}Size: {w}x{h}")),
            None => lines.push(format!("{ctx}Size: unknown")),
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}stock defaults", indent(1)));
    }
    let carousel = &reel.config.carousel;
    lines.push(format!(
        "{}Autoplay every {}ms, {}ms transitions",
        indent(1),
        carousel.autoplay_interval_ms,
        carousel.transition_ms
    ));

    lines
}

pub fn print_scan_output(reel: &Reel, source_root: &Path) {
    for line in format_scan_output(reel, source_root) {
        println!("{}", line);
    }
}

/// One human-readable line per event.
pub fn format_event(event: &CarouselEvent) -> String {
    match event {
        CarouselEvent::TransitionStarted { from, to } => {
            format!("transition {} → {}", format_index(*from), format_index(*to))
        }
        CarouselEvent::SlideChanged { index } => format!("showing {}", format_index(*index)),
        CarouselEvent::NavigationDropped { requested } => {
            format!("dropped request for {} (transition in progress)", format_index(*requested))
        }
        CarouselEvent::AutoplayPaused => "autoplay paused".to_string(),
        CarouselEvent::AutoplayResumed => "autoplay resumed".to_string(),
        CarouselEvent::LightboxOpened { slide } => {
            format!("lightbox opened on {}", format_index(*slide))
        }
        CarouselEvent::LightboxSlideChanged { slide } => {
            format!("lightbox moved to {}", format_index(*slide))
        }
        CarouselEvent::LightboxClosed => "lightbox closed".to_string(),
        CarouselEvent::ZoomChanged { level } => format!("zoom {}%", percent(*level)),
        CarouselEvent::Panned { x, y } => format!("pan ({x}, {y})"),
        CarouselEvent::ImageFallback { slide } => {
            format!("image {} failed, showing fallback", format_index(*slide))
        }
    }
}

fn percent(zoom: f64) -> i64 {
    (zoom * 100.0).round() as i64
}

/// Format a simulation trace followed by the final carousel state.
pub fn format_trace(trace: &Trace) -> Vec<String> {
    let mut lines: Vec<String> = trace
        .entries
        .iter()
        .map(|e| format!("{:>7}ms  {}", e.at_ms, format_event(&e.event)))
        .collect();
    if lines.is_empty() {
        lines.push("(no events)".to_string());
    }
    lines.push(String::new());
    lines.extend(format_view(&trace.final_view));
    lines
}

fn format_view(view: &CarouselView) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![
        "Final state".to_string(),
        format!(
            "{ctx}Slide {} of {}",
            format_index(view.current),
            format_index(view.slides.len().saturating_sub(1))
        ),
    ];
    if view.is_transitioning {
        lines.push(format!("{ctx}Transition in progress"));
    }
    lines.push(format!(
        "{ctx}Autoplay {}",
        if view.is_paused { "paused" } else { "running" }
    ));
    let failed: Vec<String> = view
        .slides
        .iter()
        .filter(|s| s.failed)
        .map(|s| format_index(s.index))
        .collect();
    if !failed.is_empty() {
        lines.push(format!("{ctx}Fallback images: {}", failed.join(", ")));
    }
    match &view.lightbox {
        Some(lb) => lines.push(format!(
            "{ctx}Lightbox {}, zoom {}%, pan ({}, {})",
            lb.position,
            percent(lb.zoom),
            lb.pan.x,
            lb.pan.y
        )),
        None => lines.push(format!("{ctx}Lightbox closed")),
    }
    lines
}

pub fn print_trace(trace: &Trace) {
    for line in format_trace(trace) {
        println!("{}", line);
    }
}

fn count<T: PartialEq + From<u8> + std::fmt::Display>(n: T, unit: &str) -> String {
    if n == T::from(1) {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn format_counter(together: &Together, note: &str) -> Vec<String> {
    let ctx = indent(1);
    let countdown = match together.days_until_anniversary {
        0 => "today".to_string(),
        n => format!("{} to go", count(n, "day")),
    };
    vec![
        format!("Together since {}", format_long_date(together.start)),
        format!(
            "{ctx}{} · {} · {} · {}",
            count(together.days, "day"),
            count(together.weeks, "week"),
            count(together.months, "month"),
            count(together.years, "year")
        ),
        "Next anniversary".to_string(),
        format!(
            "{ctx}{} ({}) - {}",
            format_long_date(together.next_anniversary),
            ordinal(together.anniversary_number),
            note
        ),
        format!("{ctx}{countdown}"),
    ]
}

pub fn print_counter(together: &Together, note: &str) {
    for line in format_counter(together, note) {
        println!("{}", line);
    }
}
