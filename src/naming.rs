//! Filename conventions for slide images.
//!
//! A reel directory holds one file per slide. The order and fallback title
//! come from the filename:
//!
//! - `001-First-Dance.jpg` → position 1, title "First Dance"
//! - `012.png` → position 12, no title
//! - `beach-day.webp` → unnumbered, title "beach day"
//!
//! Unnumbered slides sort after all numbered ones, alphabetically.

use std::path::Path;

/// Extensions accepted as slide images (lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideName {
    /// Position prefix, if the stem starts with digits.
    pub number: Option<u32>,
    /// Title with dashes and underscores turned into spaces. Empty for
    /// number-only stems.
    pub title: String,
}

/// Split a file stem into its position prefix and display title.
pub fn parse_slide_stem(stem: &str) -> SlideName {
    let digits = stem.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        let rest = &stem[digits..];
        let number = stem[..digits].parse::<u32>().ok();
        if number.is_some() && (rest.is_empty() || rest.starts_with('-')) {
            return SlideName {
                number,
                title: display_title(rest.trim_start_matches('-')),
            };
        }
    }
    SlideName {
        number: None,
        title: display_title(stem),
    }
}

fn display_title(raw: &str) -> String {
    raw.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether `path` names a slide image. Hidden files never count.
pub fn is_slide_image(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with('.'));
    if hidden {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}
