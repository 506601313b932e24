//! Per-slide text: alt text, caption, date and time.
//!
//! ## Sources
//!
//! - **Details sidecar**: `001-First-Dance.toml` next to the image, with any
//!   of `alt`, `caption`, `date` (`YYYY-MM-DD`) and `time` (free text, shown
//!   as written). Unknown keys are an error so typos don't silently vanish.
//! - **Caption sidecar**: `001-First-Dance.txt`, plain text.
//! - **Filename title**: `First Dance`, from [`crate::naming`].
//!
//! ## Resolution priority
//!
//! The first non-empty value wins:
//!
//! - **Caption**: details `caption` → `.txt` → filename title → None
//! - **Alt**: details `alt` → resolved caption → `"Slide N"`

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidecarError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid sidecar {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Resolve a field from sources in priority order. Returns the first
/// non-empty value, trimmed.
///
/// ```text
/// caption: resolve(&[details.caption, sidecar_txt, filename_title])
/// alt:     resolve(&[details.alt, caption])
/// ```
pub fn resolve(sources: &[Option<&str>]) -> Option<String> {
    sources
        .iter()
        .filter_map(|opt| {
            opt.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        })
        .next()
}

/// Read `<stem>.txt` next to an image. `None` if missing or blank.
pub fn read_caption_sidecar(image_path: &Path) -> Option<String> {
    std::fs::read_to_string(image_path.with_extension("txt"))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideDetails {
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

/// Read `<stem>.toml` next to an image. `Ok(None)` if there is none.
pub fn read_details_sidecar(image_path: &Path) -> Result<Option<SlideDetails>, SidecarError> {
    let path = image_path.with_extension("toml");
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|source| SidecarError::Io {
        path: path.clone(),
        source,
    })?;
    let details = toml::from_str(&content).map_err(|source| SidecarError::Toml {
        path: path.clone(),
        source,
    })?;
    Ok(Some(details))
}

/// `"2025-03-15"` → `"Saturday, March 15, 2025"`. Anything that isn't an
/// ISO calendar date comes back unchanged.
pub fn format_display_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_picks_first_non_empty() {
        assert_eq!(
            resolve(&[None, Some("  "), Some(" Sunset "), Some("later")]),
            Some("Sunset".to_string())
        );
        assert_eq!(resolve(&[None, Some("")]), None);
        assert_eq!(resolve(&[]), None);
    }

    #[test]
    fn caption_sidecar_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let img = dir.path().join("001-a.jpg");
        fs::write(dir.path().join("001-a.txt"), "\n  Our first trip \n").unwrap();
        assert_eq!(read_caption_sidecar(&img), Some("Our first trip".into()));
    }

    #[test]
    fn caption_sidecar_missing_or_blank() {
        let dir = TempDir::new().unwrap();
        let img = dir.path().join("001-a.jpg");
        assert_eq!(read_caption_sidecar(&img), None);
        fs::write(dir.path().join("001-a.txt"), "   \n").unwrap();
        assert_eq!(read_caption_sidecar(&img), None);
    }

    #[test]
    fn details_sidecar_parses_all_fields() {
        let dir = TempDir::new().unwrap();
        let img = dir.path().join("002-b.png");
        fs::write(
            dir.path().join("002-b.toml"),
            r#"
alt = "Two people on a pier"
caption = "Nice evening"
date = "2025-03-15"
time = "04:52 PM"
"#,
        )
        .unwrap();
        let details = read_details_sidecar(&img).unwrap().unwrap();
        assert_eq!(details.alt.as_deref(), Some("Two people on a pier"));
        assert_eq!(details.caption.as_deref(), Some("Nice evening"));
        assert_eq!(details.date.as_deref(), Some("2025-03-15"));
        assert_eq!(details.time.as_deref(), Some("04:52 PM"));
    }

    #[test]
    fn details_sidecar_missing_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(read_details_sidecar(&dir.path().join("x.jpg")).unwrap().is_none());
    }

    #[test]
    fn details_sidecar_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("x.toml"), "titel = \"typo\"").unwrap();
        let err = read_details_sidecar(&dir.path().join("x.jpg")).unwrap_err();
        assert!(matches!(err, SidecarError::Toml { .. }));
        assert!(err.to_string().contains("x.toml"));
    }

    #[test]
    fn formats_iso_dates_long_form() {
        assert_eq!(format_display_date("2025-03-15"), "Saturday, March 15, 2025");
        assert_eq!(format_display_date("2025-05-01"), "Thursday, May 1, 2025");
    }

    #[test]
    fn unparsable_dates_pass_through() {
        assert_eq!(format_display_date("last summer"), "last summer");
        assert_eq!(format_display_date("2025-13-01"), "2025-13-01");
    }
}
