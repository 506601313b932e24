//! Reel scanning: turn a directory of photos into an ordered slide list.
//!
//! ## Directory layout
//!
//! ```text
//! story/                           # Reel root
//! ├── config.toml                  # Carousel, lightbox and color settings (optional)
//! ├── 001-First-Dance.jpg          # Slide 1
//! ├── 001-First-Dance.toml         # alt / caption / date / time (optional)
//! ├── 002-Nice-evening.png
//! ├── 002-Nice-evening.txt         # Plain-text caption (optional)
//! ├── 010-Our-Home.webp            # Gaps in numbering are fine
//! └── beach.jpg                    # Unnumbered: after all numbered slides
//! ```
//!
//! Subdirectories and non-image files are ignored.
//!
//! ## Validation
//!
//! - Two images with the same number is an error.
//! - A reel needs at least one image.
//! - Sidecar `.toml` files must only use known keys.
//!
//! Image dimensions are probed in parallel. A file that can't be decoded
//! still becomes a slide, just without dimensions; the lightbox then falls
//! back to the fixed pan bound.

use crate::config::{self, SiteConfig};
use crate::metadata::{self, SidecarError};
use crate::naming::{self, parse_slide_stem};
use crate::types::Slide;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public URL prefix for slide images in the rendered page.
pub const IMAGE_URL_PREFIX: &str = "images";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sidecar error: {0}")]
    Sidecar(#[from] SidecarError),
    #[error("Duplicate slide number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("No slide images found in {0}")]
    EmptyReel(PathBuf),
}

/// Output of the scan stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reel {
    pub slides: Vec<Slide>,
    /// Files the slides were read from, parallel to `slides`, relative to
    /// the reel root.
    pub files: Vec<String>,
    pub config: SiteConfig,
}

impl Reel {
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ScanError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

pub fn scan(root: &Path) -> Result<Reel, ScanError> {
    let config = config::load_config(root)?;
    let ordered = collect_ordered(root)?;
    if ordered.is_empty() {
        return Err(ScanError::EmptyReel(root.to_path_buf()));
    }

    let dimensions: Vec<Option<(u32, u32)>> = ordered
        .par_iter()
        .map(|path| probe_dimensions(path))
        .collect();

    let mut slides = Vec::with_capacity(ordered.len());
    let mut files = Vec::with_capacity(ordered.len());
    for (position, (path, dims)) in ordered.iter().zip(dimensions).enumerate() {
        let slide = build_slide(path, position, dims)?;
        tracing::debug!(file = %path.display(), alt = %slide.alt, "slide");
        slides.push(slide);
        files.push(file_name(path));
    }

    tracing::info!(slides = slides.len(), root = %root.display(), "scanned reel");
    Ok(Reel {
        slides,
        files,
        config,
    })
}

/// Image files in slide order: numbered first by number, then unnumbered
/// by filename.
fn collect_ordered(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut images: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && naming::is_slide_image(p))
        .collect();
    images.sort();

    let mut numbered: BTreeMap<u32, PathBuf> = BTreeMap::new();
    let mut unnumbered = Vec::new();
    for path in images {
        match parse_slide_stem(&stem(&path)).number {
            Some(num) => {
                if numbered.contains_key(&num) {
                    return Err(ScanError::DuplicateNumber(num, root.to_path_buf()));
                }
                numbered.insert(num, path);
            }
            None => unnumbered.push(path),
        }
    }
    Ok(numbered.into_values().chain(unnumbered).collect())
}

fn build_slide(
    path: &Path,
    position: usize,
    dimensions: Option<(u32, u32)>,
) -> Result<Slide, ScanError> {
    let title = parse_slide_stem(&stem(path)).title;
    let details = metadata::read_details_sidecar(path)?.unwrap_or_default();
    let txt_caption = metadata::read_caption_sidecar(path);

    let caption = metadata::resolve(&[
        details.caption.as_deref(),
        txt_caption.as_deref(),
        Some(title.as_str()),
    ]);
    let alt = metadata::resolve(&[details.alt.as_deref(), caption.as_deref()])
        .unwrap_or_else(|| format!("Slide {}", position + 1));

    Ok(Slide {
        source: format!("{IMAGE_URL_PREFIX}/{}", file_name(path)),
        alt,
        caption,
        date: metadata::resolve(&[details.date.as_deref()]),
        time: metadata::resolve(&[details.time.as_deref()]),
        dimensions,
    })
}

fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(err) => {
            tracing::warn!(file = %path.display(), error = %err, "could not read image dimensions");
            None
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
