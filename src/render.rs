//! Static HTML rendering of carousel snapshots.
//!
//! Renders one page with two carousels over the same reel: the hero rotator
//! at the top and the moments gallery below it. Each carousel is drawn from
//! a [`CarouselView`], so what ends up in the HTML is exactly the state the
//! engine was in: the visible slide, the active indicator, failed images
//! swapped for the fallback, and the lightbox overlay with its current
//! zoom and pan.
//!
//! ## Output
//!
//! ```text
//! dist/
//! ├── index.html
//! └── images/
//!     ├── 001-First-Dance.jpg     # Copied from the reel directory
//!     └── ...
//! ```
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Colors are injected as CSS custom properties for the active theme.

use crate::carousel::{CarouselView, LightboxView, SlideView};
use crate::config::{self, ZoomControls};
use crate::metadata::format_display_date;
use crate::scan::{IMAGE_URL_PREFIX, Reel};
use crate::theme::Theme;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/story.css");
const PAGE_TITLE: &str = "Our Story";

/// Copy the reel's images into `output_dir` and write `index.html`.
/// Returns the path of the written page.
pub fn write_site(
    reel: &Reel,
    source_root: &Path,
    output_dir: &Path,
    hero: &CarouselView,
    gallery: &CarouselView,
    theme: Theme,
) -> Result<PathBuf, RenderError> {
    let images_dir = output_dir.join(IMAGE_URL_PREFIX);
    fs::create_dir_all(&images_dir)?;
    for file in &reel.files {
        fs::copy(source_root.join(file), images_dir.join(file))?;
    }

    let page = render_page(reel, hero, gallery, theme);
    let index = output_dir.join("index.html");
    fs::write(&index, page.into_string())?;
    tracing::info!(
        page = %index.display(),
        images = reel.files.len(),
        %theme,
        "rendered site"
    );
    Ok(index)
}

/// Render the full page for the given carousel snapshots.
pub fn render_page(
    reel: &Reel,
    hero: &CarouselView,
    gallery: &CarouselView,
    theme: Theme,
) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&reel.config.colors, theme),
        CSS_STATIC
    );
    let locked = hero.scroll_locked || gallery.scroll_locked;
    let content = html! {
        header.site-header {
            h1 { (PAGE_TITLE) }
        }
        main {
            (render_carousel("hero", "Highlights", hero))
            (render_carousel("moments", "Moments", gallery))
        }
    };
    base_document(PAGE_TITLE, &css, theme, locked.then_some("scroll-locked"), content)
}

fn base_document(
    title: &str,
    css: &str,
    theme: Theme,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme=(theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn render_carousel(id: &str, label: &str, view: &CarouselView) -> Markup {
    let hero = id == "hero";
    html! {
        section.carousel.hero[hero] id=(id) aria-roledescription="carousel" aria-label=(label)
            data-paused=(flag(view.is_paused)) data-touch=(flag(view.touch)) {
            div.slides aria-live=(if view.is_paused { "polite" } else { "off" }) {
                @for slide in &view.slides {
                    (render_slide(slide, view.slides.len()))
                }
            }
            button.nav.prev type="button" aria-label="Previous slide" { "‹" }
            button.nav.next type="button" aria-label="Next slide" { "›" }
            div.indicators {
                @for indicator in &view.indicators {
                    button.indicator type="button"
                        aria-label=(format!("Go to slide {}", indicator.index + 1))
                        aria-current=[indicator.active.then_some("true")] {}
                }
            }
            @if let Some(lightbox) = &view.lightbox {
                (render_lightbox(lightbox, view.slides.len()))
            }
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn render_slide(slide: &SlideView, total: usize) -> Markup {
    html! {
        figure.slide.is-current[slide.visible].failed[slide.failed]
            data-index=(slide.index) hidden[!slide.visible]
            aria-roledescription="slide"
            aria-label=(format!("{} of {}", slide.index + 1, total)) {
            img src=(slide.source) alt=(slide.alt) loading="lazy";
            (render_caption(slide))
        }
    }
}

fn render_caption(slide: &SlideView) -> Markup {
    let has_any = slide.caption.is_some() || slide.date.is_some() || slide.time.is_some();
    html! {
        @if has_any {
            figcaption {
                @if let Some(caption) = &slide.caption {
                    span.caption-title { (caption) }
                }
                @if let Some(date) = &slide.date {
                    time.caption-date datetime=(date) { (format_display_date(date)) }
                }
                @if let Some(time) = &slide.time {
                    " · "
                    span.caption-time { (time) }
                }
            }
        }
    }
}

fn render_lightbox(lightbox: &LightboxView, total: usize) -> Markup {
    let slide = &lightbox.slide;
    let transform = format!(
        "transform: translate({}px, {}px) scale({})",
        lightbox.pan.x, lightbox.pan.y, lightbox.zoom
    );
    html! {
        div.lightbox role="dialog" aria-modal="true"
            aria-label=(slide.caption.as_deref().unwrap_or(&slide.alt)) {
            div.lightbox-backdrop {}
            div.lightbox-header {
                span.lightbox-position { (lightbox.position) }
                @if let Some(caption) = &slide.caption {
                    span.lightbox-caption { (caption) }
                }
                button.close type="button" aria-label="Close" { "×" }
            }
            @if lightbox.navigation && total > 1 {
                button.nav.prev type="button" aria-label="Previous image" { "‹" }
                button.nav.next type="button" aria-label="Next image" { "›" }
            }
            div.lightbox-frame {
                img.lightbox-image.dragging[lightbox.is_dragging]
                    src=(slide.source) alt=(slide.alt) style=(transform);
            }
            (render_zoom_controls(lightbox))
        }
    }
}

fn render_zoom_controls(lightbox: &LightboxView) -> Markup {
    let percent = format!("{}%", (lightbox.zoom * 100.0).round());
    html! {
        @match lightbox.zoom_controls {
            ZoomControls::Buttons => {
                div.zoom-controls {
                    button.zoom-out type="button" aria-label="Zoom out"
                        disabled[lightbox.zoom <= lightbox.min_zoom] { "−" }
                    span.zoom-level { (percent) }
                    button.zoom-in type="button" aria-label="Zoom in"
                        disabled[lightbox.zoom >= lightbox.max_zoom] { "+" }
                    button.zoom-reset type="button" { "Reset" }
                }
            }
            ZoomControls::Slider => {
                div.zoom-controls {
                    input.zoom-slider type="range" aria-label="Zoom"
                        min=(lightbox.min_zoom) max=(lightbox.max_zoom) step="0.1"
                        value=(lightbox.zoom);
                    span.zoom-level { (percent) }
                }
            }
            ZoomControls::None => {}
        }
    }
}
