//! Reel configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the reel directory next to the photos and is sparse: stock defaults are
//! the base layer and the user file overrides only what it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [carousel]
//! autoplay_interval_ms = 4000  # Idle time between automatic advances
//! transition_ms = 300          # Animation window; navigation is dropped inside it
//! enable_lightbox = true       # Activating a slide opens the full-screen viewer
//! enable_touch = true          # Horizontal swipes navigate
//! lightbox_navigation = true   # Arrow keys / buttons move between slides in the viewer
//! zoom_controls = "buttons"    # buttons | slider | none
//! swipe_threshold_px = 50.0    # Minimum horizontal travel for a swipe
//!
//! [lightbox]
//! min_zoom = 1.0
//! max_zoom = 4.0
//! zoom_step = 0.1              # Zoom buttons
//! wheel_step = 0.1             # Per wheel tick
//! fallback_pan_px = 100.0      # Pan bound per zoom unit when the image size is unknown
//! frame = [1024, 768]          # Lightbox image frame in CSS pixels
//! fallback_image = "/fallback-image.jpg"
//!
//! [theme]
//! default = "light"
//!
//! [counter]
//! # start_date = "2025-04-06"  # YYYY-MM-DD; enables `our-story counter`
//! note = "Our special day"     # Shown next to the next anniversary
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#374151"
//! text_muted = "#6b7280"
//! accent = "#e11d48"
//! overlay = "rgba(0, 0, 0, 0.9)"
//!
//! [colors.dark]
//! background = "#1f2937"
//! text = "#d1d5db"
//! text_muted = "#9ca3af"
//! accent = "#fb7185"
//! overlay = "rgba(0, 0, 0, 0.95)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::counter;
use crate::lightbox::ZoomPolicy;
use crate::theme::Theme;
use crate::transition::TransitionTiming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Reel configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Carousel behavior: timing and capability flags.
    pub carousel: CarouselSettings,
    /// Lightbox zoom/pan limits and the image fallback.
    pub lightbox: LightboxConfig,
    /// Theme preference defaults.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Days-together counter.
    pub counter: CounterConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.carousel;
        let l = &self.lightbox;
        if c.autoplay_interval_ms == 0 {
            return Err(invalid("carousel.autoplay_interval_ms must be positive"));
        }
        for (name, value) in [
            ("carousel.swipe_threshold_px", c.swipe_threshold_px),
            ("lightbox.min_zoom", l.min_zoom),
            ("lightbox.max_zoom", l.max_zoom),
            ("lightbox.zoom_step", l.zoom_step),
            ("lightbox.wheel_step", l.wheel_step),
            ("lightbox.fallback_pan_px", l.fallback_pan_px),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        if !(c.swipe_threshold_px >= 0.0) {
            return Err(invalid("carousel.swipe_threshold_px must not be negative"));
        }
        if !(l.min_zoom >= 1.0) {
            return Err(invalid("lightbox.min_zoom must be at least 1.0"));
        }
        if l.min_zoom > l.max_zoom {
            return Err(invalid("lightbox.min_zoom must not exceed lightbox.max_zoom"));
        }
        if !(l.zoom_step > 0.0) || !(l.wheel_step > 0.0) {
            return Err(invalid("lightbox.zoom_step and lightbox.wheel_step must be positive"));
        }
        if !(l.fallback_pan_px >= 0.0) {
            return Err(invalid("lightbox.fallback_pan_px must not be negative"));
        }
        if l.frame[0] == 0 || l.frame[1] == 0 {
            return Err(invalid("lightbox.frame values must be non-zero"));
        }
        if l.fallback_image.trim().is_empty() {
            return Err(invalid("lightbox.fallback_image must not be empty"));
        }
        if let Some(raw) = &self.counter.start_date {
            counter::parse_date(raw)
                .map_err(|e| ConfigError::Validation(format!("counter.start_date: {e}")))?;
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Validation(msg.to_string())
}

/// How the lightbox exposes zoom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomControls {
    /// Zoom-in / zoom-out / reset buttons plus wheel.
    #[default]
    Buttons,
    /// A continuous range slider plus wheel.
    Slider,
    /// No zoom at all.
    None,
}

impl ZoomControls {
    pub fn zoom_enabled(self) -> bool {
        self != ZoomControls::None
    }
}

/// Carousel timing and capability flags.
///
/// The hero rotator and the moments gallery are the same component with
/// different flags; see [`CarouselSettings::hero`] and
/// [`CarouselSettings::gallery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselSettings {
    pub autoplay_interval_ms: u64,
    pub transition_ms: u64,
    pub enable_lightbox: bool,
    pub enable_touch: bool,
    pub lightbox_navigation: bool,
    pub zoom_controls: ZoomControls,
    pub swipe_threshold_px: f64,
}

impl CarouselSettings {
    /// Everything on: touch, lightbox with in-viewer navigation, zoom buttons.
    pub fn gallery() -> Self {
        Self {
            autoplay_interval_ms: 4000,
            transition_ms: 300,
            enable_lightbox: true,
            enable_touch: true,
            lightbox_navigation: true,
            zoom_controls: ZoomControls::Buttons,
            swipe_threshold_px: 50.0,
        }
    }

    /// The landing-page rotator: no touch, no in-viewer navigation.
    pub fn hero() -> Self {
        Self {
            enable_touch: false,
            lightbox_navigation: false,
            ..Self::gallery()
        }
    }

    /// These settings with the hero restrictions applied on top.
    pub fn as_hero(&self) -> Self {
        Self {
            enable_touch: false,
            lightbox_navigation: false,
            ..self.clone()
        }
    }

    pub fn timing(&self) -> TransitionTiming {
        TransitionTiming {
            transition: Duration::from_millis(self.transition_ms),
            autoplay_interval: Duration::from_millis(self.autoplay_interval_ms),
        }
    }
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::gallery()
    }
}

/// Lightbox zoom and pan limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Step for the zoom-in / zoom-out buttons.
    pub zoom_step: f64,
    /// Step per wheel tick.
    pub wheel_step: f64,
    /// Pan bound per unit of zoom above 1.0 when the rendered image size is
    /// unknown.
    pub fallback_pan_px: f64,
    /// Lightbox image frame `[width, height]` in CSS pixels. Images are
    /// fitted inside it (never upscaled) to get their rendered size.
    pub frame: [u32; 2],
    /// Image shown in place of a slide whose source failed to load.
    pub fallback_image: String,
}

impl LightboxConfig {
    pub fn zoom_policy(&self) -> ZoomPolicy {
        ZoomPolicy {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            fallback_pan_px: self.fallback_pan_px,
        }
    }
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 4.0,
            zoom_step: 0.1,
            wheel_step: 0.1,
            fallback_pan_px: 100.0,
            frame: [1024, 768],
            fallback_image: "/fallback-image.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterConfig {
    /// `YYYY-MM-DD`. The counter is off until this is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub note: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            start_date: None,
            note: "Our special day".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Theme used when no preference has been saved yet.
    pub default: Theme,
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl ColorConfig {
    pub fn scheme(&self, theme: Theme) -> &ColorScheme {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, dates, counters.
    pub text_muted: String,
    /// Active indicator and focus rings.
    pub accent: String,
    /// Lightbox backdrop.
    pub overlay: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#374151".to_string(),
            text_muted: "#6b7280".to_string(),
            accent: "#e11d48".to_string(),
            overlay: "rgba(0, 0, 0, 0.9)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1f2937".to_string(),
            text: "#d1d5db".to_string(),
            text_muted: "#9ca3af".to_string(),
            accent: "#fb7185".to_string(),
            overlay: "rgba(0, 0, 0, 0.95)".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value, or `None` if the
/// file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of stock
/// defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Our Story Configuration
# =======================
# Place this file next to your photos. All settings are optional; values
# shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Carousel
# ---------------------------------------------------------------------------
[carousel]
# Milliseconds between automatic advances. Hovering the carousel or opening
# the lightbox pauses it; leaving or closing restarts a full interval.
autoplay_interval_ms = 4000

# Length of the slide transition. Navigation requested while a transition
# is running is dropped, so rapid clicks advance one slide at a time.
transition_ms = 300

# Clicking a slide opens the full-screen lightbox.
enable_lightbox = true

# Horizontal swipes on touch screens move between slides.
enable_touch = true

# Arrow keys and overlay buttons move between slides inside the lightbox.
lightbox_navigation = true

# Zoom controls in the lightbox: "buttons", "slider" or "none".
zoom_controls = "buttons"

# Minimum horizontal swipe distance in pixels.
swipe_threshold_px = 50.0

# ---------------------------------------------------------------------------
# Lightbox
# ---------------------------------------------------------------------------
[lightbox]
min_zoom = 1.0
max_zoom = 4.0

# Zoom change per button press and per wheel tick.
zoom_step = 0.1
wheel_step = 0.1

# Pan limit per zoom unit when the image size is unknown.
fallback_pan_px = 100.0

# Lightbox image frame [width, height] in CSS pixels.
frame = [1024, 768]

# Shown instead of any photo that fails to load.
fallback_image = "/fallback-image.jpg"

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
# "light" or "dark". Used until a preference is saved with `our-story theme`.
default = "light"

[colors.light]
background = "#ffffff"
text = "#374151"
text_muted = "#6b7280"   # Captions, dates, counters
accent = "#e11d48"       # Active indicator, focus rings
overlay = "rgba(0, 0, 0, 0.9)"

[colors.dark]
background = "#1f2937"
text = "#d1d5db"
text_muted = "#9ca3af"
accent = "#fb7185"
overlay = "rgba(0, 0, 0, 0.95)"

# ---------------------------------------------------------------------------
# Counter
# ---------------------------------------------------------------------------
[counter]
# The day the story began (YYYY-MM-DD). Once set, `our-story counter` reports
# the days together and the countdown to the next anniversary.
# start_date = "2025-04-06"

# Shown next to the next anniversary date.
note = "Our special day"
"##
}

/// Generate CSS custom properties for one theme.
pub fn generate_color_css(colors: &ColorConfig, theme: Theme) -> String {
    let scheme = colors.scheme(theme);
    format!(
        r#":root {{
    color-scheme: {theme};
    --color-bg: {bg};
    --color-text: {text};
    --color-text-muted: {muted};
    --color-accent: {accent};
    --color-overlay: {overlay};
}}"#,
        theme = theme,
        bg = scheme.background,
        text = scheme.text,
        muted = scheme.text_muted,
        accent = scheme.accent,
        overlay = scheme.overlay,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_gallery() {
        let config = SiteConfig::default();
        assert_eq!(config.carousel, CarouselSettings::gallery());
        assert_eq!(config.carousel.autoplay_interval_ms, 4000);
        assert_eq!(config.carousel.transition_ms, 300);
        assert_eq!(config.carousel.swipe_threshold_px, 50.0);
    }

    #[test]
    fn hero_preset_disables_touch_and_viewer_navigation() {
        let hero = CarouselSettings::hero();
        assert!(!hero.enable_touch);
        assert!(!hero.lightbox_navigation);
        assert!(hero.enable_lightbox);
        assert_eq!(hero.zoom_controls, ZoomControls::Buttons);
    }

    #[test]
    fn as_hero_keeps_configured_timing() {
        let mut gallery = CarouselSettings::gallery();
        gallery.autoplay_interval_ms = 6000;
        gallery.zoom_controls = ZoomControls::Slider;
        let hero = gallery.as_hero();
        assert_eq!(hero.autoplay_interval_ms, 6000);
        assert_eq!(hero.zoom_controls, ZoomControls::Slider);
        assert!(!hero.enable_touch);
        assert!(!hero.lightbox_navigation);
    }

    #[test]
    fn default_lightbox_limits() {
        let l = LightboxConfig::default();
        assert_eq!((l.min_zoom, l.max_zoom), (1.0, 4.0));
        assert_eq!(l.fallback_image, "/fallback-image.jpg");
    }

    #[test]
    fn timing_converts_to_durations() {
        let t = CarouselSettings::default().timing();
        assert_eq!(t.transition, Duration::from_millis(300));
        assert_eq!(t.autoplay_interval, Duration::from_millis(4000));
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[carousel]
zoom_controls = "slider"
enable_touch = false
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.carousel.zoom_controls, ZoomControls::Slider);
        assert!(!config.carousel.enable_touch);
        // Unspecified values keep defaults
        assert_eq!(config.carousel.autoplay_interval_ms, 4000);
        assert_eq!(config.lightbox.max_zoom, 4.0);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[carousel]
transition_ms = 700

[theme]
default = "dark"

[colors.dark]
accent = "#ff0000"
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.carousel.transition_ms, 700);
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.colors.dark.accent, "#ff0000");
        // Sibling keys survive the merge
        assert_eq!(config.colors.dark.background, "#1f2937");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not valid [[[").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = r#"
[carousel]
autoplay = 10
"#;
        assert!(toml::from_str::<SiteConfig>(toml).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        assert!(toml::from_str::<SiteConfig>("[messages]\nrelay = \"x\"\n").is_err());
    }

    #[test]
    fn unknown_zoom_controls_rejected() {
        assert!(toml::from_str::<SiteConfig>("[carousel]\nzoom_controls = \"pinch\"\n").is_err());
    }

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Value = toml::from_str("[a]\ny = 3\nz = 4\n").unwrap();
        let merged = merge_toml(base, overlay);
        let a = merged.get("a").unwrap();
        assert_eq!(a.get("x").unwrap().as_integer(), Some(1));
        assert_eq!(a.get("y").unwrap().as_integer(), Some(3));
        assert_eq!(a.get("z").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let merged = merge_toml(toml::Value::Integer(1), toml::Value::Integer(2));
        assert_eq!(merged.as_integer(), Some(2));
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_zero_interval() {
        let mut config = SiteConfig::default();
        config.carousel.autoplay_interval_ms = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_zoom_range() {
        let mut config = SiteConfig::default();
        config.lightbox.min_zoom = 5.0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.lightbox.min_zoom = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_steps_and_frame() {
        let mut config = SiteConfig::default();
        config.lightbox.wheel_step = 0.0;
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.lightbox.frame = [0, 768];
        assert!(config.validate().is_err());

        let mut config = SiteConfig::default();
        config.carousel.swipe_threshold_px = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_numbers() {
        let cases: [fn(&mut SiteConfig, f64); 6] = [
            |c, v| c.carousel.swipe_threshold_px = v,
            |c, v| c.lightbox.min_zoom = v,
            |c, v| c.lightbox.max_zoom = v,
            |c, v| c.lightbox.zoom_step = v,
            |c, v| c.lightbox.wheel_step = v,
            |c, v| c.lightbox.fallback_pan_px = v,
        ];
        for (i, set) in cases.iter().enumerate() {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut config = SiteConfig::default();
                set(&mut config, value);
                assert!(
                    matches!(config.validate(), Err(ConfigError::Validation(_))),
                    "case {i} accepted {value}"
                );
            }
        }
    }

    #[test]
    fn non_finite_values_in_file_are_rejected() {
        for body in [
            "[lightbox]\nmax_zoom = nan\n",
            "[lightbox]\nfallback_pan_px = inf\n",
            "[carousel]\nswipe_threshold_px = inf\n",
        ] {
            let tmp = TempDir::new().unwrap();
            fs::write(tmp.path().join("config.toml"), body).unwrap();
            assert!(
                matches!(load_config(tmp.path()), Err(ConfigError::Validation(_))),
                "accepted {body:?}"
            );
        }
    }

    #[test]
    fn counter_start_date_must_be_a_date() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[counter]\nstart_date = \"April 6\"\n",
        )
        .unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Validation(_))));

        fs::write(
            tmp.path().join("config.toml"),
            "[counter]\nstart_date = \"2025-04-06\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.counter.start_date.as_deref(), Some("2025-04-06"));
        assert_eq!(config.counter.note, "Our special day");
    }

    #[test]
    fn validate_empty_fallback_image() {
        let mut config = SiteConfig::default();
        config.lightbox.fallback_image = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validation_error_surfaces_through_load() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[lightbox]\nmax_zoom = 0.5\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn color_css_uses_theme_scheme() {
        let colors = ColorConfig::default();
        let light = generate_color_css(&colors, Theme::Light);
        assert!(light.contains("--color-bg: #ffffff"));
        assert!(light.contains("color-scheme: light"));

        let dark = generate_color_css(&colors, Theme::Dark);
        assert!(dark.contains("--color-bg: #1f2937"));
        assert!(dark.contains("--color-overlay: rgba(0, 0, 0, 0.95)"));
    }
}
