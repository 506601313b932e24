//! The carousel: one configurable component for both the hero rotator and
//! the moments gallery.
//!
//! # Architecture
//!
//! ```text
//!   host input ──▶ Carousel::handle ──▶ SlideSequencer (which index)
//!                        │                     ▲
//!                        ▼                     │ commit
//!               TransitionCoordinator ──▶ Scheduler (virtual timers)
//!                        │
//!                        ▼
//!                 Option<Lightbox>  (zoom / pan, only while open)
//! ```
//!
//! The sequencer is the source of truth for the visible slide. Every index
//! change is requested through the coordinator, which drops requests inside
//! the transition window and re-arms autoplay after each commit. The lightbox
//! reads the visible index when opened and never writes it.
//!
//! Time only moves when the host calls [`Carousel::advance`]. Observable
//! changes are queued as [`CarouselEvent`]s and collected with
//! [`Carousel::drain_events`]; [`Carousel::view`] returns a snapshot for
//! rendering.
//!
//! # Capability flags
//!
//! [`CarouselSettings`] switches features per call site: lightbox on/off,
//! touch swipes, in-lightbox navigation, and the zoom control style.
//! Inputs for a disabled feature are ignored.

use crate::config::{CarouselSettings, LightboxConfig, SiteConfig, ZoomControls};
use crate::gesture::{Swipe, SwipeTracker};
use crate::lightbox::{Lightbox, rendered_size};
use crate::sequencer::{CarouselError, SlideSequencer, wrap_backward, wrap_forward};
use crate::timer::{Scheduler, TimerKind};
use crate::transition::{Navigation, TransitionCoordinator};
use crate::types::{Point, Slide};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Everything the host page can tell the carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Input {
    /// Next button.
    Next,
    /// Previous button.
    Previous,
    /// Indicator dot.
    GoTo { index: usize },
    HoverEnter,
    HoverLeave,
    /// The carousel region gained keyboard focus.
    Focus,
    Blur,
    Key { key: Key },
    /// A slide was clicked.
    Activate { slide: usize },
    /// Click outside the lightbox image frame.
    BackdropClick,
    /// Lightbox close button.
    Close,
    Wheel { delta_y: f64 },
    ZoomIn,
    ZoomOut,
    ZoomSlider { value: f64 },
    ResetZoom,
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    TouchStart { x: f64 },
    TouchMove { x: f64 },
    TouchEnd,
    /// A complete touch gesture: start, one move, end.
    Touch { start_x: f64, end_x: f64 },
    /// The image for `slide` failed to load.
    ImageError { slide: usize },
    /// The lightbox image frame changed size.
    ResizeFrame { width: u32, height: u32 },
    LightboxNext,
    LightboxPrevious,
}

/// Observable changes, in the order they happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum CarouselEvent {
    TransitionStarted { from: usize, to: usize },
    SlideChanged { index: usize },
    NavigationDropped { requested: usize },
    AutoplayPaused,
    AutoplayResumed,
    LightboxOpened { slide: usize },
    LightboxSlideChanged { slide: usize },
    LightboxClosed,
    ZoomChanged { level: f64 },
    Panned { x: f64, y: f64 },
    ImageFallback { slide: usize },
}

#[derive(Debug)]
pub struct Carousel {
    settings: CarouselSettings,
    lightbox_config: LightboxConfig,
    sequencer: SlideSequencer,
    coordinator: TransitionCoordinator,
    scheduler: Scheduler,
    swipe: SwipeTracker,
    lightbox: Option<Lightbox>,
    frame: (u32, u32),
    hovered: bool,
    focused: bool,
    failed: BTreeSet<usize>,
    events: Vec<CarouselEvent>,
}

impl Carousel {
    /// Build a carousel from a reel's slides and config. Autoplay is armed
    /// immediately.
    pub fn new(slides: Vec<Slide>, config: &SiteConfig) -> Result<Self, CarouselError> {
        Self::with_settings(slides, config.carousel.clone(), config.lightbox.clone())
    }

    pub fn with_settings(
        slides: Vec<Slide>,
        settings: CarouselSettings,
        lightbox_config: LightboxConfig,
    ) -> Result<Self, CarouselError> {
        let sequencer = SlideSequencer::new(slides)?;
        let mut scheduler = Scheduler::new();
        let mut coordinator = TransitionCoordinator::new(settings.timing());
        coordinator.start(&mut scheduler);
        Ok(Self {
            swipe: SwipeTracker::new(settings.swipe_threshold_px),
            frame: (lightbox_config.frame[0], lightbox_config.frame[1]),
            settings,
            lightbox_config,
            sequencer,
            coordinator,
            scheduler,
            lightbox: None,
            hovered: false,
            focused: false,
            failed: BTreeSet::new(),
            events: Vec::new(),
        })
    }

    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next timer fires, if any is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn len(&self) -> usize {
        self.sequencer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequencer.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        self.sequencer.slides()
    }

    pub fn current_index(&self) -> usize {
        self.sequencer.current_index()
    }

    pub fn current_slide(&self) -> &Slide {
        self.sequencer.current_slide()
    }

    pub fn is_transitioning(&self) -> bool {
        self.coordinator.is_transitioning()
    }

    pub fn is_paused(&self) -> bool {
        self.coordinator.is_paused()
    }

    /// Whether the pointer is over the carousel.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn lightbox(&self) -> Option<&Lightbox> {
        self.lightbox.as_ref()
    }

    pub fn is_lightbox_open(&self) -> bool {
        self.lightbox.is_some()
    }

    /// Image reference to display for a slide, after load failures.
    pub fn display_source(&self, index: usize) -> &str {
        match self.sequencer.slide(index) {
            Some(_) if self.failed.contains(&index) => &self.lightbox_config.fallback_image,
            Some(slide) => &slide.source,
            None => &self.lightbox_config.fallback_image,
        }
    }

    pub fn is_failed(&self, index: usize) -> bool {
        self.failed.contains(&index)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    pub fn next(&mut self) -> Navigation {
        let to = self.sequencer.next_index();
        self.navigate(to)
    }

    pub fn previous(&mut self) -> Navigation {
        let to = self.sequencer.previous_index();
        self.navigate(to)
    }

    pub fn go_to(&mut self, index: usize) -> Navigation {
        let to = self.sequencer.checked_target(index);
        self.navigate(to)
    }

    fn navigate(&mut self, to: usize) -> Navigation {
        let from = self.sequencer.current_index();
        let outcome = self.coordinator.request(&mut self.scheduler, from, to);
        self.events.push(match outcome {
            Navigation::Started { from, to } => CarouselEvent::TransitionStarted { from, to },
            Navigation::Dropped => CarouselEvent::NavigationDropped { requested: to },
        });
        outcome
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Move virtual time forward by `elapsed`, firing every timer that comes
    /// due on the way, in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.scheduler.now() + elapsed;
        self.advance_to(target);
    }

    /// Move virtual time forward to an absolute instant.
    pub fn advance_to(&mut self, instant: Duration) {
        while let Some((id, kind)) = self.scheduler.pop_due(instant) {
            match kind {
                TimerKind::CommitTransition => {
                    if let Some(index) = self.coordinator.on_commit(&mut self.scheduler, id) {
                        self.sequencer.commit(index);
                        self.events.push(CarouselEvent::SlideChanged { index });
                    }
                }
                TimerKind::Autoplay => {
                    if self.coordinator.on_autoplay(id) {
                        tracing::debug!(at_ms = self.now().as_millis() as u64, "autoplay tick");
                        self.next();
                    }
                }
            }
        }
        self.scheduler.advance_to(instant);
    }

    // ------------------------------------------------------------------
    // Pause / resume
    // ------------------------------------------------------------------

    fn pause(&mut self) {
        if self.coordinator.pause(&mut self.scheduler) {
            self.events.push(CarouselEvent::AutoplayPaused);
        }
    }

    fn resume(&mut self) {
        if self.coordinator.resume(&mut self.scheduler) {
            self.events.push(CarouselEvent::AutoplayResumed);
        }
    }

    // ------------------------------------------------------------------
    // Lightbox
    // ------------------------------------------------------------------

    /// Open the lightbox on `slide`. Returns `false` when the lightbox is
    /// disabled for this carousel.
    pub fn open_lightbox(&mut self, slide: usize) -> bool {
        if !self.settings.enable_lightbox {
            return false;
        }
        let slide = self.sequencer.checked_target(slide);
        self.swipe.cancel();
        self.pause();
        let rendered = self.rendered_size_of(slide);
        self.lightbox = Some(Lightbox::open(
            slide,
            rendered,
            self.lightbox_config.zoom_policy(),
        ));
        self.events.push(CarouselEvent::LightboxOpened { slide });
        true
    }

    /// Close the lightbox and resume autoplay. Returns `false` if it was
    /// not open.
    pub fn close_lightbox(&mut self) -> bool {
        if self.lightbox.take().is_none() {
            return false;
        }
        self.events.push(CarouselEvent::LightboxClosed);
        self.resume();
        true
    }

    fn rendered_size_of(&self, slide: usize) -> Option<(f64, f64)> {
        if self.failed.contains(&slide) {
            return None;
        }
        self.sequencer
            .slide(slide)
            .and_then(|s| s.dimensions)
            .map(|natural| rendered_size(natural, self.frame))
    }

    fn step_lightbox(&mut self, forward: bool) {
        if !self.settings.lightbox_navigation {
            return;
        }
        let len = self.sequencer.len();
        let Some(current) = self.lightbox.as_ref().map(Lightbox::open_slide) else {
            return;
        };
        let slide = if forward {
            wrap_forward(current, len)
        } else {
            wrap_backward(current, len)
        };
        let rendered = self.rendered_size_of(slide);
        if let Some(lb) = self.lightbox.as_mut() {
            lb.show(slide, rendered);
            self.events.push(CarouselEvent::LightboxSlideChanged { slide });
        }
    }

    fn zoom_by(&mut self, delta: f64) {
        if let Some(lb) = self.lightbox.as_mut() {
            let before = lb.zoom();
            let level = lb.set_zoom(delta);
            if level != before {
                self.events.push(CarouselEvent::ZoomChanged { level });
            }
        }
    }

    fn zoom_to(&mut self, value: f64) {
        if let Some(lb) = self.lightbox.as_mut() {
            let before = lb.zoom();
            let level = lb.set_zoom_level(value);
            if level != before {
                self.events.push(CarouselEvent::ZoomChanged { level });
            }
        }
    }

    // ------------------------------------------------------------------
    // Input dispatch
    // ------------------------------------------------------------------

    pub fn handle(&mut self, input: Input) {
        let open = self.lightbox.is_some();
        let zoom_controls = self.settings.zoom_controls;
        match input {
            Input::Next => {
                self.next();
            }
            Input::Previous => {
                self.previous();
            }
            Input::GoTo { index } => {
                self.go_to(index);
            }
            Input::HoverEnter => {
                self.hovered = true;
                self.pause();
            }
            Input::HoverLeave => {
                self.hovered = false;
                if !open {
                    self.resume();
                }
            }
            Input::Focus => self.focused = true,
            Input::Blur => self.focused = false,
            Input::Key { key } => self.handle_key(key),
            Input::Activate { slide } => {
                self.open_lightbox(slide);
            }
            Input::BackdropClick | Input::Close => {
                self.close_lightbox();
            }
            Input::Wheel { delta_y } if open && zoom_controls.zoom_enabled() => {
                let step = self.lightbox_config.wheel_step;
                if delta_y > 0.0 {
                    self.zoom_by(-step);
                } else if delta_y < 0.0 {
                    self.zoom_by(step);
                }
            }
            Input::ZoomIn if zoom_controls == ZoomControls::Buttons => {
                self.zoom_by(self.lightbox_config.zoom_step);
            }
            Input::ZoomOut if zoom_controls == ZoomControls::Buttons => {
                self.zoom_by(-self.lightbox_config.zoom_step);
            }
            Input::ZoomSlider { value } if zoom_controls == ZoomControls::Slider => {
                self.zoom_to(value);
            }
            Input::ResetZoom if zoom_controls.zoom_enabled() => {
                let min = self.lightbox_config.min_zoom;
                self.zoom_to(min);
                if let Some(lb) = self.lightbox.as_mut() {
                    lb.reset_zoom();
                }
            }
            Input::PointerDown { x, y } => {
                if let Some(lb) = self.lightbox.as_mut() {
                    lb.begin_pan(Point::new(x, y));
                }
            }
            Input::PointerMove { x, y } => {
                let moved = self
                    .lightbox
                    .as_mut()
                    .filter(|lb| lb.is_dragging())
                    .and_then(|lb| lb.update_pan(Point::new(x, y)).then(|| lb.pan()));
                if let Some(pan) = moved {
                    tracing::trace!(x = pan.x, y = pan.y, "panned");
                    self.events.push(CarouselEvent::Panned { x: pan.x, y: pan.y });
                }
            }
            Input::PointerUp | Input::PointerLeave => {
                if let Some(lb) = self.lightbox.as_mut() {
                    lb.end_pan();
                }
            }
            Input::TouchStart { x } if self.touch_active() => self.swipe.touch_start(x),
            Input::TouchMove { x } if self.touch_active() => self.swipe.touch_move(x),
            Input::TouchEnd if self.touch_active() => self.finish_swipe(),
            Input::Touch { start_x, end_x } if self.touch_active() => {
                self.swipe.touch_start(start_x);
                self.swipe.touch_move(end_x);
                self.finish_swipe();
            }
            Input::ImageError { slide } => self.mark_failed(slide),
            Input::ResizeFrame { width, height } => {
                self.frame = (width.max(1), height.max(1));
                if let Some(slide) = self.lightbox.as_ref().map(Lightbox::open_slide) {
                    let rendered = self.rendered_size_of(slide);
                    if let Some(lb) = self.lightbox.as_mut() {
                        lb.set_rendered(rendered);
                    }
                }
            }
            Input::LightboxNext => self.step_lightbox(true),
            Input::LightboxPrevious => self.step_lightbox(false),
            // Disabled capability or closed lightbox.
            Input::Wheel { .. }
            | Input::ZoomIn
            | Input::ZoomOut
            | Input::ZoomSlider { .. }
            | Input::ResetZoom
            | Input::TouchStart { .. }
            | Input::TouchMove { .. }
            | Input::TouchEnd
            | Input::Touch { .. } => {}
        }
    }

    fn handle_key(&mut self, key: Key) {
        if self.lightbox.is_some() {
            match key {
                Key::Escape => {
                    self.close_lightbox();
                }
                Key::ArrowLeft => self.step_lightbox(false),
                Key::ArrowRight => self.step_lightbox(true),
            }
            return;
        }
        if !self.focused {
            return;
        }
        match key {
            Key::ArrowLeft => {
                self.previous();
            }
            Key::ArrowRight => {
                self.next();
            }
            Key::Escape => {}
        }
    }

    fn touch_active(&self) -> bool {
        self.settings.enable_touch && self.lightbox.is_none()
    }

    fn finish_swipe(&mut self) {
        match self.swipe.touch_end() {
            Some(Swipe::Next) => {
                self.next();
            }
            Some(Swipe::Previous) => {
                self.previous();
            }
            None => {}
        }
    }

    fn mark_failed(&mut self, slide: usize) {
        let Some(source) = self.sequencer.slide(slide).map(|s| s.source.clone()) else {
            return;
        };
        if self.failed.insert(slide) {
            tracing::warn!(slide, %source, "image failed to load, using fallback");
            self.events.push(CarouselEvent::ImageFallback { slide });
            if let Some(lb) = self.lightbox.as_mut().filter(|lb| lb.open_slide() == slide) {
                lb.set_rendered(None);
            }
        }
    }

    /// Take all events queued since the last call.
    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        std::mem::take(&mut self.events)
    }

    // ------------------------------------------------------------------
    // View
    // ------------------------------------------------------------------

    pub fn view(&self) -> CarouselView {
        let current = self.sequencer.current_index();
        let slides: Vec<SlideView> = (0..self.sequencer.len())
            .map(|i| self.slide_view(i, i == current))
            .collect();
        let indicators = (0..self.sequencer.len())
            .map(|index| Indicator {
                index,
                active: index == current,
            })
            .collect();
        let lightbox = self.lightbox.as_ref().map(|lb| LightboxView {
            slide: self.slide_view(lb.open_slide(), true),
            position: format!("{} / {}", lb.open_slide() + 1, self.sequencer.len()),
            zoom: lb.zoom(),
            pan: lb.pan(),
            is_dragging: lb.is_dragging(),
            zoom_controls: self.settings.zoom_controls,
            min_zoom: self.lightbox_config.min_zoom,
            max_zoom: self.lightbox_config.max_zoom,
            navigation: self.settings.lightbox_navigation,
        });
        CarouselView {
            current,
            slides,
            indicators,
            is_transitioning: self.coordinator.is_transitioning(),
            is_paused: self.coordinator.is_paused(),
            scroll_locked: lightbox.is_some(),
            lightbox,
            touch: self.settings.enable_touch,
        }
    }

    fn slide_view(&self, index: usize, visible: bool) -> SlideView {
        let slide = &self.sequencer.slides()[index];
        SlideView {
            index,
            source: self.display_source(index).to_string(),
            alt: slide.alt.clone(),
            caption: slide.caption.clone(),
            date: slide.date.clone(),
            time: slide.time.clone(),
            visible,
            failed: self.failed.contains(&index),
        }
    }
}

/// Render-ready snapshot of a carousel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselView {
    pub current: usize,
    pub slides: Vec<SlideView>,
    pub indicators: Vec<Indicator>,
    pub is_transitioning: bool,
    pub is_paused: bool,
    pub lightbox: Option<LightboxView>,
    /// The host should suppress background scrolling.
    pub scroll_locked: bool,
    pub touch: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideView {
    pub index: usize,
    /// Resolved source: the fallback image if the original failed.
    pub source: String,
    pub alt: String,
    pub caption: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub visible: bool,
    pub failed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LightboxView {
    pub slide: SlideView,
    /// `"3 / 4"`
    pub position: String,
    pub zoom: f64,
    pub pan: Point,
    pub is_dragging: bool,
    pub zoom_controls: ZoomControls,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub navigation: bool,
}
