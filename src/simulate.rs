//! Replay a scripted sequence of user inputs against a carousel.
//!
//! A script is a TOML file:
//!
//! ```toml
//! until_ms = 12000
//!
//! [[step]]
//! at_ms = 500
//! input = { kind = "hover-enter" }
//!
//! [[step]]
//! at_ms = 900
//! input = { kind = "touch", start_x = 200.0, end_x = 140.0 }
//! ```
//!
//! Steps are applied at their virtual timestamps. Between steps, pending
//! timers fire one deadline at a time so each event in the [`Trace`] carries
//! the instant it actually happened.

use crate::carousel::{Carousel, CarouselEvent, CarouselView, Input};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid script: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Virtual time to run until after the last step.
    pub until_ms: u64,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub at_ms: u64,
    pub input: Input,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(content)?)
    }

    /// Check step ordering, timing and slide indices against a reel of
    /// `slide_count` slides.
    pub fn validate(&self, slide_count: usize) -> Result<(), ScriptError> {
        let mut last = 0;
        for (i, step) in self.steps.iter().enumerate() {
            let n = i + 1;
            if step.at_ms < last {
                return Err(ScriptError::Invalid(format!(
                    "step {n} at {}ms is earlier than the step before it ({last}ms)",
                    step.at_ms
                )));
            }
            if step.at_ms > self.until_ms {
                return Err(ScriptError::Invalid(format!(
                    "step {n} at {}ms is after until_ms ({}ms)",
                    step.at_ms, self.until_ms
                )));
            }
            if let Some(index) = slide_index(&step.input).filter(|&i| i >= slide_count) {
                return Err(ScriptError::Invalid(format!(
                    "step {n} refers to slide {index}, but the reel has {slide_count} slides"
                )));
            }
            last = step.at_ms;
        }
        Ok(())
    }
}

fn slide_index(input: &Input) -> Option<usize> {
    match input {
        Input::GoTo { index } => Some(*index),
        Input::Activate { slide } | Input::ImageError { slide } => Some(*slide),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceEntry {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: CarouselEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    pub entries: Vec<TraceEntry>,
    pub final_view: CarouselView,
}

impl Trace {
    /// Events only, without timestamps.
    pub fn events(&self) -> Vec<&CarouselEvent> {
        self.entries.iter().map(|e| &e.event).collect()
    }
}

/// Validate `script` against the carousel, then run it to `until_ms`.
pub fn run(carousel: &mut Carousel, script: &Script) -> Result<Trace, ScriptError> {
    script.validate(carousel.len())?;
    let mut entries = Vec::new();
    record(carousel, &mut entries);

    for step in &script.steps {
        advance_recording(carousel, Duration::from_millis(step.at_ms), &mut entries);
        tracing::debug!(at_ms = step.at_ms, input = ?step.input, "step");
        carousel.handle(step.input.clone());
        record(carousel, &mut entries);
    }
    advance_recording(carousel, Duration::from_millis(script.until_ms), &mut entries);

    tracing::info!(
        events = entries.len(),
        until_ms = script.until_ms,
        "simulation finished"
    );
    Ok(Trace {
        entries,
        final_view: carousel.view(),
    })
}

fn advance_recording(carousel: &mut Carousel, target: Duration, entries: &mut Vec<TraceEntry>) {
    while let Some(deadline) = carousel.next_deadline().filter(|d| *d <= target) {
        carousel.advance_to(deadline);
        record(carousel, entries);
    }
    carousel.advance_to(target);
}

fn record(carousel: &mut Carousel, entries: &mut Vec<TraceEntry>) {
    let at_ms = carousel.now().as_millis() as u64;
    entries.extend(
        carousel
            .drain_events()
            .into_iter()
            .map(|event| TraceEntry { at_ms, event }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn parses_steps_with_inputs() {
        let script = Script::parse(
            r#"
until_ms = 5000

[[step]]
at_ms = 100
input = { kind = "go-to", index = 2 }

[[step]]
at_ms = 200
input = { kind = "key", key = "arrow-left" }

[[step]]
at_ms = 300
input = { kind = "wheel", delta_y = -120.0 }
"#,
        )
        .unwrap();
        assert_eq!(script.until_ms, 5000);
        assert_eq!(script.steps[0].input, Input::GoTo { index: 2 });
        assert_eq!(
            script.steps[1].input,
            Input::Key {
                key: crate::carousel::Key::ArrowLeft
            }
        );
        assert_eq!(script.steps[2].input, Input::Wheel { delta_y: -120.0 });
    }

    #[test]
    fn unknown_kind_is_parse_error() {
        let err = Script::parse(
            "until_ms = 10\n[[step]]\nat_ms = 0\ninput = { kind = \"teleport\" }\n",
        )
        .unwrap_err();
        assert!(matches!(err, ScriptError::Toml(_)));
    }

    #[test]
    fn script_without_steps_is_valid() {
        let script = Script::parse("until_ms = 100").unwrap();
        assert!(script.steps.is_empty());
        assert!(script.validate(1).is_ok());
    }

    #[test]
    fn rejects_out_of_order_steps() {
        let script = Script::parse(
            "until_ms = 1000\n[[step]]\nat_ms = 500\ninput = { kind = \"next\" }\n[[step]]\nat_ms = 100\ninput = { kind = \"next\" }\n",
        )
        .unwrap();
        let err = script.validate(3).unwrap_err();
        assert!(err.to_string().contains("step 2"));
    }

    #[test]
    fn rejects_steps_after_end() {
        let script =
            Script::parse("until_ms = 100\n[[step]]\nat_ms = 200\ninput = { kind = \"next\" }\n")
                .unwrap();
        assert!(matches!(script.validate(3), Err(ScriptError::Invalid(_))));
    }

    #[test]
    fn rejects_bad_slide_index() {
        let script = Script::parse(
            "until_ms = 100\n[[step]]\nat_ms = 0\ninput = { kind = \"activate\", slide = 3 }\n",
        )
        .unwrap();
        assert!(script.validate(4).is_ok());
        let err = script.validate(3).unwrap_err();
        assert!(err.to_string().contains("slide 3"));
    }

    #[test]
    fn run_timestamps_autoplay_events() {
        let mut c = gallery(3);
        let script = Script::parse("until_ms = 8700").unwrap();
        let trace = run(&mut c, &script).unwrap();
        let stamped: Vec<(u64, &CarouselEvent)> =
            trace.entries.iter().map(|e| (e.at_ms, &e.event)).collect();
        assert_eq!(
            stamped,
            vec![
                (4000, &CarouselEvent::TransitionStarted { from: 0, to: 1 }),
                (4300, &CarouselEvent::SlideChanged { index: 1 }),
                (8300, &CarouselEvent::TransitionStarted { from: 1, to: 2 }),
                (8600, &CarouselEvent::SlideChanged { index: 2 }),
            ]
        );
        assert_eq!(trace.final_view.current, 2);
    }

    #[test]
    fn run_applies_steps_in_order() {
        let mut c = gallery(4);
        let script = Script::parse(
            r#"
until_ms = 10000

[[step]]
at_ms = 100
input = { kind = "hover-enter" }

[[step]]
at_ms = 200
input = { kind = "activate", slide = 0 }

[[step]]
at_ms = 300
input = { kind = "zoom-in" }

[[step]]
at_ms = 400
input = { kind = "close" }
"#,
        )
        .unwrap();
        let trace = run(&mut c, &script).unwrap();
        let events = trace.events();
        assert_eq!(events[0], &CarouselEvent::AutoplayPaused);
        assert_eq!(events[1], &CarouselEvent::LightboxOpened { slide: 0 });
        assert_eq!(events[2], &CarouselEvent::ZoomChanged { level: 1.1 });
        assert_eq!(events[3], &CarouselEvent::LightboxClosed);
        assert_eq!(events[4], &CarouselEvent::AutoplayResumed);
        // Close re-armed a full interval from 400ms.
        assert_eq!(trace.entries[5].at_ms, 4400);
        assert!(trace.final_view.lightbox.is_none());
    }

    #[test]
    fn run_rejects_invalid_script_before_touching_carousel() {
        let mut c = gallery(2);
        let script = Script::parse(
            "until_ms = 100\n[[step]]\nat_ms = 0\ninput = { kind = \"go-to\", index = 7 }\n",
        )
        .unwrap();
        assert!(run(&mut c, &script).is_err());
        assert_eq!(c.now(), Duration::ZERO);
    }

    #[test]
    fn trace_serializes_flat_entries() {
        let mut c = gallery(2);
        let trace = run(&mut c, &Script::parse("until_ms = 4300").unwrap()).unwrap();
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["entries"][0]["at_ms"], 4000);
        assert_eq!(json["entries"][0]["event"], "transition-started");
        assert_eq!(json["entries"][1]["index"], 1);
    }
}
