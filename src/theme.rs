//! Light/dark theme preference with change notification.
//!
//! # Design
//!
//! [`ThemeStore`] is a cheap, cloneable handle to one shared value. Every
//! part of the page that cares about the theme subscribes once and is told
//! about changes, instead of having the value threaded through each call.
//! The carousel itself never subscribes: renderers read the current value
//! and pass it down as a plain [`Theme`].
//!
//! # Invariants
//!
//! 1. `version()` increments by exactly 1 on each value-changing `set`.
//! 2. Setting the current value again is a no-op (no notification).
//! 3. Subscribers are notified in registration order.
//! 4. A dropped [`Subscription`] is never called again.
//!
//! # Persistence
//!
//! The preference is stored as `{"theme": "dark"}`. A missing or unreadable
//! file falls back to the configured default rather than failing.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown theme {0:?} (expected \"light\" or \"dark\")")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ThemeError::Unknown(s.to_string())),
        }
    }
}

type Callback = Rc<dyn Fn(Theme)>;

struct StoreInner {
    theme: Theme,
    version: u64,
    subscribers: Vec<Weak<dyn Fn(Theme)>>,
}

/// Shared theme value. Clones point at the same state.
#[derive(Clone)]
pub struct ThemeStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ThemeStore")
            .field("theme", &inner.theme)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreference {
    theme: Theme,
}

impl ThemeStore {
    pub fn new(theme: Theme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                theme,
                version: 0,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Load a saved preference, or start from `default`.
    pub fn load(path: &Path, default: Theme) -> Self {
        let theme = std::fs::read_to_string(path)
            .ok()
            .and_then(|s| serde_json::from_str::<StoredPreference>(&s).ok())
            .map(|p| p.theme)
            .unwrap_or(default);
        Self::new(theme)
    }

    pub fn save(&self, path: &Path) -> Result<(), ThemeError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredPreference { theme: self.get() })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self) -> Theme {
        self.inner.borrow().theme
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn set(&self, theme: Theme) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.theme == theme {
                return;
            }
            inner.theme = theme;
            inner.version += 1;
        }
        tracing::debug!(%theme, "theme changed");
        self.notify(theme);
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    /// Register a callback for theme changes. Dropping the returned guard
    /// unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(Theme) + 'static) -> Subscription {
        let strong: Callback = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.push(Rc::downgrade(&strong));
        Subscription { _callback: strong }
    }

    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.subscribers.retain(|w| w.strong_count() > 0);
        inner.subscribers.len()
    }

    fn notify(&self, theme: Theme) {
        // Collect first so callbacks can read the store without a borrow conflict.
        let callbacks: Vec<Callback> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        for cb in callbacks {
            cb(theme);
        }
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// RAII guard returned by [`ThemeStore::subscribe`].
pub struct Subscription {
    _callback: Callback,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[test]
    fn parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!(matches!("sepia".parse::<Theme>(), Err(ThemeError::Unknown(_))));
        assert_eq!(Theme::Dark.to_string(), "dark");
    }

    #[test]
    fn toggle_flips_and_bumps_version() {
        let store = ThemeStore::new(Theme::Light);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn setting_same_value_is_noop() {
        let store = ThemeStore::new(Theme::Dark);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| seen.set(seen.get() + 1));
        store.set(Theme::Dark);
        assert_eq!(calls.get(), 0);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn subscribers_notified_in_order() {
        let store = ThemeStore::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&log);
        let b = Rc::clone(&log);
        let _s1 = store.subscribe(move |t| a.borrow_mut().push(format!("a:{t}")));
        let _s2 = store.subscribe(move |t| b.borrow_mut().push(format!("b:{t}")));
        store.toggle();
        assert_eq!(*log.borrow(), vec!["a:dark", "b:dark"]);
    }

    #[test]
    fn dropped_subscription_is_not_called() {
        let store = ThemeStore::default();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let sub = store.subscribe(move |_| seen.set(seen.get() + 1));
        store.toggle();
        drop(sub);
        store.toggle();
        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn resubscribing_without_changes_does_not_grow() {
        let store = ThemeStore::default();
        for _ in 0..100 {
            let _sub = store.subscribe(|_| {});
        }
        let _live = store.subscribe(|_| {});
        assert_eq!(store.inner.borrow().subscribers.len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = ThemeStore::default();
        let other = store.clone();
        other.set(Theme::Dark);
        assert_eq!(store.get(), Theme::Dark);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("state/theme.json");
        ThemeStore::new(Theme::Dark).save(&path).unwrap();
        assert_eq!(ThemeStore::load(&path, Theme::Light).get(), Theme::Dark);
    }

    #[test]
    fn load_missing_or_corrupt_uses_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("theme.json");
        assert_eq!(ThemeStore::load(&path, Theme::Dark).get(), Theme::Dark);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(ThemeStore::load(&path, Theme::Light).get(), Theme::Light);
    }
}
