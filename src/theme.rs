use serde::Serialize;
use serde_json::json;

use crate::config::THEME_KEY;
use crate::error::PageResult;
use crate::logging::{log_event, LogLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn toggle_label(self) -> String {
        let next = self.toggled().as_str();
        format!("Switch to {next} theme")
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSource {
    Stored,
    System,
    Default,
}

/// Key/value persistence for the theme flag (local storage in the browser).
pub trait PreferenceStore {
    fn read(&self, key: &str) -> PageResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> PageResult<()>;
}

/// The document-level switch that styles the page for a theme.
pub trait ThemeRoot {
    fn apply(&self, theme: Theme);
}

/// Stored value first, then the OS color scheme, then dark. `system_prefers_dark`
/// is `None` when the media query cannot be evaluated.
pub fn resolve(store: &impl PreferenceStore, system_prefers_dark: Option<bool>) -> (Theme, ThemeSource) {
    let stored = match store.read(THEME_KEY) {
        Ok(value) => value.as_deref().and_then(Theme::from_str),
        Err(error) => {
            log_event(
                LogLevel::Debug,
                "theme_storage_unreadable",
                json!({ "error": error.to_string() }),
            );
            None
        }
    };

    let resolved = match (stored, system_prefers_dark) {
        (Some(theme), _) => (theme, ThemeSource::Stored),
        (None, Some(true)) => (Theme::Dark, ThemeSource::System),
        (None, Some(false)) => (Theme::Light, ThemeSource::System),
        (None, None) => (Theme::Dark, ThemeSource::Default),
    };

    log_event(
        LogLevel::Info,
        "theme_resolved",
        json!({ "theme": resolved.0, "source": resolved.1 }),
    );
    resolved
}

/// Flips `current`, persists it with exactly one write and applies it to `root`.
pub fn toggle(current: Theme, store: &impl PreferenceStore, root: &impl ThemeRoot) -> Theme {
    let next = current.toggled();

    if let Err(error) = store.write(THEME_KEY, next.as_str()) {
        log_event(
            LogLevel::Warn,
            "theme_persist_failed",
            json!({ "theme": next, "error": error.to_string() }),
        );
    }

    root.apply(next);
    log_event(LogLevel::Info, "theme_toggled", json!({ "theme": next }));
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        values: RefCell<HashMap<String, String>>,
        writes: Cell<usize>,
    }

    impl MemoryStore {
        fn with(value: &str) -> Self {
            let store = Self::default();
            store
                .values
                .borrow_mut()
                .insert(THEME_KEY.to_string(), value.to_string());
            store
        }

        fn stored(&self) -> Option<String> {
            self.values.borrow().get(THEME_KEY).cloned()
        }
    }

    impl PreferenceStore for MemoryStore {
        fn read(&self, key: &str) -> PageResult<Option<String>> {
            Ok(self.values.borrow().get(key).cloned())
        }

        fn write(&self, key: &str, value: &str) -> PageResult<()> {
            self.writes.set(self.writes.get() + 1);
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct BlockedStore;

    impl PreferenceStore for BlockedStore {
        fn read(&self, _key: &str) -> PageResult<Option<String>> {
            Err(PageError::StorageUnavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> PageResult<()> {
            Err(PageError::StorageUnavailable)
        }
    }

    #[derive(Default)]
    struct RecordingRoot {
        applied: Cell<Option<Theme>>,
    }

    impl ThemeRoot for RecordingRoot {
        fn apply(&self, theme: Theme) {
            self.applied.set(Some(theme));
        }
    }

    #[test]
    fn stored_value_wins_over_system_preference() {
        let store = MemoryStore::with("light");
        assert_eq!(resolve(&store, Some(true)), (Theme::Light, ThemeSource::Stored));
    }

    #[test]
    fn system_preference_used_when_nothing_stored() {
        let store = MemoryStore::default();
        assert_eq!(resolve(&store, Some(false)), (Theme::Light, ThemeSource::System));
        assert_eq!(resolve(&store, Some(true)), (Theme::Dark, ThemeSource::System));
    }

    #[test]
    fn unknown_stored_value_is_ignored() {
        let store = MemoryStore::with("sepia");
        assert_eq!(resolve(&store, None), (Theme::Dark, ThemeSource::Default));
    }

    #[test]
    fn unavailable_storage_and_media_query_default_to_dark() {
        assert_eq!(resolve(&BlockedStore, None), (Theme::Dark, ThemeSource::Default));
    }

    #[test]
    fn toggle_writes_once_and_applies_to_root() {
        let store = MemoryStore::default();
        let root = RecordingRoot::default();

        let next = toggle(Theme::Dark, &store, &root);

        assert_eq!(next, Theme::Light);
        assert_eq!(store.writes.get(), 1);
        assert_eq!(store.stored().as_deref(), Some("light"));
        assert_eq!(root.applied.get(), Some(Theme::Light));
    }

    #[test]
    fn toggling_twice_restores_persisted_value_and_root_state() {
        let store = MemoryStore::with("dark");
        let root = RecordingRoot::default();
        let (initial, _) = resolve(&store, None);
        root.apply(initial);

        let once = toggle(initial, &store, &root);
        let twice = toggle(once, &store, &root);

        assert_eq!(twice, initial);
        assert_eq!(store.stored().as_deref(), Some("dark"));
        assert_eq!(root.applied.get(), Some(initial));
        assert_eq!(store.writes.get(), 2);
    }

    #[test]
    fn toggle_still_applies_when_storage_is_blocked() {
        let root = RecordingRoot::default();
        assert_eq!(toggle(Theme::Light, &BlockedStore, &root), Theme::Dark);
        assert_eq!(root.applied.get(), Some(Theme::Dark));
    }

    #[test]
    fn toggle_label_names_the_next_theme() {
        assert_eq!(Theme::Dark.toggle_label(), "Switch to light theme");
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::Dark.toggled().is_dark());
    }
}
