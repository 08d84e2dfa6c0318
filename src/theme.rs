//! Theme Store
//!
//! Dark/light preference, persisted as `"true"`/`"false"` and applied as the
//! `dark` class on the document root.

use std::sync::Arc;

use leptos::prelude::*;

use crate::config::THEME_KEY;
use crate::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn load(storage: &dyn KeyValueStore) -> Self {
        match storage.get(THEME_KEY).as_deref() {
            Some("true") => Self::Dark,
            _ => Self::Light,
        }
    }

    pub fn save(self, storage: &dyn KeyValueStore) {
        storage.set(THEME_KEY, if self.is_dark() { "true" } else { "false" });
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon for the toggle button (shows the theme you switch to)
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀",
        }
    }
}

fn apply_to_document(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    else {
        return;
    };
    if let Err(e) = root.class_list().toggle_with_force("dark", theme.is_dark()) {
        log::warn!("failed to apply theme: {:?}", e);
    }
}

#[derive(Clone, Copy)]
pub struct ThemeStore {
    theme: RwSignal<Theme>,
    storage: StoredValue<Arc<dyn KeyValueStore>>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let theme = Theme::load(storage.as_ref());
        apply_to_document(theme);
        Self {
            theme: RwSignal::new(theme),
            storage: StoredValue::new(storage),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn toggle(&self) {
        let next = self.theme.get_untracked().toggled();
        self.storage.with_value(|storage| next.save(storage.as_ref()));
        apply_to_document(next);
        self.theme.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_default_is_light() {
        let storage = MemoryStore::new();
        assert_eq!(Theme::load(&storage), Theme::Light);
        storage.set(THEME_KEY, "yes");
        assert_eq!(Theme::load(&storage), Theme::Light);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let storage = MemoryStore::new();
        Theme::Dark.save(&storage);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("true"));
        assert_eq!(Theme::load(&storage), Theme::Dark);
        Theme::Dark.toggled().save(&storage);
        assert_eq!(Theme::load(&storage), Theme::Light);
    }
}
