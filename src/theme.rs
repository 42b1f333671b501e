//! Dark/light theme preference persisted through a key-value store.

use crate::{Error, Result};
use log::warn;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key under which the preference is stored
pub const THEME_KEY: &str = "theme";

/// Minimal string key-value persistence
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, mainly for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let g = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".into()))?;
        Ok(g.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut g = self
            .entries
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".into()))?;
        g.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// A missing file reads as an empty store. Every `set` rewrites the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(HashMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _g = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".into()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _g = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("file store lock poisoned".into()))?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current theme plus the store it is persisted to.
///
/// The stored flag is read once on construction; only the exact string
/// `"dark"` selects the dark theme.
pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    is_dark: bool,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn load(store: S) -> Result<Self> {
        let is_dark = match store.get(THEME_KEY)? {
            Some(v) if v == Theme::Dark.as_str() => true,
            Some(v) if v == Theme::Light.as_str() => false,
            Some(v) => {
                warn!("unknown theme preference {:?}; using light", v);
                false
            }
            None => false,
        };
        Ok(Self { store, is_dark })
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub fn theme(&self) -> Theme {
        if self.is_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flip the theme and persist the new flag. The in-memory flag only
    /// changes when the write succeeds.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme().toggled();
        self.store.set(THEME_KEY, next.as_str())?;
        self.is_dark = next == Theme::Dark;
        Ok(next)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
