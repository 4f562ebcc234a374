//! Persisted user settings.
//!
//! The engine reads and writes a handful of string keys through
//! [`SettingsStore`]. [`MemorySettings`] keeps them in process;
//! [`FileSettings`] keeps them in a flat TOML file so they survive restarts.

use crate::display::{CardOrientation, DisplayConfig, LayoutOrientation};
use crate::error::SettingsError;
use crate::event::BoardAction;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Board orientation, `portrait` or `landscape`.
pub const LAYOUT_KEY: &str = "layout";
/// Card rotation, `vertical` or `horizontal`.
pub const ORIENTATION_KEY: &str = "orientation";
/// Keyboard layout identifier, e.g. `QWERTY`.
pub const KEYBOARD_LAYOUT_KEY: &str = "keyboardLayout";
/// Sound feedback, `on` or `off`.
pub const VOLUME_KEY: &str = "volume";

/// Key/value settings that survive across sessions.
pub trait SettingsStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;

    /// Read a value, falling back to `default`.
    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }
}

/// In-process store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a flat TOML file, rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettings {
    /// Open the file at `path`; a missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(source) => toml::from_str(&source)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file yet");
                BTreeMap::new()
            }
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), SettingsError> {
        let body = toml::to_string(&self.values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, body).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// The two persisted display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplaySettings {
    /// Board orientation
    pub layout: LayoutOrientation,
    /// Card rotation
    pub card: CardOrientation,
}

impl DisplaySettings {
    /// Load from a store. Missing or unreadable values fall back to
    /// portrait/vertical.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let layout = store.get(LAYOUT_KEY).map_or_else(LayoutOrientation::default, |v| {
            v.parse().unwrap_or_else(|err| {
                warn!(%err, "ignoring stored layout");
                LayoutOrientation::default()
            })
        });
        let card = store.get(ORIENTATION_KEY).map_or_else(CardOrientation::default, |v| {
            v.parse().unwrap_or_else(|err| {
                warn!(%err, "ignoring stored orientation");
                CardOrientation::default()
            })
        });
        Self { layout, card }
    }

    /// Write both values.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(LAYOUT_KEY, self.layout.as_str())?;
        store.set(ORIENTATION_KEY, self.card.as_str())
    }

    /// Apply a toggle action. Returns whether anything changed.
    pub fn apply(&mut self, action: BoardAction) -> bool {
        match action {
            BoardAction::ToggleCardOrientation => self.card = self.card.toggled(),
            BoardAction::ToggleLayoutOrientation => self.layout = self.layout.toggled(),
            BoardAction::SelectCard(_) | BoardAction::ClearSelection => return false,
        }
        debug!(layout = %self.layout, card = %self.card, "display settings toggled");
        true
    }

    /// Apply a toggle and persist the result if it changed anything.
    pub fn apply_and_save(
        &mut self,
        action: BoardAction,
        store: &mut dyn SettingsStore,
    ) -> Result<bool, SettingsError> {
        if self.apply(action) {
            self.save(store)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Display config for a (possibly unmeasured) container.
    #[must_use]
    pub const fn display_config(&self, container_width: Option<f32>) -> DisplayConfig {
        DisplayConfig {
            layout: self.layout,
            card: self.card,
            container_width,
        }
    }
}
