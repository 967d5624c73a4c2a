//! Persisted user preferences.
//!
//! The dark-mode flag is the only preference. It is stored as
//! `{"darkMode": true}` in `preferences.json`, read once at startup and
//! written every time it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::{default_preferences_path, read_settings_file, write_settings_file};

/// User preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the dark palette is active.
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
}

/// Reads and writes [`Preferences`] at a fixed path.
///
/// # Examples
///
/// ```
/// use tasknest_config::PreferenceStore;
///
/// # fn main() -> tasknest_config::Result<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let store = PreferenceStore::new(dir.path().join("preferences.json"));
///
/// assert!(!store.load()?.dark_mode);
/// store.set_dark_mode(true)?;
/// assert!(store.load()?.dark_mode);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location under the user config
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_preferences_path()?))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads preferences. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        read_settings_file(&self.path)
    }

    /// Writes preferences, replacing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        write_settings_file(&self.path, preferences)
    }

    /// Persists a new dark-mode value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn set_dark_mode(&self, dark_mode: bool) -> Result<()> {
        self.save(&Preferences { dark_mode })
    }
}
