//! Configuration file reading and writing.
//!
//! This module handles loading configuration from files and saving
//! configuration back to files.
//!
//! # File Formats
//!
//! The module supports both JSON5 and JSON formats:
//!
//! - JSON5 (`.json5`): Preferred format with comments and trailing commas
//! - JSON (`.json`): Standard JSON format
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./tasknest.json5` or `./tasknest.json`
//! 2. User: `~/.config/tasknest/config.json5` or `~/.config/tasknest/config.json`
//!
//! Preferences live beside the user config, in `preferences.json`.

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["tasknest.json5", "tasknest.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "tasknest";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Preferences file name inside the user config directory.
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Finds the configuration file path.
///
/// Searches the current directory for `tasknest.json5` then `tasknest.json`,
/// and the user config directory for `config.json5` then `config.json`.
///
/// # Examples
///
/// ```no_run
/// use tasknest_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."), dirs::config_dir().as_deref())
}

/// Searches `local_dir`, then the `tasknest` directory under `config_dir`.
fn find_config_file_in(local_dir: &Path, config_dir: Option<&Path>) -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = config_dir
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).find(|path| path.exists())
}

/// Returns the default user configuration directory.
///
/// This is typically `~/.config/tasknest/` on Unix systems.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
///
/// # Examples
///
/// ```no_run
/// use tasknest_config::persistence::user_config_dir;
///
/// let dir = user_config_dir().unwrap();
/// println!("User config dir: {}", dir.display());
/// ```
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Returns the default preferences file path.
///
/// This is typically `~/.config/tasknest/preferences.json`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_preferences_path() -> Result<PathBuf> {
    Ok(user_config_dir()?.join(PREFERENCES_FILE_NAME))
}

/// Reads and parses a settings file (config or preferences).
///
/// The JSON5 parser accepts plain JSON too, so both extensions go through
/// the same path.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if its content does not match `T`.
///
/// # Examples
///
/// ```no_run
/// use tasknest_config::persistence::read_settings_file;
/// use tasknest_config::Config;
///
/// # fn main() -> tasknest_config::Result<()> {
/// let config: Config = read_settings_file("tasknest.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_settings_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Writes a settings file as pretty-printed JSON, creating parent
/// directories as needed.
///
/// Output is plain JSON since `serde_json5` cannot serialize.
///
/// # Errors
///
/// Returns [`ConfigError::WriteFile`] if the directory or file cannot be
/// written and [`ConfigError::SerializeJson`] if `value` cannot be encoded.
pub fn write_settings_file<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content).map_err(write_error)
}
