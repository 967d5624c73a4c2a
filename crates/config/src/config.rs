//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the tasknest application.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_settings_file};

/// Base URL of the task API when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// REST endpoint of the identity service when none is configured.
pub const DEFAULT_IDENTITY_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Seconds a notification stays visible when not configured.
pub const DEFAULT_NOTIFICATION_SECS: u64 = 4;

/// Accepted range for `notification_secs`.
pub const NOTIFICATION_SECS_RANGE: std::ops::RangeInclusive<u64> = 1..=60;

/// Environment variable overriding [`Config::api_url`].
pub const ENV_API_URL: &str = "TASKNEST_API_URL";

/// Environment variable overriding [`Config::api_token`].
pub const ENV_API_TOKEN: &str = "TASKNEST_API_TOKEN";

/// Environment variable overriding [`IdentityConfig::api_key`].
pub const ENV_IDENTITY_KEY: &str = "TASKNEST_IDENTITY_KEY";

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityConfig {
    /// REST endpoint of an Identity-Toolkit-compatible service.
    #[serde(default = "default_identity_endpoint")]
    pub endpoint: String,

    /// Web API key of the identity project.
    ///
    /// Without a key the application runs against an in-memory identity
    /// provider.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_identity_endpoint(),
            api_key: None,
        }
    }
}

fn default_identity_endpoint() -> String {
    DEFAULT_IDENTITY_ENDPOINT.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

const fn default_notification_secs() -> u64 {
    DEFAULT_NOTIFICATION_SECS
}

/// The main configuration struct for the tasknest application.
///
/// # Examples
///
/// ```
/// use tasknest_config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api_url, "http://localhost:5000");
/// assert!(config.api_token.is_none());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL of the task REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the task API. Requests are unauthenticated without it.
    #[serde(default)]
    pub api_token: Option<String>,

    /// Identity provider settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// How long notifications stay on screen, in seconds.
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            identity: IdentityConfig::default(),
            notification_secs: DEFAULT_NOTIFICATION_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from the default file locations, then applies
    /// environment overrides.
    ///
    /// If no configuration file is found, defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if the result does not validate.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tasknest_config::Config;
    ///
    /// # fn example() -> tasknest_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Talking to {}", config.api_url);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_settings_file(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// result does not validate.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config: Self = read_settings_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Applies `TASKNEST_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored so that `TASKNEST_API_TOKEN=` does not
    /// replace a configured token with nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.apply_overrides(|key| match key {
    ///     "TASKNEST_API_URL" => Some("https://tasks.example.com".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.api_url, "https://tasks.example.com");
    /// ```
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key| lookup(key).filter(|value: &String| !value.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(token) = get(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(key) = get(ENV_IDENTITY_KEY) {
            self.identity.api_key = Some(key);
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `api_url` or
    /// `identity.endpoint` is not an http(s) URL, and
    /// [`ConfigError::InvalidNotificationSecs`] if `notification_secs` is
    /// outside [`NOTIFICATION_SECS_RANGE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tasknest_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.notification_secs = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        check_http_url("api_url", &self.api_url)?;
        check_http_url("identity.endpoint", &self.identity.endpoint)?;
        if !NOTIFICATION_SECS_RANGE.contains(&self.notification_secs) {
            return Err(ConfigError::InvalidNotificationSecs {
                value: self.notification_secs,
                min: *NOTIFICATION_SECS_RANGE.start(),
                max: *NOTIFICATION_SECS_RANGE.end(),
            });
        }
        Ok(())
    }

    /// Returns the notification lifetime.
    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }
}

/// Accepts absolute `http` and `https` URLs that name a host.
fn check_http_url(key: &'static str, value: &str) -> Result<()> {
    let valid = Url::parse(value)
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            key,
            value: value.to_string(),
        })
    }
}
