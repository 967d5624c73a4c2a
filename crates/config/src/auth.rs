//! Secret resolution.
//!
//! Secrets come from, in order:
//!
//! 1. A command-line flag
//! 2. The config value, which already includes any `TASKNEST_*` override
//!
//! Blank values are treated as absent at every step. A resolved secret is
//! returned as a [`SecretString`] so it stays out of debug output and logs.

use secrecy::SecretString;

use crate::Config;

/// Resolves the bearer token for the task API.
///
/// Returns `None` when no source provides one, in which case the task API is
/// called without credentials.
///
/// # Examples
///
/// ```
/// use secrecy::ExposeSecret;
/// use tasknest_config::{Config, auth::resolve_api_token};
///
/// let config = Config {
///     api_token: Some("from-config".to_string()),
///     ..Config::default()
/// };
///
/// let token = resolve_api_token(Some("from-cli"), &config).unwrap();
/// assert_eq!(token.expose_secret(), "from-cli");
///
/// let token = resolve_api_token(None, &config).unwrap();
/// assert_eq!(token.expose_secret(), "from-config");
/// ```
#[must_use]
pub fn resolve_api_token(cli_token: Option<&str>, config: &Config) -> Option<SecretString> {
    first_secret([cli_token, config.api_token.as_deref()])
}

/// Resolves the identity provider API key.
///
/// Returns `None` when no key is available, in which case the application
/// falls back to an in-memory identity provider.
#[must_use]
pub fn resolve_identity_key(cli_key: Option<&str>, config: &Config) -> Option<SecretString> {
    first_secret([cli_key, config.identity.api_key.as_deref()])
}

fn first_secret<'a>(sources: impl IntoIterator<Item = Option<&'a str>>) -> Option<SecretString> {
    sources
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(|value| SecretString::from(value.to_string()))
}
