//! Configuration management for the tasknest application.
//!
//! This crate loads and validates configuration from files, environment
//! variables and defaults, resolves secrets, and stores user preferences.
//!
//! # Overview
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`auth`]: API token and identity key resolution
//! - [`preferences`]: The persisted dark-mode flag
//! - [`persistence`]: Settings file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Highest to lowest:
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`TASKNEST_API_URL`, `TASKNEST_API_TOKEN`,
//!    `TASKNEST_IDENTITY_KEY`)
//! 3. Local config (`./tasknest.json5` or `./tasknest.json`)
//! 4. User config (`~/.config/tasknest/config.json5` or `config.json`)
//! 5. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   api_url: "http://localhost:5000",
//!   // api_token: "...",
//!   identity: {
//!     endpoint: "https://identitytoolkit.googleapis.com/v1",
//!     api_key: "web-api-key",
//!   },
//!   notification_secs: 4,
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use tasknest_config::{Config, auth::resolve_api_token};
//!
//! # fn example() -> tasknest_config::Result<()> {
//! let config = Config::load()?;
//! let token = resolve_api_token(None, &config);
//! println!("API at {} (token: {})", config.api_url, token.is_some());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;
pub mod preferences;

// Re-export primary types at crate root for convenience
pub use config::{Config, DEFAULT_API_URL, DEFAULT_IDENTITY_ENDPOINT, IdentityConfig};
pub use error::{ConfigError, Result};
pub use preferences::{PreferenceStore, Preferences};
