//! tasknest - a terminal task board over a remote task API.
//!
//! This is the main binary: it parses the command line, sets up file
//! logging, resolves configuration and secrets, and launches the TUI.
//!
//! ```bash
//! # Against a local task API, with an Identity Toolkit key
//! tasknest --api-url http://localhost:5000 --identity-key "$KEY"
//!
//! # Offline demo with in-memory tasks and a signed-in demo account
//! tasknest --offline
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tasknest_client::{
    Credentials, IdentityProvider, IdentityToolkitClient, InMemoryIdentity, InMemoryTaskApi,
    RestTaskClient, TaskApi,
};
use tasknest_config::{
    Config, PreferenceStore,
    auth::{resolve_api_token, resolve_identity_key},
};
use tasknest_protocol::dummy::demo_tasks;
use tasknest_tui::{App, terminal, theme::Theme, worker::spawn_worker};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

/// Demo account available with `--offline`.
const DEMO_EMAIL: &str = "demo@tasknest.dev";
const DEMO_PASSWORD: &str = "Demo123";
const DEMO_NAME: &str = "Demo User";

/// Command-line arguments.
///
/// Flags override environment variables, which override the config file.
#[derive(Debug, Parser)]
#[command(version, about = "A terminal task board over a remote task API")]
struct Cli {
    /// Base URL of the task API.
    #[arg(long, env = "TASKNEST_API_URL")]
    api_url: Option<String>,

    /// Bearer token for the task API. Nothing is sent when unset.
    #[arg(long, env = "TASKNEST_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// API key for the identity service.
    #[arg(long, env = "TASKNEST_IDENTITY_KEY", hide_env_values = true)]
    identity_key: Option<String>,

    /// Use in-memory demo data and sign in as demo@tasknest.dev / Demo123.
    #[arg(long)]
    offline: bool,

    /// Path to a config file instead of the default search locations.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tasknest_board=trace`.
    #[arg(long, default_value = "info", env = "TASKNEST_LOG")]
    log_level: String,

    /// Log file. Defaults to `tasknest.log` in the temp directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to a file; the terminal belongs to the UI.
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());
    info!(version = env!("CARGO_PKG_VERSION"), "tasknest starting");

    let config = load_config(&cli)?;
    let (api, identity) = build_collaborators(&cli, &config).await?;

    let (theme, preferences) = load_preferences();
    let mut app = App::new(theme, config.notification_duration());
    if let Some(store) = preferences {
        app = app.with_preferences(store);
    }

    let worker = spawn_worker(api, identity);

    terminal::install_panic_hook();
    let mut terminal = terminal::setup_terminal()?;

    let result = app.run(&mut terminal, worker).await;

    // Always restore the terminal, even if the app failed.
    terminal::restore_terminal(&mut terminal)?;

    info!("tasknest exiting");
    result
}

/// Installs a file-backed subscriber. Returns the guard that flushes
/// buffered lines on drop, or `None` if the log path is unusable.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("tasknest.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    if let Some(url) = &cli.api_url {
        config.api_url.clone_from(url);
        config.validate().context("invalid --api-url")?;
    }
    Ok(config)
}

/// Picks the task API and identity provider for this run.
///
/// Without an identity key there is no way to sign in remotely, so the
/// in-memory provider is used and a warning is logged.
async fn build_collaborators(
    cli: &Cli,
    config: &Config,
) -> anyhow::Result<(Arc<dyn TaskApi>, Arc<dyn IdentityProvider>)> {
    if cli.offline {
        info!("offline mode: using in-memory task API and demo account");
        let identity = InMemoryIdentity::new().with_account(DEMO_EMAIL, DEMO_PASSWORD, DEMO_NAME);
        identity
            .sign_in(&Credentials::new(DEMO_EMAIL, DEMO_PASSWORD))
            .await
            .context("failed to sign in the demo account")?;
        return Ok((
            Arc::new(InMemoryTaskApi::with_tasks(demo_tasks())),
            Arc::new(identity),
        ));
    }

    let token = resolve_api_token(cli.api_token.as_deref(), config);
    info!(
        api_url = %config.api_url,
        authenticated = token.is_some(),
        "using remote task API"
    );
    let api = RestTaskClient::new(&config.api_url, token).context("invalid task API URL")?;

    let identity: Arc<dyn IdentityProvider> =
        match resolve_identity_key(cli.identity_key.as_deref(), config) {
            Some(key) => Arc::new(
                IdentityToolkitClient::new(&config.identity.endpoint, key)
                    .context("invalid identity endpoint")?,
            ),
            None => {
                warn!("no identity API key configured; accounts are kept in memory");
                Arc::new(InMemoryIdentity::new())
            }
        };

    Ok((Arc::new(api), identity))
}

/// Reads the dark-mode preference. A missing or unreadable file falls back
/// to the dark palette without persistence errors stopping startup.
fn load_preferences() -> (Theme, Option<PreferenceStore>) {
    let store = match PreferenceStore::at_default_location() {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "preferences unavailable");
            return (Theme::default(), None);
        }
    };
    let dark = match store.load() {
        Ok(preferences) => preferences.dark_mode,
        Err(e) => {
            warn!(error = %e, path = %store.path().display(), "failed to read preferences");
            Theme::default().is_dark()
        }
    };
    (Theme::new(dark), Some(store))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn offline_flag_parses() {
        let cli = Cli::try_parse_from(["tasknest", "--offline", "--log-level", "debug"]).unwrap();
        assert!(cli.offline);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn api_url_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasknest.json");
        std::fs::write(&path, r#"{"api_url": "http://file.example.com"}"#).unwrap();

        let cli = Cli::try_parse_from([
            "tasknest",
            "--config",
            path.to_str().unwrap(),
            "--api-url",
            "https://flag.example.com",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.api_url, "https://flag.example.com");
    }

    #[test]
    fn bad_api_url_flag_is_rejected() {
        let cli = Cli::try_parse_from(["tasknest", "--api-url", "ftp://nope"]).unwrap();
        assert!(load_config(&cli).is_err());
    }

    #[tokio::test]
    async fn offline_mode_starts_signed_in() {
        let cli = Cli::try_parse_from(["tasknest", "--offline"]).unwrap();
        let (api, identity) = build_collaborators(&cli, &Config::default())
            .await
            .unwrap();

        let user = identity.current_user().await.unwrap().unwrap();
        assert_eq!(user.email.as_deref(), Some(DEMO_EMAIL));
        assert!(!api.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_identity_key_falls_back_to_memory() {
        let cli = Cli::try_parse_from(["tasknest", "--identity-key", "   "]).unwrap();
        let (_, identity) = build_collaborators(&cli, &Config::default())
            .await
            .unwrap();
        assert!(format!("{identity:?}").starts_with("InMemoryIdentity"));
    }
}
