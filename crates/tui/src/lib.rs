//! Terminal UI for TaskNest.
//!
//! A Ratatui front end over the board crate: login and registration
//! screens, the three-column board with keyboard and mouse drag, the task
//! form, and transient notifications.
//!
//! # Overview
//!
//! - [`app`]: screen routing, input handling, and the run loop
//! - [`worker`]: the background task that makes every remote call
//! - [`state`]: board selection and drag state
//! - [`form`]: editable form state
//! - [`event`]: key and mouse mappings
//! - [`layout`]: shared screen measurements
//! - [`theme`]: dark and light palettes
//! - [`terminal`]: terminal setup, teardown, and panic handling
//! - [`widgets`]: rendering functions
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tasknest_client::{InMemoryIdentity, InMemoryTaskApi};
//! use tasknest_tui::{App, terminal, theme::Theme, worker::spawn_worker};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let worker = spawn_worker(
//!         Arc::new(InMemoryTaskApi::new()),
//!         Arc::new(InMemoryIdentity::new()),
//!     );
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(Theme::default(), Duration::from_secs(4));
//!     let result = app.run(&mut terminal, worker).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod form;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod theme;
pub mod widgets;
pub mod worker;

#[cfg(test)]
pub(crate) mod test_utils;

pub use app::App;
pub use state::BoardState;
