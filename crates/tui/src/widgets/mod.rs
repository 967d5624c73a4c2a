//! Rendering functions for every screen of the app.
//!
//! Each widget is a plain function that draws state into a buffer, which
//! keeps them easy to test and compose.
//!
//! - [`board`]: the three columns and mouse hit-testing
//! - [`lane`]: one column with its cards
//! - [`task_card`]: a single card, colored by column
//! - [`navbar`] and [`status_bar`]: top and bottom chrome
//! - [`task_form`], [`confirm`], [`help`]: overlays
//! - [`auth`]: login, registration, and loading screens

pub mod auth;
pub mod board;
pub mod confirm;
pub mod help;
mod input;
pub mod lane;
pub mod navbar;
pub mod status_bar;
pub mod task_card;
pub mod task_form;

pub use auth::{render_loading, render_login, render_register};
pub use board::{drop_slot_at, lane_areas, render_board, slot_at};
pub use confirm::render_confirm;
pub use help::render_help_overlay;
pub use lane::{LaneFocus, render_lane};
pub use navbar::render_navbar;
pub use status_bar::render_status_bar;
pub use task_card::{CardHighlight, render_task_card};
pub use task_form::render_task_form;
