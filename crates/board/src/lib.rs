//! Board logic for tasknest.
//!
//! This crate sits between the terminal UI and the remote collaborators:
//!
//! - [`BoardController`] owns the task store and reconciles it with the task
//!   API by reloading after every write.
//! - [`AuthSession`] tracks the signed-in user and [`guard`] decides whether
//!   the board may be shown.
//! - [`NotificationQueue`] holds the transient messages shown after each
//!   operation.

pub mod account;
pub mod controller;
pub mod error;
pub mod notification;
pub mod session;

pub use account::Registration;
pub use controller::{BoardController, Confirmation};
pub use error::{BoardError, Result};
pub use notification::{Level, Notification, NotificationQueue};
pub use session::{AuthSession, AuthState, GuardDecision, Registered, Route, guard};
