//! Remote collaborators for tasknest.
//!
//! This crate provides the two services the board depends on: the task REST
//! API and the identity provider. Each is a trait with an HTTP
//! implementation and an in-memory one.
//!
//! # Overview
//!
//! - [`TaskApi`]: list/create/update/delete tasks and record new users
//! - [`RestTaskClient`]: `reqwest` implementation of [`TaskApi`]
//! - [`InMemoryTaskApi`]: call-recording implementation for offline mode and tests
//! - [`IdentityProvider`]: sign in, sign up, update profile, sign out
//! - [`IdentityToolkitClient`] and [`InMemoryIdentity`]: its implementations
//! - [`Error`] and [`AuthError`]: failure types
//!
//! # Authentication
//!
//! The task API is called without credentials unless an API token is
//! configured, in which case it is sent as a bearer token. Tokens are
//! handled as [`secrecy::SecretString`] to keep them out of logs.
//!
//! # Examples
//!
//! ```no_run
//! use tasknest_client::{RestTaskClient, TaskApi};
//!
//! # async fn example() -> tasknest_client::Result<()> {
//! let client = RestTaskClient::new("http://localhost:5000", None)?;
//! for task in client.list_tasks().await? {
//!     println!("{} [{:?}]", task.title, task.category);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod identity;
pub mod memory;
pub mod rest;

#[cfg(test)]
mod test_server;

pub use api::{TaskApi, UserRecord};
pub use error::{AuthError, AuthResult, Error, Result};
pub use identity::{
    Credentials, IdentityProvider, IdentityToolkitClient, InMemoryIdentity, Profile, User,
};
pub use memory::{ApiCall, InMemoryTaskApi};
pub use rest::RestTaskClient;
