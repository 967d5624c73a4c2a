//! Error types for remote calls.
//!
//! [`Error`] covers the task API (network failures, non-success statuses and
//! undecodable bodies); [`AuthError`] covers the identity provider.

use tasknest_protocol::TaskId;

/// Errors that can occur when calling the remote task API.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}{}", format_body(.body))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The configured base URL cannot address the API.
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl {
        /// The URL as configured.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No task with the given identifier exists.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The backend is unreachable.
    #[error("task API unavailable: {0}")]
    Unavailable(String),
}

/// Appends the body to the status message when there is one.
fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

/// A specialized Result type for task API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Registration with an email that already has an account.
    #[error("an account with this email already exists")]
    EmailExists,

    /// The provider's own password policy rejected the password.
    #[error("password rejected: {0}")]
    WeakPassword(String),

    /// An operation that needs a signed-in user was called without one.
    #[error("no user is signed in")]
    NotSignedIn,

    /// Any other provider-side rejection, with the provider's message.
    #[error("identity provider error: {0}")]
    Provider(String),

    /// The request could not be sent or the response could not be read.
    #[error("identity request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized Result type for identity operations.
pub type AuthResult<T> = std::result::Result<T, AuthError>;
