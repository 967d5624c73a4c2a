//! Error types for board operations.

use tasknest_client::AuthError;
use tasknest_protocol::ValidationError;

/// Everything a board or session operation can fail with.
///
/// None of these are fatal: the caller shows the message and the board keeps
/// running.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Input was rejected before any remote call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The task API call failed.
    #[error(transparent)]
    Remote(#[from] tasknest_client::Error),

    /// The identity provider call failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl BoardError {
    /// Returns `true` for client-side validation failures.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
