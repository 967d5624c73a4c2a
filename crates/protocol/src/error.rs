//! Error types for the tasknest-protocol crate.
//!
//! This module defines the errors raised when parsing protocol values and the
//! client-side validation failures that block a submission.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A category string did not match any known category.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// A client-side validation failure.
///
/// The display strings are the messages shown to the user; a form that fails
/// validation is never submitted to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of the required task fields was left empty.
    #[error("Please fill in all fields.")]
    MissingFields,

    /// The title was empty or too long.
    #[error("Title is required and must be under 50 characters.")]
    InvalidTitle,

    /// The description was too long.
    #[error("Description must be under 200 characters.")]
    DescriptionTooLong,

    /// The password has no uppercase letter.
    #[error("Password must contain at least one uppercase letter.")]
    PasswordMissingUppercase,

    /// The password has no lowercase letter.
    #[error("Password must contain at least one lowercase letter.")]
    PasswordMissingLowercase,

    /// The password is shorter than the minimum length.
    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },

    /// Email and password are both required to sign in.
    #[error("Email and password are required.")]
    MissingCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "Please fill in all fields."
        );
        assert_eq!(
            ValidationError::InvalidTitle.to_string(),
            "Title is required and must be under 50 characters."
        );
        assert_eq!(
            ValidationError::DescriptionTooLong.to_string(),
            "Description must be under 200 characters."
        );
        assert_eq!(
            ValidationError::PasswordTooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters long."
        );
    }

    #[test]
    fn protocol_error_display() {
        let err = ProtocolError::UnknownCategory("Blocked".to_string());
        assert_eq!(err.to_string(), "unknown category: Blocked");
    }
}
