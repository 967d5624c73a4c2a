//! Account form input and its client-side checks.

use std::fmt;

use tasknest_client::{Credentials, Profile, UserRecord};
use tasknest_protocol::ValidationError;
use tasknest_protocol::validation::validate_password;

/// The fields of the sign-up form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Profile photo URL. May be empty.
    pub photo_url: String,
    /// Account email.
    pub email: String,
    /// Account password, in the clear until it is turned into [`Credentials`].
    pub password: String,
}

impl Registration {
    /// Checks the form before anything is sent.
    ///
    /// Email and password must be present, then the password policy applies.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_sign_in(&self.email, &self.password)?;
        validate_password(&self.password)
    }

    /// Credentials for the provider's sign-up call.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.as_str())
    }

    /// Profile fields applied right after sign-up.
    #[must_use]
    pub fn profile(&self) -> Profile {
        Profile {
            display_name: non_empty(&self.name),
            photo_url: non_empty(&self.photo_url),
        }
    }

    /// The record kept by the task API for this user.
    #[must_use]
    pub fn user_record(&self) -> UserRecord {
        UserRecord {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("photo_url", &self.photo_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Checks that both sign-in fields are filled in.
///
/// # Errors
///
/// Returns [`ValidationError::MissingCredentials`] if either is blank.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
