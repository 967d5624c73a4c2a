//! Client-side field validation.
//!
//! Every check here runs before a request is built; a failing check means
//! nothing is sent. Lengths are counted in Unicode scalar values, so a
//! title of fifty emoji is as valid as fifty ASCII letters.

use crate::board::Category;
use crate::error::ValidationError;
use crate::task::TaskPatch;

/// Longest accepted task title, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Longest accepted task description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Shortest accepted account password, in characters.
pub const PASSWORD_MIN_CHARS: usize = 6;

/// Validates the fields of a task about to be created.
///
/// All three fields are required. Length limits are checked after presence.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] if any field is empty, or a
/// length error if the title or description is too long.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::{Category, ValidationError, validation::validate_new_task};
///
/// assert!(validate_new_task("Ship it", "Tag the release", Some(Category::ToDo)).is_ok());
/// assert_eq!(
///     validate_new_task("Ship it", "", Some(Category::ToDo)),
///     Err(ValidationError::MissingFields)
/// );
/// ```
pub fn validate_new_task(
    title: &str,
    description: &str,
    category: Option<Category>,
) -> Result<Category, ValidationError> {
    let Some(category) = category else {
        return Err(ValidationError::MissingFields);
    };
    if title.is_empty() || description.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    validate_title(title)?;
    validate_description(description)?;
    Ok(category)
}

/// Validates a partial update.
///
/// A title, when present, must be non-empty and at most
/// [`TITLE_MAX_CHARS`]; a description, when present, at most
/// [`DESCRIPTION_MAX_CHARS`].
///
/// # Errors
///
/// Returns the first failing check.
pub fn validate_patch(patch: &TaskPatch) -> Result<(), ValidationError> {
    if let Some(title) = &patch.title {
        validate_title(title)?;
    }
    if let Some(description) = &patch.description {
        validate_description(description)?;
    }
    Ok(())
}

/// Checks that a title is present and short enough.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTitle`] otherwise.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(ValidationError::InvalidTitle);
    }
    Ok(())
}

/// Checks that a description is short enough. Empty is allowed.
///
/// # Errors
///
/// Returns [`ValidationError::DescriptionTooLong`] otherwise.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(())
}

/// Applies the registration password policy.
///
/// Rules are checked in order (uppercase, lowercase, length) and the first
/// one that fails is reported.
///
/// # Errors
///
/// Returns the error for the first rule the password breaks.
///
/// # Examples
///
/// ```
/// use tasknest_protocol::{ValidationError, validation::validate_password};
///
/// assert!(validate_password("Secret").is_ok());
/// assert_eq!(
///     validate_password("secret"),
///     Err(ValidationError::PasswordMissingUppercase)
/// );
/// ```
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if !password.chars().any(char::is_uppercase) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort {
            min: PASSWORD_MIN_CHARS,
        });
    }
    Ok(())
}
