//! Input-shape rules for account fields, enforced at the API boundary.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Symbols accepted as the required special character in a password.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// Username length bounds (inclusive).
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;

/// Maximum length of the profile bio in characters.
pub const MAX_BIO_LENGTH: usize = 500;

/// Maximum length of an avatar reference (URL or storage key).
pub const MAX_AVATAR_LENGTH: usize = 2_048;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Enforce the password policy: at least [`MIN_PASSWORD_LENGTH`] characters,
/// one uppercase letter, one digit, and one symbol from [`PASSWORD_SYMBOLS`].
///
/// All violated rules are reported in a single message.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!("at least {MIN_PASSWORD_LENGTH} characters"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("one uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("one number".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        problems.push(format!("one special character ({PASSWORD_SYMBOLS})"));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Password must contain {}",
            problems.join(", ")
        )))
    }
}

/// Usernames are 3-30 ASCII letters, digits, or underscores.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, numbers, and underscores".to_string(),
        ));
    }
    Ok(())
}

/// Bio is free text up to [`MAX_BIO_LENGTH`] characters.
pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    if bio.chars().count() > MAX_BIO_LENGTH {
        return Err(CoreError::Validation(format!(
            "Bio exceeds maximum length of {MAX_BIO_LENGTH} characters"
        )));
    }
    Ok(())
}

pub fn validate_avatar(avatar: &str) -> Result<(), CoreError> {
    if avatar.chars().count() > MAX_AVATAR_LENGTH {
        return Err(CoreError::Validation(format!(
            "Avatar reference exceeds maximum length of {MAX_AVATAR_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Emails are stored and compared in lowercase with surrounding whitespace
/// removed.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Whether a login identifier should be looked up as an email rather than a
/// username.
pub fn is_email_identifier(identifier: &str) -> bool {
    identifier.contains('@')
}
