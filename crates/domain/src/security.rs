//! Password policy for user accounts.

use orgdir_core::{AppError, AppResult};

/// Minimum password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Maximum password length; bounds the Argon2 work done per request.
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Validates a plaintext password before it is hashed.
pub fn validate_password(password: &str) -> AppResult<()> {
    let char_count = password.chars().count();

    if char_count < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    if char_count > PASSWORD_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "password must not exceed {PASSWORD_MAX_LENGTH} characters"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn very_long_password_is_rejected() {
        let long = "a".repeat(PASSWORD_MAX_LENGTH + 1);
        assert!(validate_password(&long).is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate_password(&"b".repeat(PASSWORD_MIN_LENGTH)).is_ok());
        assert!(validate_password(&"b".repeat(PASSWORD_MAX_LENGTH)).is_ok());
    }
}
