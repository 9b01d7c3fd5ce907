//! Shared primitives for all orgdir crates.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across orgdir crates.
pub type AppResult<T> = Result<T, AppError>;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string. Surrounding whitespace is trimmed.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a validated non-empty string, naming the field in errors.
    pub fn for_field(field: &str, value: impl Into<String>) -> AppResult<Self> {
        Self::new(value)
            .map_err(|_| AppError::Validation(format!("{field} must not be empty or whitespace")))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate unique key, or a delete blocked by dependents.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A child record names a parent that does not exist.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Credentials did not match. Never says which part was wrong.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds the single authentication failure used for every login miss.
    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::Authentication(INVALID_CREDENTIALS_MESSAGE.to_owned())
    }
}
