//! Credential verification and session token issuance.
//!
//! Hashing and token generation are ports so the application layer stays free
//! of cryptographic library coupling.

use std::sync::Arc;

use async_trait::async_trait;

use orgdir_core::{AppError, AppResult};
use orgdir_domain::{User, UserStatus};

/// Port for password hashing operations.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Opaque bearer token handed out on successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps an issued token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

/// Port for issuing session tokens.
#[async_trait]
pub trait SessionTokenIssuer: Send + Sync {
    /// Issues a token for an authenticated user.
    async fn issue(&self, user: &User) -> AppResult<SessionToken>;
}

/// Verifies credentials against stored hashes and issues tokens.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: Arc<dyn PasswordHasher>,
    token_issuer: Arc<dyn SessionTokenIssuer>,
}

impl Authenticator {
    /// Creates an authenticator from its collaborators.
    #[must_use]
    pub fn new(
        password_hasher: Arc<dyn PasswordHasher>,
        token_issuer: Arc<dyn SessionTokenIssuer>,
    ) -> Self {
        Self {
            password_hasher,
            token_issuer,
        }
    }

    /// Hashes a new password for storage.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        self.password_hasher.hash_password(password)
    }

    /// Checks a login attempt against the looked-up account.
    ///
    /// Unknown accounts, inactive accounts and wrong passwords all produce the
    /// same `Authentication` error.
    pub fn verify(&self, user: Option<User>, password: &str) -> AppResult<User> {
        let Some(user) = user else {
            // Unknown email still pays for one hash.
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::invalid_credentials());
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid || user.status != UserStatus::Active {
            return Err(AppError::invalid_credentials());
        }

        Ok(user)
    }

    /// Burns one hash for a login attempt that failed before lookup.
    pub fn reject(&self, password: &str) -> AppError {
        let _ = self.password_hasher.hash_password(password);
        AppError::invalid_credentials()
    }

    /// Issues a session token for a verified user.
    pub async fn issue_token(&self, user: &User) -> AppResult<SessionToken> {
        self.token_issuer.issue(user).await
    }
}
