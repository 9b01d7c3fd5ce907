//! Argon2id password hashing for user accounts.
//!
//! Parameters: m=19456 KiB, t=2, p=1. Hashes are stored as PHC strings, so the
//! salt and parameters travel with every stored hash.

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use orgdir_application::PasswordHasher as PasswordHasherPort;
use orgdir_core::{AppError, AppResult};

const MEMORY_COST_KIB: u32 = 19_456;
const TIME_COST: u32 = 2;
const PARALLELISM: u32 = 1;

/// Argon2id implementation of the password hashing port.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Creates a hasher with the account password parameters.
    #[must_use]
    pub fn new() -> Self {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_else(|_| Params::default());

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| AppError::Internal(format!("failed to hash password: {error}")))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let stored = PasswordHash::new(hash).map_err(|error| {
            AppError::Internal(format!("stored password hash is malformed: {error}"))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &stored) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(error) => Err(AppError::Internal(format!(
                "failed to verify password: {error}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use orgdir_application::PasswordHasher as PasswordHasherPort;
    use orgdir_core::{AppError, AppResult};

    use super::Argon2PasswordHasher;

    #[test]
    fn stored_hash_is_argon2id_phc_string() -> AppResult<()> {
        let hash = Argon2PasswordHasher::new().hash_password("correct horse")?;
        assert!(hash.starts_with("$argon2id$v=19$m=19456,t=2,p=1$"));
        Ok(())
    }

    #[test]
    fn verify_distinguishes_right_and_wrong_passwords() -> AppResult<()> {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash_password("correct horse")?;

        assert!(hasher.verify_password("correct horse", &hash)?);
        assert!(!hasher.verify_password("battery staple", &hash)?);
        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let result = Argon2PasswordHasher::new().verify_password("whatever", "plaintext");
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
