use std::fmt::Write;

use async_trait::async_trait;
use orgdir_application::{SessionToken, SessionTokenIssuer};
use orgdir_core::{AppError, AppResult};
use orgdir_domain::User;

const TOKEN_BYTES: usize = 32;

/// Issues opaque session tokens from the operating system RNG.
///
/// Tokens are 64 lowercase hex characters and carry no user data.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSessionTokenIssuer;

#[async_trait]
impl SessionTokenIssuer for RandomSessionTokenIssuer {
    async fn issue(&self, _user: &User) -> AppResult<SessionToken> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::fill(&mut bytes).map_err(|error| {
            AppError::Internal(format!("failed to generate session token: {error}"))
        })?;

        let token = bytes
            .iter()
            .fold(String::with_capacity(TOKEN_BYTES * 2), |mut acc, byte| {
                let _ = write!(acc, "{byte:02x}");
                acc
            });

        Ok(SessionToken::new(token))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use orgdir_application::SessionTokenIssuer;
    use orgdir_core::{AppResult, NonEmptyString};
    use orgdir_domain::{EmailAddress, User, UserId, UserRole, UserStatus};

    use super::RandomSessionTokenIssuer;

    fn user() -> AppResult<User> {
        Ok(User {
            id: UserId::new(1)?,
            eid: None,
            fname: NonEmptyString::new("Ada")?,
            lname: None,
            email: EmailAddress::new("ada@example.com")?,
            password_hash: String::new(),
            role: UserRole::Admin,
            did: None,
            working_hours: 40,
            join_date: None,
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn tokens_are_hex_and_distinct() -> AppResult<()> {
        let user = user()?;
        let first = RandomSessionTokenIssuer.issue(&user).await?;
        let second = RandomSessionTokenIssuer.issue(&user).await?;

        assert_eq!(first.as_str().len(), 64);
        assert!(first.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
        Ok(())
    }
}
