use orgdir_core::AppResult;
use orgdir_domain::EmailAddress;

use super::{DirectoryService, LoginOutcome, UserProfile};

impl DirectoryService {
    /// Verifies credentials and issues a session token.
    ///
    /// Malformed email, unknown email, wrong password and inactive accounts all
    /// fail with the same authentication error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let Ok(email) = EmailAddress::new(email) else {
            return Err(self.authenticator.reject(password));
        };

        let mut reader = self.read().await?;
        let candidate = reader.find_user_by_email(&email).await?;
        drop(reader);

        let user = self.authenticator.verify(candidate, password)?;
        let token = self.authenticator.issue_token(&user).await?;

        Ok(LoginOutcome {
            user: UserProfile::from(&user),
            token,
        })
    }
}
