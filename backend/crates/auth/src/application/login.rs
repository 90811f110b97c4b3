//! Credential Check

use crate::application::auth_core::AuthCore;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};

impl<R> AuthCore<R>
where
    R: UserRepository,
{
    /// `true` iff `email` has an account and `password` matches its hash
    ///
    /// A predicate, not a fallible call: unknown emails, corrupt stored
    /// hashes and store faults all answer `false`.
    pub async fn valid_login(&self, email: &str, password: &str) -> bool {
        let Ok(email) = Email::new(email) else {
            return false;
        };

        let user = match self.repo.find_by_email(&email).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "Login lookup failed");
                return false;
            }
        };

        let ok = user
            .password_hash
            .verify(RawPassword::new(password.to_owned()), self.config.pepper())
            .await;

        tracing::debug!(user_id = %user.user_id, ok, "Password checked");
        ok
    }
}
