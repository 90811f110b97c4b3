//! Registration
//!
//! Creates a new user account.

use crate::application::auth_core::AuthCore;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

impl<R> AuthCore<R>
where
    R: UserRepository,
{
    /// Register `email` with `password`
    ///
    /// Fails with `InvalidEmail` when `email` is malformed and with
    /// `AlreadyExists` when it already has an account. The new record has no
    /// session and no pending reset.
    pub async fn register_user(&self, email: &str, password: &str) -> AuthResult<User> {
        let email = Email::new(email).map_err(|e| AuthError::InvalidEmail(e.message().to_string()))?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(AuthError::AlreadyExists);
        }

        let password_hash = self.hash_password(password).await?;

        // The store re-checks uniqueness, covering a concurrent registration
        // that slipped in while we were hashing.
        let user = self.repo.create(&email, &password_hash).await?;

        tracing::info!(user_id = %user.user_id, "User registered");

        Ok(user)
    }
}
